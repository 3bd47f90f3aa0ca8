//! Exercises `GitHubClient` against a local axum stub of the users API.

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use gitview::{FetchError, GitHubClient, UserApi};

/// Headers of every request the stub has seen.
type Seen = Arc<Mutex<Vec<HeaderMap>>>;

async fn spawn_stub(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    base
}

fn profile_json(login: &str) -> Value {
    json!({
        "login": login,
        "name": "The Octocat",
        "avatar_url": "https://avatars.githubusercontent.com/u/583231",
        "html_url": format!("https://github.com/{login}"),
        "bio": null,
        "location": "San Francisco",
        "company": "@github",
        "blog": "https://github.blog",
        "twitter_username": null,
        "public_repos": 8,
        "followers": 21000,
        "following": 9
    })
}

fn repo_json(name: &str) -> Value {
    json!({
        "name": name,
        "html_url": format!("https://github.com/octocat/{name}"),
        "private": false,
        "description": null,
        "language": "Ruby",
        "stargazers_count": 10,
        "forks_count": 2,
        "updated_at": "2024-05-01T10:00:00Z"
    })
}

/// Profiles for `octocat` only, plus a repo list that honors the expected
/// query and otherwise answers 400.
fn users_api(seen: Seen) -> Router {
    let profile_seen = Arc::clone(&seen);
    Router::new()
        .route(
            "/users/:handle",
            get(move |Path(handle): Path<String>, headers: HeaderMap| async move {
                profile_seen.lock().unwrap().push(headers);
                if handle == "octocat" {
                    Ok(Json(profile_json(&handle)))
                } else {
                    Err((StatusCode::NOT_FOUND, Json(json!({ "message": "Not Found" }))))
                }
            }),
        )
        .route(
            "/users/:handle/repos",
            get(
                move |Query(query): Query<HashMap<String, String>>, headers: HeaderMap| async move {
                    seen.lock().unwrap().push(headers);
                    let expected = query.get("sort").map(String::as_str) == Some("updated")
                        && query.get("per_page").map(String::as_str) == Some("6");
                    if !expected {
                        return Err(StatusCode::BAD_REQUEST);
                    }
                    let repos: Vec<Value> =
                        (1..=8).map(|i| repo_json(&format!("repo-{i}"))).collect();
                    Ok(Json(Value::Array(repos)))
                },
            ),
        )
}

fn failing_api(status: StatusCode) -> Router {
    Router::new()
        .route("/users/:handle", get(move || async move { status }))
        .route("/users/:handle/repos", get(move || async move { status }))
}

#[tokio::test]
async fn fetches_profile() {
    let seen = Seen::default();
    let base = spawn_stub(users_api(Arc::clone(&seen))).await;

    let client = GitHubClient::new(base).unwrap();
    let profile = client.fetch_profile("octocat").await.unwrap();

    assert_eq!(profile.login, "octocat");
    assert_eq!(profile.display_name(), "The Octocat");
    assert_eq!(profile.followers, 21000);
    assert_eq!(profile.bio, None);

    let seen = seen.lock().unwrap();
    let headers = &seen[0];
    let user_agent = headers["user-agent"].to_str().unwrap();
    assert!(user_agent.starts_with("gitview/"), "{user_agent}");
    assert_eq!(headers["accept"], "application/vnd.github.v3+json");
    assert!(!headers.contains_key("authorization"));
}

#[tokio::test]
async fn missing_profile_is_not_found() {
    let base = spawn_stub(users_api(Seen::default())).await;
    let client = GitHubClient::new(base).unwrap();

    let err = client.fetch_profile("nobody").await.unwrap_err();
    assert!(matches!(err, FetchError::NotFound { ref handle } if handle == "nobody"));
}

#[tokio::test]
async fn server_error_is_a_status_failure() {
    let base = spawn_stub(failing_api(StatusCode::SERVICE_UNAVAILABLE)).await;
    let client = GitHubClient::new(base).unwrap();

    let err = client.fetch_profile("octocat").await.unwrap_err();
    match err {
        FetchError::Status { status, .. } => assert_eq!(status.as_u16(), 503),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn fetches_recent_repositories_in_order() {
    let seen = Seen::default();
    let base = spawn_stub(users_api(Arc::clone(&seen))).await;

    let client = GitHubClient::new(base).unwrap();
    let repos = client.fetch_repositories("octocat").await.unwrap();

    assert_eq!(repos.len(), 6);
    assert_eq!(repos[0].name, "repo-1");
    assert_eq!(repos[5].name, "repo-6");
    assert_eq!(repos[0].language.as_deref(), Some("Ruby"));
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn repository_failure_is_reported() {
    let base = spawn_stub(failing_api(StatusCode::FORBIDDEN)).await;
    let client = GitHubClient::new(base).unwrap();

    let err = client.fetch_repositories("octocat").await.unwrap_err();
    assert!(matches!(err, FetchError::Status { resource: "repositories", .. }));
}

#[tokio::test]
async fn unreachable_api_is_a_network_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let client = GitHubClient::new(base).unwrap();
    let err = client.fetch_profile("octocat").await.unwrap_err();
    assert!(matches!(err, FetchError::Network(_)));
}
