//! Maps lookup results onto a [`RenderTarget`].

use chrono::{DateTime, Utc};

use crate::format::{escape_html, format_count, format_relative_date, language_color};
use crate::models::{present, Profile, RepositorySummary};

/// Elements of the page a renderer may address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementId {
    SearchInput,
    InitialState,
    Loading,
    Error,
    ProfileSection,
    Avatar,
    Name,
    Username,
    Bio,
    ProfileLink,
    Repos,
    Followers,
    Following,
    LocationItem,
    Location,
    CompanyItem,
    Company,
    BlogItem,
    Blog,
    TwitterItem,
    Twitter,
    ReposList,
}

impl ElementId {
    pub const ALL: [ElementId; 22] = [
        ElementId::SearchInput,
        ElementId::InitialState,
        ElementId::Loading,
        ElementId::Error,
        ElementId::ProfileSection,
        ElementId::Avatar,
        ElementId::Name,
        ElementId::Username,
        ElementId::Bio,
        ElementId::ProfileLink,
        ElementId::Repos,
        ElementId::Followers,
        ElementId::Following,
        ElementId::LocationItem,
        ElementId::Location,
        ElementId::CompanyItem,
        ElementId::Company,
        ElementId::BlogItem,
        ElementId::Blog,
        ElementId::TwitterItem,
        ElementId::Twitter,
        ElementId::ReposList,
    ];

    /// The `id` attribute the element carries in the page.
    pub fn dom_id(self) -> &'static str {
        match self {
            ElementId::SearchInput => "searchInput",
            ElementId::InitialState => "initialState",
            ElementId::Loading => "loading",
            ElementId::Error => "error",
            ElementId::ProfileSection => "profileSection",
            ElementId::Avatar => "avatar",
            ElementId::Name => "name",
            ElementId::Username => "username",
            ElementId::Bio => "bio",
            ElementId::ProfileLink => "profileLink",
            ElementId::Repos => "repos",
            ElementId::Followers => "followers",
            ElementId::Following => "following",
            ElementId::LocationItem => "locationItem",
            ElementId::Location => "location",
            ElementId::CompanyItem => "companyItem",
            ElementId::Company => "company",
            ElementId::BlogItem => "blogItem",
            ElementId::Blog => "blog",
            ElementId::TwitterItem => "twitterItem",
            ElementId::Twitter => "twitter",
            ElementId::ReposList => "reposList",
        }
    }
}

/// The mutations the renderer and controller perform on a page.
///
/// `set_text` never interprets its argument as markup. `set_inner_html`
/// replaces the element's content with markup, which the caller must have
/// escaped where needed.
pub trait RenderTarget {
    fn set_text(&mut self, id: ElementId, text: &str);

    fn set_attribute(&mut self, id: ElementId, name: &str, value: &str);

    fn set_visible(&mut self, id: ElementId, visible: bool);

    fn set_inner_html(&mut self, id: ElementId, markup: &str);

    fn focus(&mut self, id: ElementId);

    fn blur(&mut self, id: ElementId);

    fn is_focused(&self, id: ElementId) -> bool;
}

pub const NO_BIO: &str = "No bio available";

pub const NO_REPOSITORIES: &str = r#"<p class="repos-empty">No repositories found</p>"#;

const STAR_ICON: &str = r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><polygon points="12 2 15.09 8.26 22 9.27 17 14.14 18.18 21.02 12 17.77 5.82 21.02 7 14.14 2 9.27 8.91 8.26 12 2"></polygon></svg>"#;

const FORK_ICON: &str = r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><line x1="22" y1="2" x2="11" y2="13"></line><polygon points="22 2 15 22 11 13 2 9 22 2"></polygon></svg>"#;

/// Fills the profile card from `profile`.
pub fn render_profile<T: RenderTarget + ?Sized>(target: &mut T, profile: &Profile) {
    target.set_attribute(ElementId::Avatar, "src", &profile.avatar_url);
    target.set_attribute(
        ElementId::Avatar,
        "alt",
        &format!("{}'s avatar", profile.login),
    );
    target.set_text(ElementId::Name, profile.display_name());
    target.set_text(ElementId::Username, &format!("@{}", profile.login));
    target.set_text(ElementId::Bio, present(&profile.bio).unwrap_or(NO_BIO));
    target.set_attribute(ElementId::ProfileLink, "href", &profile.html_url);

    target.set_text(ElementId::Repos, &format_count(profile.public_repos));
    target.set_text(ElementId::Followers, &format_count(profile.followers));
    target.set_text(ElementId::Following, &format_count(profile.following));

    optional_detail(
        target,
        ElementId::LocationItem,
        ElementId::Location,
        present(&profile.location),
    );
    optional_detail(
        target,
        ElementId::CompanyItem,
        ElementId::Company,
        present(&profile.company),
    );

    match present(&profile.blog) {
        Some(blog) => {
            target.set_attribute(ElementId::Blog, "href", &website_url(blog));
            target.set_text(ElementId::Blog, blog);
            target.set_visible(ElementId::BlogItem, true);
        }
        None => target.set_visible(ElementId::BlogItem, false),
    }

    let twitter = present(&profile.twitter_username).map(|handle| format!("@{handle}"));
    optional_detail(
        target,
        ElementId::TwitterItem,
        ElementId::Twitter,
        twitter.as_deref(),
    );
}

fn optional_detail<T: RenderTarget + ?Sized>(
    target: &mut T,
    item: ElementId,
    field: ElementId,
    value: Option<&str>,
) {
    match value {
        Some(value) => {
            target.set_text(field, value);
            target.set_visible(item, true);
        }
        None => target.set_visible(item, false),
    }
}

/// Link target for a profile website; values without a `scheme://` prefix
/// get `https://`.
pub fn website_url(blog: &str) -> String {
    if has_scheme(blog) {
        blog.to_string()
    } else {
        format!("https://{blog}")
    }
}

/// RFC 3986 scheme: a letter, then letters, digits, `+`, `-` or `.`.
fn has_scheme(value: &str) -> bool {
    let Some((scheme, _)) = value.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Replaces the repository list with one card per entry, in order.
pub fn render_repositories<T: RenderTarget + ?Sized>(
    target: &mut T,
    repos: &[RepositorySummary],
    now: DateTime<Utc>,
) {
    if repos.is_empty() {
        target.set_inner_html(ElementId::ReposList, NO_REPOSITORIES);
        return;
    }

    let cards: String = repos.iter().map(|repo| repo_card(repo, now)).collect();
    target.set_inner_html(ElementId::ReposList, &cards);
}

/// Markup for a single repository card.
pub fn repo_card(repo: &RepositorySummary, now: DateTime<Utc>) -> String {
    let mut card = String::from(r#"<div class="repo-card">"#);

    card.push_str(&format!(
        r#"<div class="repo-header"><a href="{}" target="_blank" rel="noopener" class="repo-name">{}</a><span class="repo-visibility">{}</span></div>"#,
        escape_html(&repo.html_url),
        escape_html(&repo.name),
        repo.visibility_label(),
    ));

    if let Some(description) = present(&repo.description) {
        card.push_str(&format!(
            r#"<p class="repo-description">{}</p>"#,
            escape_html(description)
        ));
    }

    card.push_str(r#"<div class="repo-stats">"#);
    if let Some(language) = present(&repo.language) {
        card.push_str(&format!(
            r#"<div class="repo-language"><span class="language-dot" style="background: {}"></span><span>{}</span></div>"#,
            language_color(Some(language)),
            escape_html(language),
        ));
    }
    card.push_str(&format!(
        r#"<div class="repo-stat">{STAR_ICON}{}</div>"#,
        format_count(repo.stargazers_count)
    ));
    card.push_str(&format!(
        r#"<div class="repo-stat">{FORK_ICON}{}</div>"#,
        format_count(repo.forks_count)
    ));
    if let Some(updated_at) = repo.updated_at {
        card.push_str(&format!(
            r#"<div class="repo-stat"><span>Updated {}</span></div>"#,
            format_relative_date(updated_at, now)
        ));
    }
    card.push_str("</div></div>");

    card
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn repo(name: &str) -> RepositorySummary {
        RepositorySummary {
            name: name.to_string(),
            html_url: format!("https://github.com/octocat/{name}"),
            private: false,
            description: None,
            language: None,
            stargazers_count: 0,
            forks_count: 0,
            updated_at: Some(now() - Duration::days(1)),
        }
    }

    fn full_profile() -> Profile {
        Profile {
            login: "octocat".into(),
            name: Some("The Octocat".into()),
            avatar_url: "https://avatars.example/u/583231".into(),
            html_url: "https://github.com/octocat".into(),
            bio: Some("Mascot".into()),
            location: Some("San Francisco".into()),
            company: Some("@github".into()),
            blog: Some("github.blog".into()),
            twitter_username: Some("github".into()),
            public_repos: 8,
            followers: 12345,
            following: 9,
        }
    }

    #[test]
    fn renders_full_profile() {
        let mut doc = Document::new();
        render_profile(&mut doc, &full_profile());

        assert_eq!(doc.text(ElementId::Name), Some("The Octocat"));
        assert_eq!(doc.text(ElementId::Username), Some("@octocat"));
        assert_eq!(doc.text(ElementId::Bio), Some("Mascot"));
        assert_eq!(doc.attribute(ElementId::Avatar, "alt"), Some("octocat's avatar"));
        assert_eq!(
            doc.attribute(ElementId::ProfileLink, "href"),
            Some("https://github.com/octocat")
        );
        assert_eq!(doc.text(ElementId::Followers), Some("12.3k"));
        assert_eq!(doc.text(ElementId::Repos), Some("8"));
        assert_eq!(doc.text(ElementId::Twitter), Some("@github"));
        assert_eq!(doc.text(ElementId::Blog), Some("github.blog"));
        assert_eq!(
            doc.attribute(ElementId::Blog, "href"),
            Some("https://github.blog")
        );
        for item in [
            ElementId::LocationItem,
            ElementId::CompanyItem,
            ElementId::BlogItem,
            ElementId::TwitterItem,
        ] {
            assert!(doc.is_visible(item), "{item:?} should be visible");
        }
    }

    #[test]
    fn missing_details_hide_their_containers() {
        let mut doc = Document::new();
        let profile = Profile {
            login: "ghost".into(),
            blog: Some(String::new()),
            ..Default::default()
        };
        render_profile(&mut doc, &profile);

        assert!(!doc.is_visible(ElementId::LocationItem));
        assert!(!doc.is_visible(ElementId::CompanyItem));
        assert!(!doc.is_visible(ElementId::BlogItem));
        assert!(!doc.is_visible(ElementId::TwitterItem));
        assert_eq!(doc.text(ElementId::Name), Some("ghost"));
        assert_eq!(doc.text(ElementId::Bio), Some(NO_BIO));
    }

    #[test]
    fn rerender_hides_details_from_previous_profile() {
        let mut doc = Document::new();
        render_profile(&mut doc, &full_profile());
        render_profile(
            &mut doc,
            &Profile {
                login: "ghost".into(),
                ..Default::default()
            },
        );
        assert!(!doc.is_visible(ElementId::LocationItem));
    }

    #[test]
    fn website_scheme_is_normalized() {
        assert_eq!(website_url("example.com"), "https://example.com");
        assert_eq!(website_url("http://example.com"), "http://example.com");
        assert_eq!(website_url("HTTPS://example.com"), "HTTPS://example.com");
        assert_eq!(website_url("httpbin.org"), "https://httpbin.org");
    }

    #[test]
    fn other_schemes_are_left_alone() {
        assert_eq!(website_url("ftp://files.example"), "ftp://files.example");
        assert_eq!(website_url("git+ssh://host/repo"), "git+ssh://host/repo");
        assert_eq!(website_url("://broken"), "https://://broken");
        assert_eq!(
            website_url("example.com/?next=http://x"),
            "https://example.com/?next=http://x"
        );
    }

    #[test]
    fn empty_repository_list_shows_placeholder() {
        let mut doc = Document::new();
        render_repositories(&mut doc, &[], now());

        let markup = doc.inner_html(ElementId::ReposList).unwrap();
        assert_eq!(markup, NO_REPOSITORIES);
        assert!(!markup.contains("repo-card"));
    }

    #[test]
    fn cards_follow_input_order() {
        let mut doc = Document::new();
        render_repositories(&mut doc, &[repo("first"), repo("second")], now());

        let markup = doc.inner_html(ElementId::ReposList).unwrap();
        assert_eq!(markup.matches(r#"class="repo-card""#).count(), 2);
        assert!(markup.find("first").unwrap() < markup.find("second").unwrap());
    }

    #[test]
    fn card_contents() {
        let repo = RepositorySummary {
            private: true,
            description: Some("A small tool".into()),
            language: Some("Rust".into()),
            stargazers_count: 1500,
            forks_count: 42,
            ..repo("gitview")
        };
        let card = repo_card(&repo, now());

        assert!(card.contains(r#"href="https://github.com/octocat/gitview" target="_blank" rel="noopener""#));
        assert!(card.contains(r#"<span class="repo-visibility">Private</span>"#));
        assert!(card.contains(r#"<p class="repo-description">A small tool</p>"#));
        assert!(card.contains("background: #dea584"));
        assert!(card.contains("<span>Rust</span>"));
        assert!(card.contains("</svg>1.5k</div>"));
        assert!(card.contains("</svg>42</div>"));
        assert!(card.contains("Updated yesterday"));
    }

    #[test]
    fn optional_card_sections_are_omitted() {
        let card = repo_card(&repo("bare"), now());
        assert!(card.contains("Public"));
        assert!(!card.contains("repo-description"));
        assert!(!card.contains("repo-language"));

        let undated = RepositorySummary {
            updated_at: None,
            ..repo("undated")
        };
        assert!(!repo_card(&undated, now()).contains("Updated"));
    }

    #[test]
    fn description_markup_is_escaped() {
        let repo = RepositorySummary {
            description: Some("<img src=x onerror=alert(1)>".into()),
            ..repo("evil")
        };
        let card = repo_card(&repo, now());

        assert!(card.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(!card.contains("<img"));
    }
}
