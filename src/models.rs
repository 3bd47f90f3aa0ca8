use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A GitHub user profile from the `/users/{username}` API.
///
/// Decoding is lenient: a missing field falls back to its default instead of
/// failing the whole lookup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub html_url: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub blog: Option<String>,
    pub twitter_username: Option<String>,
    pub public_repos: u64,
    pub followers: u64,
    pub following: u64,
}

impl Profile {
    /// Name shown in the profile header, falling back to the login.
    pub fn display_name(&self) -> &str {
        present(&self.name).unwrap_or(self.login.as_str())
    }
}

/// A single entry from `/users/{username}/repos`.
///
/// Decoded as leniently as [`Profile`], so one incomplete entry cannot fail
/// the whole list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RepositorySummary {
    pub name: String,
    pub html_url: String,
    pub private: bool,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub updated_at: Option<DateTime<Utc>>,
}

impl RepositorySummary {
    pub fn visibility_label(&self) -> &'static str {
        if self.private {
            "Private"
        } else {
            "Public"
        }
    }
}

/// Treats `None` and empty strings alike. The API reports an unset website as
/// `""` rather than `null`.
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
