//! GitView: look up a GitHub user and render their profile and most recently
//! updated repositories.
//!
//! The [`Controller`] owns the page state and talks to the API through
//! [`UserApi`] and to the page through [`RenderTarget`], so both sides can be
//! swapped out. [`Document`] is the bundled in-memory target; [`render_page`]
//! turns it into a standalone HTML page.

pub mod client;
pub mod config;
pub mod controller;
pub mod document;
pub mod format;
pub mod models;
pub mod page;
pub mod render;

pub use client::{FetchError, GitHubClient, UserApi};
pub use config::Config;
pub use controller::{fetch_results, Controller, Key, SearchResults, SearchTicket, UiState};
pub use document::Document;
pub use models::{Profile, RepositorySummary};
pub use page::render_page;
pub use render::{ElementId, RenderTarget};
