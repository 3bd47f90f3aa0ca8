use chrono::Utc;
use tracing::{debug, info, warn};

use crate::client::{FetchError, UserApi};
use crate::models::{Profile, RepositorySummary};
use crate::render::{render_profile, render_repositories, ElementId, RenderTarget};

/// The single exclusive display mode of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiState {
    Idle,
    Loading,
    Error,
    Result,
}

impl UiState {
    pub const ALL: [UiState; 4] = [UiState::Idle, UiState::Loading, UiState::Error, UiState::Result];

    /// The page panel shown while in this state.
    pub fn panel(self) -> ElementId {
        match self {
            UiState::Idle => ElementId::InitialState,
            UiState::Loading => ElementId::Loading,
            UiState::Error => ElementId::Error,
            UiState::Result => ElementId::ProfileSection,
        }
    }
}

/// Identifies one submitted search. Only the most recently issued ticket can
/// complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
    handle: String,
}

impl SearchTicket {
    pub fn handle(&self) -> &str {
        &self.handle
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Everything a successful lookup renders.
#[derive(Debug, Clone)]
pub struct SearchResults {
    pub profile: Profile,
    pub repositories: Vec<RepositorySummary>,
}

/// Keys the page reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Escape,
}

/// Fetches both halves of a lookup. Nothing is returned unless both succeed.
pub async fn fetch_results<A: UserApi + ?Sized>(
    api: &A,
    handle: &str,
) -> Result<SearchResults, FetchError> {
    let (profile, repositories) =
        tokio::try_join!(api.fetch_profile(handle), api.fetch_repositories(handle))?;
    Ok(SearchResults {
        profile,
        repositories,
    })
}

/// Owns the UI state and drives the API and renderer.
pub struct Controller<A, T> {
    api: A,
    target: T,
    state: UiState,
    generation: u64,
}

impl<A: UserApi, T: RenderTarget> Controller<A, T> {
    pub fn new(api: A, target: T) -> Self {
        let mut controller = Self {
            api,
            target,
            state: UiState::Idle,
            generation: 0,
        };
        controller.enter(UiState::Idle);
        controller
    }

    pub fn state(&self) -> UiState {
        self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn into_target(self) -> T {
        self.target
    }

    fn enter(&mut self, state: UiState) {
        for other in UiState::ALL {
            self.target.set_visible(other.panel(), other == state);
        }
        if self.state != state {
            info!(from = ?self.state, to = ?state, "ui state change");
        }
        self.state = state;
    }

    /// Starts a search for the trimmed `input`, superseding any search still
    /// in flight. Blank input is ignored and yields no ticket.
    pub fn begin_search(&mut self, input: &str) -> Option<SearchTicket> {
        let handle = input.trim();
        if handle.is_empty() {
            return None;
        }

        self.generation += 1;
        self.target.set_attribute(ElementId::SearchInput, "value", handle);
        self.enter(UiState::Loading);
        info!(handle, generation = self.generation, "searching");

        Some(SearchTicket {
            generation: self.generation,
            handle: handle.to_string(),
        })
    }

    /// Applies the outcome of a search. Returns `false` when the ticket was
    /// superseded and the outcome was discarded.
    pub fn finish_search(
        &mut self,
        ticket: &SearchTicket,
        outcome: Result<SearchResults, FetchError>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                handle = %ticket.handle,
                generation = ticket.generation,
                current = self.generation,
                "discarding superseded search"
            );
            return false;
        }

        match outcome {
            Ok(results) => {
                render_profile(&mut self.target, &results.profile);
                render_repositories(&mut self.target, &results.repositories, Utc::now());
                self.enter(UiState::Result);
                info!(
                    handle = %ticket.handle,
                    repositories = results.repositories.len(),
                    "search complete"
                );
            }
            Err(err) => {
                warn!(handle = %ticket.handle, error = %err, "search failed");
                self.enter(UiState::Error);
            }
        }
        true
    }

    /// Runs a whole search: begin, fetch, finish. Returns the resulting state,
    /// or `None` for blank input.
    pub async fn search(&mut self, input: &str) -> Option<UiState> {
        let ticket = self.begin_search(input)?;
        let outcome = fetch_results(&self.api, ticket.handle()).await;
        self.finish_search(&ticket, outcome);
        Some(self.state)
    }

    /// `/` focuses the search input, `Escape` releases it. Returns whether
    /// the key was consumed.
    pub fn handle_key(&mut self, key: Key) -> bool {
        let focused = self.target.is_focused(ElementId::SearchInput);
        match key {
            Key::Char('/') if !focused => {
                self.target.focus(ElementId::SearchInput);
                true
            }
            Key::Escape if focused => {
                self.target.blur(ElementId::SearchInput);
                true
            }
            _ => false,
        }
    }
}
