//! Debounced user search flow.
//!
//! Keystrokes update `raw_query` immediately and ask the driver to (re)start
//! the settle timer. Only a settled value issues a request. Results fan out
//! into the full grid and a truncated suggestions view.
use tracing::{debug, warn};

use crate::github::UserSummary;
use crate::lookup::RequestId;

pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchEvent {
    Keystroke(String),
    Settled(String),
    Loaded { id: RequestId, items: Vec<UserSummary> },
    Failed { id: RequestId },
}

/// Side effect the driver must perform after a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchCommand {
    /// Restart the settle timer with this value.
    Debounce(String),
    /// Issue one search request.
    Fetch { id: RequestId, query: String },
}

#[derive(Clone, Debug)]
pub struct UserSearch {
    pub raw_query: String,
    pub settled_query: String,
    pub results: Vec<UserSummary>,
    pub suggestions: Vec<UserSummary>,
    pub loading: bool,
    pub selected: usize,
    pub suggestion_limit: usize,
    pub discard_stale: bool,
    last_id: RequestId,
}

impl Default for UserSearch {
    fn default() -> Self {
        Self::new(DEFAULT_SUGGESTION_LIMIT, false)
    }
}

impl UserSearch {
    pub fn new(suggestion_limit: usize, discard_stale: bool) -> Self {
        Self {
            raw_query: String::new(),
            settled_query: String::new(),
            results: Vec::new(),
            suggestions: Vec::new(),
            loading: false,
            selected: 0,
            suggestion_limit,
            discard_stale,
            last_id: 0,
        }
    }

    pub fn last_request_id(&self) -> RequestId {
        self.last_id
    }

    pub fn handle(&mut self, event: SearchEvent) -> Option<SearchCommand> {
        match event {
            SearchEvent::Keystroke(text) => {
                self.raw_query = text.clone();
                Some(SearchCommand::Debounce(text))
            }
            SearchEvent::Settled(text) => {
                self.settled_query = text;
                if self.settled_query.is_empty() {
                    return None;
                }
                self.last_id += 1;
                self.loading = true;
                debug!(id = self.last_id, query = %self.settled_query, "user search issued");
                Some(SearchCommand::Fetch {
                    id: self.last_id,
                    query: self.settled_query.clone(),
                })
            }
            SearchEvent::Loaded { id, items } => {
                if self.is_stale(id) {
                    return None;
                }
                debug!(id, count = items.len(), "user search loaded");
                self.suggestions = items.iter().take(self.suggestion_limit).cloned().collect();
                self.results = items;
                self.finish();
                None
            }
            SearchEvent::Failed { id } => {
                if self.is_stale(id) {
                    return None;
                }
                warn!(id, "user search failed; clearing results");
                self.results.clear();
                self.suggestions.clear();
                self.finish();
                None
            }
        }
    }

    fn is_stale(&self, id: RequestId) -> bool {
        let stale = self.discard_stale && id != self.last_id;
        if stale {
            debug!(id, latest = self.last_id, "stale search response dropped");
        }
        stale
    }

    fn finish(&mut self) {
        self.loading = false;
        self.selected = 0;
    }

    pub fn selected(&self) -> Option<&UserSummary> {
        self.results.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.results.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users(n: usize) -> Vec<UserSummary> {
        (0..n)
            .map(|i| UserSummary {
                id: i as u64,
                login: format!("user{i}"),
                avatar_url: format!("https://avatars.example/{i}"),
                html_url: format!("https://github.com/user{i}"),
            })
            .collect()
    }

    #[test]
    fn keystroke_updates_raw_query_and_requests_debounce() {
        let mut search = UserSearch::default();
        let cmd = search.handle(SearchEvent::Keystroke("oct".into()));
        assert_eq!(search.raw_query, "oct");
        assert_eq!(search.settled_query, "");
        assert_eq!(cmd, Some(SearchCommand::Debounce("oct".into())));
    }

    #[test]
    fn empty_settle_issues_no_request() {
        let mut search = UserSearch::default();
        assert_eq!(search.handle(SearchEvent::Settled(String::new())), None);
        assert!(!search.loading);
        assert_eq!(search.last_request_id(), 0);
    }

    #[test]
    fn repeated_settle_reissues() {
        let mut search = UserSearch::default();
        let a = search.handle(SearchEvent::Settled("rust".into()));
        let b = search.handle(SearchEvent::Settled("rust".into()));
        assert_eq!(a, Some(SearchCommand::Fetch { id: 1, query: "rust".into() }));
        assert_eq!(b, Some(SearchCommand::Fetch { id: 2, query: "rust".into() }));
    }

    #[test]
    fn suggestions_are_first_five_in_order() {
        let mut search = UserSearch::default();
        search.handle(SearchEvent::Settled("user".into()));
        search.handle(SearchEvent::Loaded { id: 1, items: users(8) });
        assert_eq!(search.results.len(), 8);
        assert_eq!(search.suggestions, users(8)[..5].to_vec());
        assert!(!search.loading);
    }

    #[test]
    fn suggestions_equal_results_below_limit() {
        let mut search = UserSearch::default();
        search.handle(SearchEvent::Settled("user".into()));
        search.handle(SearchEvent::Loaded { id: 1, items: users(3) });
        assert_eq!(search.suggestions, search.results);
    }

    #[test]
    fn failure_clears_both_views() {
        let mut search = UserSearch::default();
        search.handle(SearchEvent::Settled("user".into()));
        search.handle(SearchEvent::Loaded { id: 1, items: users(7) });
        search.handle(SearchEvent::Settled("userx".into()));
        search.handle(SearchEvent::Failed { id: 2 });
        assert!(search.results.is_empty());
        assert!(search.suggestions.is_empty());
        assert!(!search.loading);
    }

    #[test]
    fn stale_results_dropped_only_when_enabled() {
        let mut racy = UserSearch::default();
        racy.handle(SearchEvent::Settled("a".into()));
        racy.handle(SearchEvent::Settled("ab".into()));
        racy.handle(SearchEvent::Loaded { id: 2, items: users(2) });
        racy.handle(SearchEvent::Loaded { id: 1, items: users(6) });
        assert_eq!(racy.results.len(), 6);

        let mut strict = UserSearch::new(DEFAULT_SUGGESTION_LIMIT, true);
        strict.handle(SearchEvent::Settled("a".into()));
        strict.handle(SearchEvent::Settled("ab".into()));
        strict.handle(SearchEvent::Loaded { id: 2, items: users(2) });
        strict.handle(SearchEvent::Loaded { id: 1, items: users(6) });
        assert_eq!(strict.results.len(), 2);
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut search = UserSearch::default();
        search.select_next();
        assert_eq!(search.selected, 0);
        assert!(search.selected().is_none());
        search.handle(SearchEvent::Settled("u".into()));
        search.handle(SearchEvent::Loaded { id: 1, items: users(2) });
        search.select_next();
        search.select_next();
        assert_eq!(search.selected().map(|u| u.login.as_str()), Some("user1"));
        search.select_previous();
        search.select_previous();
        assert_eq!(search.selected, 0);
    }
}
