//! Profile lookup flow: one username in, one profile or one error out.
//!
//! [`ProfileLookup`] is a plain state holder. [`ProfileLookup::begin`] and
//! [`ProfileLookup::resolve`] are the two transitions; the event loop spawns
//! the request in between. [`ProfileLookup::search`] runs both against a
//! [`UserDirectory`] for callers that can simply await.
//!
use tracing::{debug, warn};

use crate::github::{FetchError, LookupResponse, UserDirectory, UserProfile};

pub const USER_NOT_FOUND: &str = "User not found";
pub const FETCH_FAILED: &str = "Failed to fetch user data";

/// Tag attached to every issued request of a flow.
pub type RequestId = u64;

/// Lifecycle of the latest request of a flow.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RequestState<T> {
    #[default]
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> RequestState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            RequestState::Success(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

/// A lookup the caller must perform and report back through `resolve`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupRequest {
    pub id: RequestId,
    pub username: String,
}

#[derive(Clone, Debug, Default)]
pub struct ProfileLookup {
    /// Text currently in the username input.
    pub query: String,
    pub state: RequestState<UserProfile>,
    /// Ignore resolutions that do not belong to the latest request.
    pub discard_stale: bool,
    last_id: RequestId,
}

impl ProfileLookup {
    pub fn new(discard_stale: bool) -> Self {
        Self {
            discard_stale,
            ..Self::default()
        }
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.state.success()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    /// Id of the most recently issued request, 0 before the first one.
    pub fn last_request_id(&self) -> RequestId {
        self.last_id
    }

    /// Start a lookup. Empty input leaves everything untouched and returns `None`.
    pub fn begin(&mut self, username: &str) -> Option<LookupRequest> {
        if username.is_empty() {
            return None;
        }
        self.last_id += 1;
        self.state = RequestState::Loading;
        debug!(id = self.last_id, username, "profile lookup issued");
        Some(LookupRequest {
            id: self.last_id,
            username: username.to_string(),
        })
    }

    /// Start a lookup for the current input text.
    pub fn submit(&mut self) -> Option<LookupRequest> {
        let username = self.query.clone();
        self.begin(&username)
    }

    /// Finish request `id`. Always leaves `Loading` unless the response is stale
    /// and stale responses are being discarded.
    pub fn resolve(&mut self, id: RequestId, outcome: Result<LookupResponse, FetchError>) {
        if self.discard_stale && id != self.last_id {
            debug!(id, latest = self.last_id, "stale profile response dropped");
            return;
        }
        self.state = match outcome {
            Ok(LookupResponse::Found(profile)) => {
                debug!(id, login = %profile.login, "profile loaded");
                RequestState::Success(profile)
            }
            Ok(LookupResponse::NotFound) => {
                debug!(id, "profile not found");
                RequestState::Error(USER_NOT_FOUND.to_string())
            }
            Err(e) => {
                warn!(id, error = %e, "profile lookup failed");
                RequestState::Error(FETCH_FAILED.to_string())
            }
        };
    }

    /// Run a complete lookup against `api`.
    pub async fn search<A: UserDirectory>(&mut self, api: &A, username: &str) {
        let Some(request) = self.begin(username) else {
            return;
        };
        let outcome = api.fetch_user(&request.username).await;
        self.resolve(request.id, outcome);
    }
}
