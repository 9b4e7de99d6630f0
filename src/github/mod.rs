//! GitHub REST API types and the HTTP client used by both flows.
//!
//! Only two endpoints are used: the single-user lookup and the user search.
//! Everything the state machines need from the network goes through the
//! [`UserDirectory`] trait so they can be driven by fakes in tests.
//!
pub mod client;

use serde::Deserialize;
use std::fmt::{Display, Formatter};
use std::future::Future;

pub use client::GitHubClient;

/// Marker value GitHub puts in `message` when a user does not exist.
pub const NOT_FOUND_MESSAGE: &str = "Not Found";

/// Placeholder shown when a profile has no bio.
pub const NO_BIO: &str = "No bio available";

/// A GitHub user profile from `/users/{username}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    pub avatar_url: String,
    #[serde(default)]
    pub bio: Option<String>,
    pub followers: u64,
    pub following: u64,
    pub public_repos: u64,
    pub html_url: String,
}

impl UserProfile {
    /// Cosmetic star count shown on the profile card; not an API value.
    pub fn stars(&self) -> u64 {
        (self.followers + self.public_repos) / 2
    }

    /// Name when set, otherwise the login.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(n) if !n.trim().is_empty() => n,
            _ => &self.login,
        }
    }

    pub fn bio_or_placeholder(&self) -> &str {
        match self.bio.as_deref() {
            Some(b) if !b.trim().is_empty() => b,
            _ => NO_BIO,
        }
    }
}

/// A single user item from `/search/users`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct UserSummary {
    pub id: u64,
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
}

/// Response envelope of the search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub items: Vec<UserSummary>,
}

/// Outcome of a user lookup that reached GitHub and returned a readable body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LookupResponse {
    Found(UserProfile),
    NotFound,
}

/// Failure to obtain a usable response.
#[derive(Debug)]
pub enum FetchError {
    /// Connection, TLS, timeout or body read failure.
    Transport(String),
    /// Non-success HTTP status where the body is not otherwise meaningful.
    Status(u16),
    /// Body was not JSON or did not have the expected shape.
    Decode(String),
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Transport(msg) => write!(f, "transport error: {msg}"),
            FetchError::Status(code) => write!(f, "unexpected HTTP status {code}"),
            FetchError::Decode(msg) => write!(f, "invalid response body: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

/// Interpret a lookup body: the `"Not Found"` marker wins over the status code,
/// anything else must deserialize into a [`UserProfile`].
pub fn parse_lookup_body(body: &str) -> Result<LookupResponse, FetchError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    if value.get("message").and_then(|m| m.as_str()) == Some(NOT_FOUND_MESSAGE) {
        return Ok(LookupResponse::NotFound);
    }
    let profile: UserProfile = serde_json::from_value(value)?;
    Ok(LookupResponse::Found(profile))
}

/// The external collaborator of both flows.
pub trait UserDirectory {
    fn fetch_user(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<LookupResponse, FetchError>> + Send;

    fn search_users(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<UserSummary>, FetchError>> + Send;
}
