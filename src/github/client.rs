use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Url};
use std::future::Future;

use super::{FetchError, LookupResponse, SearchResponse, UserDirectory, UserSummary};
use crate::error::{Context, Result, simple_error};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Unauthenticated GitHub REST client.
#[derive(Clone, Debug)]
pub struct GitHubClient {
    http: Client,
    base: Url,
}

impl GitHubClient {
    /// Build a client rooted at `base` (e.g. `https://api.github.com`).
    pub fn new(base: &str) -> Result<Self> {
        let base = Url::parse(base).with_ctx(|| format!("parse API base {base:?}"))?;
        if base.cannot_be_a_base() {
            return Err(simple_error(format!("API base {base} cannot hold a path")));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("ghfinder/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .with_ctx(|| "build HTTP client".to_string())?;

        Ok(Self { http, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `{base}/users/{username}`, with the username encoded as one path segment.
    pub fn user_url(&self, username: &str) -> Url {
        self.endpoint(&["users", username])
    }

    pub fn search_url(&self) -> Url {
        self.endpoint(&["search", "users"])
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // cannot fail: `new` rejects cannot-be-a-base URLs
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

impl UserDirectory for GitHubClient {
    fn fetch_user(
        &self,
        username: &str,
    ) -> impl Future<Output = std::result::Result<LookupResponse, FetchError>> + Send {
        let request = self.http.get(self.user_url(username));
        async move {
            // The status is not checked: a 404 carries the "Not Found" marker in its body.
            let response = request.send().await?;
            let body = response.text().await?;
            super::parse_lookup_body(&body)
        }
    }

    fn search_users(
        &self,
        query: &str,
    ) -> impl Future<Output = std::result::Result<Vec<UserSummary>, FetchError>> + Send {
        let request = self.http.get(self.search_url()).query(&[("q", query)]);
        async move {
            let response = request.send().await?.error_for_status()?;
            let search: SearchResponse = response.json().await?;
            Ok(search.items)
        }
    }
}
