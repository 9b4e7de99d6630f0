// Integration tests for ghfinder
// Both flows are driven end to end through the public API with an in-memory GitHub.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ghfinder::app::update::{Dispatcher, handle_key};
use ghfinder::app::{ActiveTab, AppState};
use ghfinder::github::{FetchError, LookupResponse, UserDirectory, UserProfile, UserSummary};
use ghfinder::lookup::{FETCH_FAILED, ProfileLookup, RequestState, USER_NOT_FOUND};
use tokio::runtime::Handle;
use tokio::time::sleep;

#[derive(Clone, Debug)]
enum Reply {
    Found(UserProfile),
    NotFound,
    Fail,
}

#[derive(Clone, Default)]
struct FakeGitHub {
    calls: Arc<Mutex<Vec<String>>>,
    users: Arc<HashMap<String, Reply>>,
    failing_queries: Arc<Vec<String>>,
    delay: Duration,
}

impl FakeGitHub {
    fn with_users(users: Vec<(&str, Reply)>) -> Self {
        Self {
            users: Arc::new(users.into_iter().map(|(k, v)| (k.to_string(), v)).collect()),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl UserDirectory for FakeGitHub {
    fn fetch_user(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<LookupResponse, FetchError>> + Send {
        self.calls.lock().unwrap().push(format!("user:{username}"));
        let reply = self.users.get(username).cloned().unwrap_or(Reply::NotFound);
        let delay = self.delay;
        async move {
            if !delay.is_zero() {
                sleep(delay).await;
            }
            match reply {
                Reply::Found(p) => Ok(LookupResponse::Found(p)),
                Reply::NotFound => Ok(LookupResponse::NotFound),
                Reply::Fail => Err(FetchError::Transport("connection reset".into())),
            }
        }
    }

    fn search_users(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<UserSummary>, FetchError>> + Send {
        self.calls.lock().unwrap().push(format!("search:{query}"));
        let fail = self.failing_queries.iter().any(|q| q == query);
        let items = summaries(query, 8);
        let delay = self.delay;
        async move {
            if !delay.is_zero() {
                sleep(delay).await;
            }
            if fail { Err(FetchError::Status(503)) } else { Ok(items) }
        }
    }
}

fn profile(login: &str, followers: u64, public_repos: u64) -> UserProfile {
    UserProfile {
        login: login.to_string(),
        name: Some(format!("{login} name")),
        avatar_url: format!("https://avatars.example/{login}"),
        bio: None,
        followers,
        following: 3,
        public_repos,
        html_url: format!("https://github.com/{login}"),
    }
}

fn summaries(prefix: &str, n: usize) -> Vec<UserSummary> {
    (0..n)
        .map(|i| UserSummary {
            id: i as u64 + 1,
            login: format!("{prefix}{i}"),
            avatar_url: format!("https://avatars.example/{prefix}{i}"),
            html_url: format!("https://github.com/{prefix}{i}"),
        })
        .collect()
}

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn search_tab_app() -> AppState {
    let mut app = AppState::default();
    app.active_tab = ActiveTab::Search;
    app
}

// 1) Profile lookup through the async `search` operation
#[tokio::test]
async fn empty_username_makes_no_call_and_keeps_state() {
    let api = FakeGitHub::default();
    let mut lookup = ProfileLookup::default();
    lookup.state = RequestState::Error(USER_NOT_FOUND.to_string());

    lookup.search(&api, "").await;

    assert!(api.calls().is_empty());
    assert_eq!(lookup.error(), Some(USER_NOT_FOUND));
}

#[tokio::test]
async fn lookup_outcomes_replace_previous_state() {
    let api = FakeGitHub::with_users(vec![
        ("octocat", Reply::Found(profile("octocat", 101, 33))),
        ("broken", Reply::Fail),
    ]);
    let mut lookup = ProfileLookup::default();

    lookup.search(&api, "octocat").await;
    let found = lookup.profile().expect("profile loaded");
    assert_eq!(found.stars(), 67);
    assert_eq!(found.bio_or_placeholder(), "No bio available");
    assert!(!lookup.is_loading());

    lookup.search(&api, "ghost-user").await;
    assert_eq!(lookup.error(), Some(USER_NOT_FOUND));
    assert!(lookup.profile().is_none());
    assert!(!lookup.is_loading());

    lookup.search(&api, "broken").await;
    assert_eq!(lookup.error(), Some(FETCH_FAILED));
    assert!(lookup.profile().is_none());
    assert!(!lookup.is_loading());

    assert_eq!(api.calls(), vec!["user:octocat", "user:ghost-user", "user:broken"]);
}

// 2) Loading is visible for the whole request, on success and failure alike
#[tokio::test(start_paused = true)]
async fn loading_spans_request_on_every_path() {
    for (username, expect_error) in [("octocat", None), ("broken", Some(FETCH_FAILED)), ("nobody", Some(USER_NOT_FOUND))] {
        let mut api = FakeGitHub::with_users(vec![
            ("octocat", Reply::Found(profile("octocat", 1, 1))),
            ("broken", Reply::Fail),
        ]);
        api.delay = Duration::from_secs(1);
        let mut app = AppState::default();
        let mut dispatcher = Dispatcher::new(Handle::current(), api.clone(), Duration::from_millis(500));

        for c in username.chars() {
            assert!(handle_key(&mut app, press(KeyCode::Char(c))).is_none());
        }
        assert!(!app.lookup.is_loading());
        let effect = handle_key(&mut app, press(KeyCode::Enter)).expect("lookup issued");
        assert!(app.lookup.is_loading());
        dispatcher.dispatch(effect);

        sleep(Duration::from_millis(900)).await;
        assert_eq!(dispatcher.pump(&mut app), 0);
        assert!(app.lookup.is_loading());

        sleep(Duration::from_millis(200)).await;
        assert_eq!(dispatcher.pump(&mut app), 1);
        assert!(!app.lookup.is_loading());
        assert_eq!(app.lookup.error(), expect_error);
        assert_eq!(api.calls(), vec![format!("user:{username}")]);
    }
}

// 3) Debounced search: rapid typing yields one request for the final text
#[tokio::test(start_paused = true)]
async fn rapid_typing_issues_exactly_one_search() {
    let api = FakeGitHub::default();
    let mut app = search_tab_app();
    let mut dispatcher = Dispatcher::new(Handle::current(), api.clone(), Duration::from_millis(500));

    for c in "test".chars() {
        let effect = handle_key(&mut app, press(KeyCode::Char(c))).expect("debounce requested");
        dispatcher.dispatch(effect);
        sleep(Duration::from_millis(100)).await;
        dispatcher.pump(&mut app);
        assert_eq!(app.search.settled_query, "");
    }
    assert_eq!(app.search.raw_query, "test");
    assert!(api.calls().is_empty());

    sleep(Duration::from_millis(500)).await;
    dispatcher.pump(&mut app);
    assert_eq!(app.search.settled_query, "test");
    assert!(app.search.loading);

    sleep(Duration::from_millis(10)).await;
    dispatcher.pump(&mut app);
    assert_eq!(api.calls(), vec!["search:test"]);
    assert_eq!(app.search.results.len(), 8);
    assert_eq!(app.search.suggestions, app.search.results[..5].to_vec());
    assert!(!app.search.loading);
}

#[tokio::test(start_paused = true)]
async fn clearing_the_input_issues_no_request() {
    let api = FakeGitHub::default();
    let mut app = search_tab_app();
    let mut dispatcher = Dispatcher::new(Handle::current(), api.clone(), Duration::from_millis(500));

    for code in [KeyCode::Char('a'), KeyCode::Backspace] {
        let effect = handle_key(&mut app, press(code)).expect("debounce requested");
        dispatcher.dispatch(effect);
    }
    sleep(Duration::from_secs(1)).await;
    dispatcher.pump(&mut app);

    assert_eq!(app.search.raw_query, "");
    assert!(api.calls().is_empty());
}

// 4) A failed search empties both views even after a success
#[tokio::test(start_paused = true)]
async fn failed_search_clears_previous_results() {
    let api = FakeGitHub {
        failing_queries: Arc::new(vec!["ab".to_string()]),
        ..FakeGitHub::default()
    };
    let mut app = search_tab_app();
    let mut dispatcher = Dispatcher::new(Handle::current(), api.clone(), Duration::from_millis(500));

    for c in ['a', 'b'] {
        let effect = handle_key(&mut app, press(KeyCode::Char(c))).expect("debounce requested");
        dispatcher.dispatch(effect);
        sleep(Duration::from_millis(600)).await;
        dispatcher.pump(&mut app);
        sleep(Duration::from_millis(10)).await;
        dispatcher.pump(&mut app);
        if c == 'a' {
            assert_eq!(app.search.results.len(), 8);
            assert_eq!(app.search.suggestions.len(), 5);
        }
    }

    assert_eq!(api.calls(), vec!["search:a", "search:ab"]);
    assert!(app.search.results.is_empty());
    assert!(app.search.suggestions.is_empty());
    assert_eq!(app.lookup.error(), None);
}

// 5) Opening a search result looks the user up on the profile tab
#[tokio::test(start_paused = true)]
async fn selecting_a_result_opens_its_profile() {
    let api = FakeGitHub::with_users(vec![("oct1", Reply::Found(profile("oct1", 10, 4)))]);
    let mut app = search_tab_app();
    let mut dispatcher = Dispatcher::new(Handle::current(), api.clone(), Duration::from_millis(500));

    for c in "oct".chars() {
        let effect = handle_key(&mut app, press(KeyCode::Char(c))).expect("debounce requested");
        dispatcher.dispatch(effect);
    }
    sleep(Duration::from_millis(600)).await;
    dispatcher.pump(&mut app);
    sleep(Duration::from_millis(10)).await;
    dispatcher.pump(&mut app);

    // leave the input, move to the second row, open it
    assert!(handle_key(&mut app, press(KeyCode::Enter)).is_none());
    assert!(handle_key(&mut app, press(KeyCode::Down)).is_none());
    let effect = handle_key(&mut app, press(KeyCode::Enter)).expect("lookup issued");
    assert_eq!(app.active_tab, ActiveTab::Profile);
    assert_eq!(app.lookup.query, "oct1");
    dispatcher.dispatch(effect);

    sleep(Duration::from_millis(10)).await;
    dispatcher.pump(&mut app);
    assert_eq!(app.lookup.profile().map(|p| p.stars()), Some(7));
    assert_eq!(api.calls(), vec!["search:oct", "user:oct1"]);
}
