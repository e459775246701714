//! In-process stand-in for the GitHub search and languages endpoints.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;

use repostats::github::GitHubClient;

/// How the fake languages endpoint answers for one repository.
#[derive(Debug, Clone)]
pub enum LanguagesReply {
    Ok(BTreeMap<String, u64>),
    ServerError,
    Malformed,
}

#[derive(Debug, Clone)]
pub struct FakeRepo {
    pub full_name: String,
    pub reply: LanguagesReply,
    pub delay: Duration,
}

impl FakeRepo {
    pub fn new(full_name: &str, languages: &[(&str, u64)]) -> Self {
        Self {
            full_name: full_name.to_string(),
            reply: LanguagesReply::Ok(
                languages
                    .iter()
                    .map(|(name, bytes)| (name.to_string(), *bytes))
                    .collect(),
            ),
            delay: Duration::ZERO,
        }
    }

    pub fn failing(full_name: &str) -> Self {
        Self {
            full_name: full_name.to_string(),
            reply: LanguagesReply::ServerError,
            delay: Duration::ZERO,
        }
    }

    pub fn malformed(full_name: &str) -> Self {
        Self {
            full_name: full_name.to_string(),
            reply: LanguagesReply::Malformed,
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Clone)]
struct FakeState {
    base_url: String,
    repos: Arc<Vec<FakeRepo>>,
    search_fails: bool,
    language_calls: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    peak_in_flight: Arc<AtomicUsize>,
    search_queries: Arc<Mutex<Vec<String>>>,
}

/// Handle to a running fake server.
pub struct FakeGitHub {
    pub base_url: String,
    language_calls: Arc<AtomicUsize>,
    peak_in_flight: Arc<AtomicUsize>,
    search_queries: Arc<Mutex<Vec<String>>>,
}

impl FakeGitHub {
    pub async fn start(repos: Vec<FakeRepo>) -> Self {
        Self::start_with(repos, false).await
    }

    /// A server whose search endpoint always answers 500.
    pub async fn start_broken_search() -> Self {
        Self::start_with(Vec::new(), true).await
    }

    async fn start_with(repos: Vec<FakeRepo>, search_fails: bool) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let state = FakeState {
            base_url: base_url.clone(),
            repos: Arc::new(repos),
            search_fails,
            language_calls: Arc::new(AtomicUsize::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak_in_flight: Arc::new(AtomicUsize::new(0)),
            search_queries: Arc::new(Mutex::new(Vec::new())),
        };
        let handle = Self {
            base_url,
            language_calls: state.language_calls.clone(),
            peak_in_flight: state.peak_in_flight.clone(),
            search_queries: state.search_queries.clone(),
        };

        let app = Router::new()
            .route("/search/repositories", get(search))
            .route("/repos/:owner/:name/languages", get(languages))
            .with_state(state);
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        handle
    }

    pub fn client(&self) -> Arc<GitHubClient> {
        Arc::new(GitHubClient::new("test-token", &self.base_url, Duration::from_secs(5)).unwrap())
    }

    /// Number of requests the languages endpoint has served.
    pub fn language_calls(&self) -> usize {
        self.language_calls.load(Ordering::SeqCst)
    }

    /// Most languages requests the fake was serving at the same moment.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    /// Raw query strings received by the search endpoint.
    pub fn search_queries(&self) -> Vec<String> {
        self.search_queries.lock().unwrap().clone()
    }
}

async fn search(State(state): State<FakeState>, RawQuery(query): RawQuery) -> Response {
    state
        .search_queries
        .lock()
        .unwrap()
        .push(query.unwrap_or_default());

    if state.search_fails {
        return (StatusCode::INTERNAL_SERVER_ERROR, "search is down").into_response();
    }

    let items: Vec<_> = state
        .repos
        .iter()
        .enumerate()
        .map(|(i, repo)| {
            let name = repo.full_name.rsplit('/').next().unwrap();
            json!({
                "id": i + 1,
                "name": name,
                "full_name": repo.full_name,
                "git_url": format!("git://github.com/{}.git", repo.full_name),
                "html_url": format!("https://github.com/{}", repo.full_name),
                "languages_url": format!("{}/repos/{}/languages", state.base_url, repo.full_name),
                "created_at": "2024-01-01T00:00:00Z",
                "pushed_at": "2024-06-01T12:30:00Z",
                "updated_at": "2024-06-02T08:00:00Z",
                "language": null,
                "stargazers_count": 3
            })
        })
        .collect();

    Json(json!({
        "total_count": state.repos.len() * 10,
        "incomplete_results": false,
        "items": items
    }))
    .into_response()
}

async fn languages(
    State(state): State<FakeState>,
    Path((owner, name)): Path<(String, String)>,
) -> Response {
    state.language_calls.fetch_add(1, Ordering::SeqCst);

    let full_name = format!("{}/{}", owner, name);
    let Some(repo) = state.repos.iter().find(|r| r.full_name == full_name) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let current = state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    state.peak_in_flight.fetch_max(current, Ordering::SeqCst);
    if !repo.delay.is_zero() {
        tokio::time::sleep(repo.delay).await;
    }
    state.in_flight.fetch_sub(1, Ordering::SeqCst);

    match &repo.reply {
        LanguagesReply::Ok(languages) => Json(languages.clone()).into_response(),
        LanguagesReply::ServerError => {
            (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response()
        }
        LanguagesReply::Malformed => (StatusCode::OK, "{\"Rust\": ").into_response(),
    }
}
