//! Common test utilities for integration tests.
//!
//! Provides a mock trivia API served by axum on a random local port, so the
//! real reqwest transport can be exercised without network access.

#![allow(dead_code)]

pub mod fixtures;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    routing::get,
    Router,
};
use tokio::net::TcpListener;

use trivia_client::fetcher::{HttpTransport, QuestionFetcher};

struct MockState {
    status: StatusCode,
    body: String,
    delay: Duration,
    queries: Mutex<Vec<String>>,
}

/// Local stand-in for the trivia API serving one canned response.
pub struct MockApi {
    pub url: String,
    state: Arc<MockState>,
}

impl MockApi {
    /// Serve `body` with status 200.
    pub async fn start(body: impl Into<String>) -> Self {
        Self::start_with(StatusCode::OK, body, Duration::ZERO).await
    }

    /// Serve `body` with `status`, waiting `delay` before each response.
    pub async fn start_with(status: StatusCode, body: impl Into<String>, delay: Duration) -> Self {
        let state = Arc::new(MockState {
            status,
            body: body.into(),
            delay,
            queries: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/api.php", get(serve_questions))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock API");
        let addr = listener.local_addr().expect("Mock API has no address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock API failed");
        });

        Self {
            url: format!("http://{}/api.php", addr),
            state,
        }
    }

    /// Query strings received so far, in order.
    pub fn queries(&self) -> Vec<String> {
        self.state.queries.lock().unwrap().clone()
    }

    /// Fetcher talking to this mock through the real HTTP transport.
    pub fn fetcher(&self) -> QuestionFetcher {
        fetcher_for(&self.url, Duration::from_secs(5))
    }
}

pub fn fetcher_for(url: &str, timeout: Duration) -> QuestionFetcher {
    let transport = HttpTransport::new(timeout).expect("Failed to build HTTP client");
    QuestionFetcher::new(Arc::new(transport), url)
}

/// URL of a local port with nothing listening on it.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api.php", addr)
}

async fn serve_questions(
    State(state): State<Arc<MockState>>,
    RawQuery(query): RawQuery,
) -> (StatusCode, String) {
    state.queries.lock().unwrap().push(query.unwrap_or_default());
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    (state.status, state.body.clone())
}
