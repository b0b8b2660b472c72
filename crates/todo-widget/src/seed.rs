//! Remote feed used once to populate an empty task list.

use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::Client;

use crate::error::SeedError;
use crate::task::Task;

pub const DEFAULT_SEED_URL: &str = "https://jsonplaceholder.typicode.com";
pub const DEFAULT_SEED_LIMIT: usize = 5;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub trait SeedSource: Send + Sync {
    /// Fetches at most `limit` task-shaped records.
    fn fetch(&self, limit: usize) -> BoxFuture<'_, Result<Vec<Task>, SeedError>>;
}

// =============================================================================
// PlaceholderSeedSource
// =============================================================================

/// Reads `{base_url}/todos?_limit={limit}` from a JSONPlaceholder-style API.
#[derive(Debug, Clone)]
pub struct PlaceholderSeedSource {
    client: Client,
    base_url: String,
}

impl PlaceholderSeedSource {
    /// # Errors
    ///
    /// Returns [`SeedError::Request`] when the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, SeedError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(client, base_url))
    }

    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn endpoint(&self, limit: usize) -> String {
        format!("{}/todos?_limit={limit}", self.base_url)
    }
}

impl SeedSource for PlaceholderSeedSource {
    fn fetch(&self, limit: usize) -> BoxFuture<'_, Result<Vec<Task>, SeedError>> {
        Box::pin(async move {
            let url = self.endpoint(limit);
            tracing::debug!(%url, "Fetching seed tasks");

            let mut tasks: Vec<Task> = self
                .client
                .get(&url)
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;

            // The limit is a query hint; not every server honours it.
            tasks.truncate(limit);
            Ok(tasks)
        })
    }
}

// =============================================================================
// StaticSeedSource
// =============================================================================

/// Fixed in-process feed, for offline use and tests.
#[derive(Debug, Clone)]
pub struct StaticSeedSource {
    outcome: Result<Vec<Task>, String>,
}

impl StaticSeedSource {
    #[must_use]
    pub const fn new(tasks: Vec<Task>) -> Self {
        Self { outcome: Ok(tasks) }
    }

    /// A feed whose every fetch fails with `message`.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
        }
    }
}

impl SeedSource for StaticSeedSource {
    fn fetch(&self, limit: usize) -> BoxFuture<'_, Result<Vec<Task>, SeedError>> {
        let outcome = match &self.outcome {
            Ok(tasks) => Ok(tasks.iter().take(limit).cloned().collect()),
            Err(message) => Err(SeedError::Unavailable(message.clone())),
        };
        Box::pin(async move { outcome })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskId;
    use rstest::rstest;

    fn tasks(count: i64) -> Vec<Task> {
        (1..=count)
            .map(|id| Task::new(TaskId::new(id), format!("task {id}")))
            .collect()
    }

    #[rstest]
    #[case("https://jsonplaceholder.typicode.com", 5, "https://jsonplaceholder.typicode.com/todos?_limit=5")]
    #[case("http://localhost:3000/", 2, "http://localhost:3000/todos?_limit=2")]
    fn endpoint_includes_limit(#[case] base: &str, #[case] limit: usize, #[case] expected: &str) {
        let source = PlaceholderSeedSource::with_client(Client::new(), base);

        assert_eq!(source.endpoint(limit), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn static_source_truncates() {
        let source = StaticSeedSource::new(tasks(8));

        let fetched = source.fetch(DEFAULT_SEED_LIMIT).await.unwrap();

        assert_eq!(fetched.len(), 5);
        assert_eq!(fetched[0].id, TaskId::new(1));
    }

    #[rstest]
    #[tokio::test]
    async fn failing_source_reports_unavailable() {
        let error = StaticSeedSource::failing("offline").fetch(5).await.unwrap_err();

        assert!(matches!(error, SeedError::Unavailable(message) if message == "offline"));
    }

    mod placeholder {
        use super::*;
        use std::collections::HashMap;
        use std::sync::{Arc, Mutex};

        use axum::extract::Query;
        use axum::http::StatusCode;
        use axum::routing::get;
        use axum::{Json, Router};
        use serde_json::{Value, json};

        /// Serves `router` on an ephemeral local port and returns its base URL.
        async fn serve(router: Router) -> String {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let address = listener.local_addr().unwrap();
            tokio::spawn(async move {
                axum::serve(listener, router).await.unwrap();
            });
            format!("http://{address}")
        }

        fn local_source(base_url: String) -> PlaceholderSeedSource {
            let client = Client::builder().no_proxy().build().unwrap();
            PlaceholderSeedSource::with_client(client, base_url)
        }

        /// Eight feed items, returned whatever `_limit` says.
        fn feed() -> Value {
            Value::Array(
                (1..=8)
                    .map(|id| {
                        json!({
                            "userId": 1,
                            "id": id,
                            "title": format!("feed item {id}"),
                            "completed": id % 3 == 0
                        })
                    })
                    .collect(),
            )
        }

        #[rstest]
        #[tokio::test]
        async fn decodes_feed_and_truncates_to_limit() {
            let seen_limit = Arc::new(Mutex::new(None));
            let recorder = Arc::clone(&seen_limit);
            let router = Router::new().route(
                "/todos",
                get(move |Query(params): Query<HashMap<String, String>>| {
                    let recorder = Arc::clone(&recorder);
                    async move {
                        *recorder.lock().unwrap() = params.get("_limit").cloned();
                        Json(feed())
                    }
                }),
            );
            let source = local_source(serve(router).await);

            let fetched = source.fetch(5).await.unwrap();

            assert_eq!(seen_limit.lock().unwrap().as_deref(), Some("5"));
            assert_eq!(fetched.len(), 5);
            assert_eq!(fetched[0].id, TaskId::new(1));
            assert_eq!(fetched[0].title, "feed item 1");
            assert_eq!(fetched[0].user_id, Some(1));
            assert!(fetched[2].completed);
            assert!(!fetched[4].completed);
        }

        #[rstest]
        #[tokio::test]
        async fn server_error_is_a_request_error() {
            let router = Router::new().route(
                "/todos",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "feed down") }),
            );
            let source = local_source(serve(router).await);

            let error = source.fetch(5).await.unwrap_err();

            assert!(matches!(
                &error,
                SeedError::Request(inner) if inner.status() == Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR)
            ));
        }

        #[rstest]
        #[tokio::test]
        async fn non_task_body_is_a_request_error() {
            let router = Router::new().route("/todos", get(|| async { Json(json!({ "oops": true })) }));
            let source = local_source(serve(router).await);

            let error = source.fetch(5).await.unwrap_err();

            assert!(matches!(error, SeedError::Request(_)));
        }
    }

    #[rstest]
    #[tokio::test]
    async fn unreachable_server_is_a_request_error() {
        let source = PlaceholderSeedSource::new("http://127.0.0.1:9").unwrap();

        let error = source.fetch(5).await.unwrap_err();

        assert!(matches!(error, SeedError::Request(_)));
    }
}
