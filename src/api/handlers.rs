use std::collections::BTreeMap;

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use super::state::AppState;
use crate::core::feed::fetcher::fetch_feed;
use crate::core::feed::pipeline::load_feed_items;

pub const PROXY_ERROR_MESSAGE: &str = "Failed to fetch RSS feed";
pub const FEED_ERROR_MESSAGE: &str = "Failed to fetch RSS feed. Please try again later.";

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

fn failure(message: &'static str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody { error: message }),
    )
        .into_response()
}

/// Passes the upstream feed through untouched; sanitization is the consumer's job.
pub async fn rss_feed(State(state): State<AppState>) -> Response {
    match fetch_feed(&state.http_client, &state.config.feed_url).await {
        Ok(fetched) => (
            StatusCode::OK,
            [(CONTENT_TYPE, "application/xml")],
            fetched.body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Error fetching RSS feed: {}", e);
            failure(PROXY_ERROR_MESSAGE)
        }
    }
}

pub async fn feed_items(State(state): State<AppState>) -> Response {
    match load_feed_items(&state.http_client, &state.config.feed_url).await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => {
            tracing::error!("Failed to load feed items: {}", e);
            failure(FEED_ERROR_MESSAGE)
        }
    }
}

pub async fn health(State(state): State<AppState>) -> Json<BTreeMap<String, String>> {
    Json(state.services.health_report())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::router::create_router;
    use crate::config::Config;
    use axum::routing::get;
    use axum::Router;

    const FIXTURE: &str = include_str!("../../fixtures/ai-news.rss.xml");

    async fn spawn(router: Router) -> (String, tokio::task::JoinHandle<()>) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("listener should bind");
        let address = listener.local_addr().expect("local addr should exist");
        let join_handle = tokio::spawn(async move {
            axum::serve(listener, router).await.expect("server should run");
        });
        (format!("http://{address}"), join_handle)
    }

    async fn spawn_upstream() -> (String, tokio::task::JoinHandle<()>) {
        let upstream = Router::new()
            .route(
                "/feed",
                get(|| async { ([(CONTENT_TYPE, "application/rss+xml")], FIXTURE) }),
            )
            .route(
                "/down",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            )
            .route("/garbage", get(|| async { "<rss><item>" }));
        spawn(upstream).await
    }

    async fn spawn_app(feed_url: String) -> (String, tokio::task::JoinHandle<()>) {
        let config = Config {
            feed_url,
            ..Config::default()
        };
        let state = AppState::with_client(config, reqwest::Client::new());
        spawn(create_router(state)).await
    }

    #[tokio::test]
    async fn rss_feed_proxies_upstream_bytes() {
        let (upstream, upstream_task) = spawn_upstream().await;
        let (app, app_task) = spawn_app(format!("{upstream}/feed")).await;

        let response = reqwest::get(format!("{app}/api/rss-feed"))
            .await
            .expect("request should succeed");
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("application/xml")
        );
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .and_then(|value| value.to_str().ok()),
            Some("*")
        );
        let body = response.text().await.expect("body should read");
        assert_eq!(body, FIXTURE);

        app_task.abort();
        upstream_task.abort();
    }

    #[tokio::test]
    async fn rss_feed_maps_upstream_failure_to_500() {
        let (upstream, upstream_task) = spawn_upstream().await;
        let (app, app_task) = spawn_app(format!("{upstream}/down")).await;

        let response = reqwest::get(format!("{app}/api/rss-feed"))
            .await
            .expect("request should succeed");
        assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = response.json().await.expect("body should be json");
        assert_eq!(body, serde_json::json!({ "error": PROXY_ERROR_MESSAGE }));

        app_task.abort();
        upstream_task.abort();
    }

    #[tokio::test]
    async fn feed_items_returns_sanitized_items() {
        let (upstream, upstream_task) = spawn_upstream().await;
        let (app, app_task) = spawn_app(format!("{upstream}/feed")).await;

        let response = reqwest::get(format!("{app}/api/feed-items"))
            .await
            .expect("request should succeed");
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let items: serde_json::Value = response.json().await.expect("body should be json");
        let items = items.as_array().expect("items should be an array");

        assert_eq!(items.len(), 3);
        assert_eq!(items[0]["metadata"]["author"], "Jordan Lee");
        assert_eq!(items[0]["displayDate"], "September 8, 2025");
        let content = items[1]["content"].as_str().expect("content is a string");
        assert!(!content.contains("script"));

        app_task.abort();
        upstream_task.abort();
    }

    #[tokio::test]
    async fn feed_items_treats_parse_and_fetch_failures_alike() {
        let (upstream, upstream_task) = spawn_upstream().await;
        let expected = serde_json::json!({ "error": FEED_ERROR_MESSAGE });

        for path in ["garbage", "down"] {
            let (app, app_task) = spawn_app(format!("{upstream}/{path}")).await;
            let response = reqwest::get(format!("{app}/api/feed-items"))
                .await
                .expect("request should succeed");
            assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
            let body: serde_json::Value = response.json().await.expect("body should be json");
            assert_eq!(body, expected);
            app_task.abort();
        }

        upstream_task.abort();
    }

    #[tokio::test]
    async fn health_reports_services() {
        let (app, app_task) = spawn_app("http://127.0.0.1:9/feed".to_string()).await;

        let report: BTreeMap<String, String> = reqwest::get(format!("{app}/api/health"))
            .await
            .expect("request should succeed")
            .json()
            .await
            .expect("body should be json");
        assert_eq!(report.get("feed").map(String::as_str), Some("ready"));
        assert_eq!(report.get("content").map(String::as_str), Some("ready"));

        app_task.abort();
    }

    #[tokio::test]
    async fn health_reports_a_misconfigured_feed_url() {
        let (app, app_task) = spawn_app("ai.asu.edu/feed".to_string()).await;

        let report: BTreeMap<String, String> = reqwest::get(format!("{app}/api/health"))
            .await
            .expect("request should succeed")
            .json()
            .await
            .expect("body should be json");
        assert_eq!(report.get("feed").map(String::as_str), Some("misconfigured"));

        app_task.abort();
    }
}
