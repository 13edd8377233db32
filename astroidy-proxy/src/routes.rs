use astroidy_common::AsteroidSummary;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::FeedError;
use crate::feed::{FeedQuery, load_feed};
use crate::state::AppState;

/// Build the proxy application
pub fn router(state: AppState, enable_cors: bool) -> Router {
    let app = Router::new()
        .route("/feed", get(feed_handler))
        // Path the single-page app calls
        .route("/api/feed", get(feed_handler))
        .route("/health", get(health_check));

    let app = if enable_cors {
        app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET]),
        )
    } else {
        app
    };

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

/// GET /feed?start_date=&end_date=&sort=
async fn feed_handler(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<AsteroidSummary>>, FeedError> {
    let query = FeedQuery::from_pairs(&params);
    let asteroids = load_feed(&state.upstream, &query).await?;
    Ok(Json(asteroids))
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProxyConfig;
    use crate::feed::flatten::tests::asteroid;
    use axum::body::Body;
    use axum::extract::RawQuery;
    use axum::http::Request;
    use axum::response::Response;
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;
    use tower::ServiceExt;

    /// In-process stand-in for the space-agency feed
    #[derive(Clone)]
    struct FakeFeed {
        seen: Arc<Mutex<Vec<String>>>,
        status: StatusCode,
        body: String,
    }

    async fn fake_feed(State(fake): State<FakeFeed>, RawQuery(query): RawQuery) -> Response {
        fake.seen.lock().unwrap().push(query.unwrap_or_default());
        (fake.status, fake.body.clone()).into_response()
    }

    async fn spawn_upstream(status: StatusCode, body: String) -> (String, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let fake = FakeFeed {
            seen: seen.clone(),
            status,
            body,
        };
        let app = Router::new()
            .route("/neo/rest/v1/feed", get(fake_feed))
            .with_state(fake);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", addr), seen)
    }

    fn proxy(upstream_host: &str, api_key: Option<&str>) -> Router {
        let mut config = ProxyConfig::default();
        config.upstream.host = upstream_host.to_string();
        config.upstream.timeout_secs = 5;
        let state = AppState::new(&config, api_key.map(str::to_string)).unwrap();
        router(state, false)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn two_day_feed() -> String {
        format!(
            r#"{{"element_count": 2, "near_earth_objects": {{
                "2024-01-01": [{}],
                "2024-01-02": [{}]
            }}}}"#,
            asteroid("1", "Bravo"),
            asteroid("2", "Alpha"),
        )
    }

    fn names(body: &Value) -> Vec<&str> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|a| a["name"].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_sorted_feed() {
        let (host, _) = spawn_upstream(StatusCode::OK, two_day_feed()).await;
        let (status, body) = get_json(
            proxy(&host, Some("KEY")),
            "/feed?start_date=2024-01-01&end_date=2024-01-02&sort=true",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(names(&body), vec!["Alpha", "Bravo"]);
    }

    #[tokio::test]
    async fn test_unsorted_feed_keeps_flattening_order() {
        let (host, _) = spawn_upstream(StatusCode::OK, two_day_feed()).await;
        for uri in [
            "/feed?start_date=2024-01-01&end_date=2024-01-02",
            "/feed?start_date=2024-01-01&end_date=2024-01-02&sort=false",
            "/feed?start_date=2024-01-01&end_date=2024-01-02&sort=TRUE",
        ] {
            let (status, body) = get_json(proxy(&host, None), uri).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(names(&body), vec!["Bravo", "Alpha"], "{uri}");
        }
    }

    #[tokio::test]
    async fn test_items_pass_through_unchanged() {
        let (host, _) = spawn_upstream(StatusCode::OK, two_day_feed()).await;
        let (_, body) = get_json(proxy(&host, None), "/api/feed").await;
        assert_eq!(body[0], asteroid("1", "Bravo"));
    }

    #[tokio::test]
    async fn test_only_allowed_params_reach_upstream() {
        let (host, seen) = spawn_upstream(StatusCode::OK, two_day_feed()).await;
        let (status, _) = get_json(
            proxy(&host, Some("SECRET")),
            "/feed?start_date=2024-01-01&end_date=2024-01-02&sort=true&detailed=true&api_key=mine",
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(
            seen[0],
            "api_key=SECRET&start_date=2024-01-01&end_date=2024-01-02"
        );
    }

    #[tokio::test]
    async fn test_empty_feed_is_empty_array() {
        let (host, _) =
            spawn_upstream(StatusCode::OK, r#"{"near_earth_objects": {}}"#.to_string()).await;
        let (status, body) = get_json(proxy(&host, None), "/feed").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_upstream_error_status_is_generic_500() {
        let (host, _) = spawn_upstream(
            StatusCode::FORBIDDEN,
            r#"{"error": {"code": "API_KEY_INVALID"}}"#.to_string(),
        )
        .await;
        let (status, body) = get_json(proxy(&host, Some("SECRET")), "/feed").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "message": "Something went wrong!" }));
    }

    #[tokio::test]
    async fn test_malformed_payload_is_generic_500() {
        for payload in ["not json", r#"{"near_earth_objects": []}"#, r#"{"other": 1}"#] {
            let (host, _) = spawn_upstream(StatusCode::OK, payload.to_string()).await;
            let (status, body) = get_json(proxy(&host, None), "/feed").await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{payload}");
            assert_eq!(body, json!({ "message": "Something went wrong!" }));
        }
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_generic_500() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let response = proxy(&format!("http://{}", addr), Some("SECRET"))
            .oneshot(Request::builder().uri("/feed").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], br#"{"message":"Something went wrong!"}"#);
    }

    #[tokio::test]
    async fn test_health() {
        let response = proxy("http://127.0.0.1:9", None)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
