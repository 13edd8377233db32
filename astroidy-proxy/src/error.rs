use astroidy_common::ErrorBody;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Everything that can go wrong while serving `/feed`.
///
/// All variants collapse into the same generic 500 for the client; the
/// detail only ever reaches the server log.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Upstream request failed: {0}")]
    Request(reqwest::Error),

    #[error("Upstream returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("Malformed upstream payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for FeedError {
    fn from(e: reqwest::Error) -> Self {
        // The request URL carries the api_key
        FeedError::Request(e.without_url())
    }
}

impl IntoResponse for FeedError {
    fn into_response(self) -> Response {
        tracing::error!("Feed request failed: {}", self);

        (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::generic())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_every_error_maps_to_generic_500() {
        let decode = serde_json::from_str::<ErrorBody>("{").unwrap_err();
        let errors = vec![
            FeedError::Status(reqwest::StatusCode::FORBIDDEN),
            FeedError::Decode(decode),
        ];

        for error in errors {
            let response = error.into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            let body = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            assert_eq!(&body[..], br#"{"message":"Something went wrong!"}"#);
        }
    }
}
