//! Last-resort failure translation.
//!
//! Anything that escapes the handlers without becoming a client error ends up
//! here: persistence faults surfaced through [`crate::error::ApiError`] and
//! panics caught by the router's `CatchPanicLayer`. Both produce the same
//! opaque 500 body so no internal detail reaches the client.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

pub const INTERNAL_ERROR_MESSAGE: &str = "An Internal Server Error has Occured";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    pub status_code: u16,
    pub message: String,
}

pub fn internal_error_response() -> Response {
    let details = ErrorDetails {
        status_code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        message: INTERNAL_ERROR_MESSAGE.to_string(),
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(details)).into_response()
}

/// Panic hook for `tower_http::catch_panic::CatchPanicLayer::custom`.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "non-string panic payload".to_string()
    };

    error!(
        event_name = "http.fault.panic",
        panic = %detail,
        "request handler panicked"
    );
    internal_error_response()
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request, routing::get, Router};
    use tower::ServiceExt;
    use tower_http::catch_panic::CatchPanicLayer;

    use super::*;

    async fn explode() -> &'static str {
        panic!("customer table vanished")
    }

    async fn read_details(response: Response) -> ErrorDetails {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
        serde_json::from_slice(&bytes).expect("error details json")
    }

    #[tokio::test]
    async fn internal_error_response_has_fixed_shape() {
        let response = internal_error_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()["content-type"].to_str().expect("header"),
            "application/json"
        );
        let details = read_details(response).await;
        assert_eq!(details.status_code, 500);
        assert_eq!(details.message, INTERNAL_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn panicking_handler_becomes_opaque_500() {
        let app = Router::new()
            .route("/explode", get(explode))
            .layer(CatchPanicLayer::custom(handle_panic));

        let response = app
            .oneshot(Request::builder().uri("/explode").body(Body::empty()).expect("request"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let text = String::from_utf8(bytes.to_vec()).expect("utf8");
        assert!(!text.contains("vanished"), "panic detail must not leak: {text}");
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&text).expect("json"),
            serde_json::json!({ "statusCode": 500, "message": INTERNAL_ERROR_MESSAGE })
        );
    }

    #[test]
    fn non_string_panic_payload_is_handled() {
        let response = handle_panic(Box::new(42_u8));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
