//! HTTP middleware: CORS, security headers and panic recovery

use std::any::Any;

use axum::{
    Json,
    body::Body,
    http::{
        HeaderValue, Method, Response, StatusCode,
        header::{self, HeaderName},
    },
    response::IntoResponse,
};
use serde_json::json;
use tower_http::{
    catch_panic::ResponseForPanic,
    cors::{AllowOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
};
use tracing::{error, warn};

/// CORS restricted to the configured origins, with credentials allowed
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_credentials(true)
}

/// Response headers added unless a handler already set them
pub fn security_headers() -> [SetResponseHeaderLayer<HeaderValue>; 3] {
    let set = |name: HeaderName, value: &'static str| {
        SetResponseHeaderLayer::if_not_present(name, HeaderValue::from_static(value))
    };

    [
        set(header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        set(header::X_FRAME_OPTIONS, "SAMEORIGIN"),
        set(header::REFERRER_POLICY, "no-referrer"),
    ]
}

/// Turns a handler panic into a JSON 500
///
/// The panic text is only exposed in development.
#[derive(Debug, Clone, Copy)]
pub struct PanicResponder {
    expose_details: bool,
}

impl PanicResponder {
    pub fn new(expose_details: bool) -> Self {
        Self { expose_details }
    }
}

impl ResponseForPanic for PanicResponder {
    type ResponseBody = Body;

    fn response_for_panic(&mut self, err: Box<dyn Any + Send + 'static>) -> Response<Body> {
        let details = if let Some(message) = err.downcast_ref::<String>() {
            message.clone()
        } else if let Some(message) = err.downcast_ref::<&str>() {
            message.to_string()
        } else {
            "Unknown panic".to_string()
        };

        error!(panic = %details, "Server Error");

        let message = if self.expose_details {
            details
        } else {
            "Something went wrong".to_string()
        };

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Internal Server Error",
                "message": message,
            })),
        )
            .into_response()
    }
}
