//! Request extractors

use axum::{
    Json, async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON body extractor whose rejections render as validation errors
///
/// Malformed JSON, wrong field types and a missing JSON content type all
/// become `400 {"error": "..."}` instead of axum's plain-text rejections.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::Validation(rejection.body_text())),
        }
    }
}

/// Query string extractor with the same JSON error body as [`ApiJson`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::Validation(rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{self, header},
    };
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        name: String,
    }

    fn request(content_type: Option<&str>, body: &'static str) -> Request {
        let mut builder = http::Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn extracts_valid_json() {
        let ApiJson(payload) =
            ApiJson::<Payload>::from_request(request(Some("application/json"), r#"{"name":"CS"}"#), &())
                .await
                .unwrap();
        assert_eq!(payload.name, "CS");
    }

    #[tokio::test]
    async fn malformed_json_is_a_validation_error() {
        let err = ApiJson::<Payload>::from_request(request(Some("application/json"), "{not json"), &())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn missing_content_type_is_a_validation_error() {
        let err = ApiJson::<Payload>::from_request(request(None, r#"{"name":"CS"}"#), &())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[derive(Debug, Deserialize)]
    struct Filter {
        kind: Option<String>,
    }

    async fn query(uri: &str) -> Result<ApiQuery<Filter>, ApiError> {
        let (mut parts, _) = http::Request::builder()
            .uri(uri)
            .body(())
            .unwrap()
            .into_parts();
        ApiQuery::<Filter>::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn extracts_optional_query_fields() {
        let ApiQuery(filter) = query("/?kind=left").await.unwrap();
        assert_eq!(filter.kind.as_deref(), Some("left"));

        let ApiQuery(filter) = query("/").await.unwrap();
        assert!(filter.kind.is_none());
    }

    #[tokio::test]
    async fn repeated_query_field_is_a_validation_error() {
        let err = query("/?kind=left&kind=right").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
