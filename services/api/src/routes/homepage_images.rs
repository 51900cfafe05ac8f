//! Homepage image routes

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use chrono::Utc;
use serde::Deserialize;

use super::{
    resource::{self, Resource},
    route_not_found,
};
use crate::{
    error::ApiResult,
    extract::{ApiJson, ApiQuery},
    models::{HomepageImage, HomepageImageChanges, HomepageImageFilter, NewHomepageImage},
    state::AppState,
};

const HOMEPAGE_IMAGE: Resource = Resource {
    title: "Homepage image",
    label: "homepage image",
    plural: "homepage images",
    conflict: "Homepage image with this ID already exists",
};

#[derive(Debug, Default, Deserialize)]
struct ImageQuery {
    #[serde(rename = "type")]
    image_type: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_images).post(create_image).fallback(route_not_found))
        .route("/:id", put(update_image).delete(delete_image).fallback(route_not_found))
}

/// Active images in display order, optionally for one side only
async fn list_images(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ImageQuery>,
) -> ApiResult<Json<Vec<HomepageImage>>> {
    let filter = HomepageImageFilter {
        image_type: query.image_type.filter(|t| !t.is_empty()),
        active_only: true,
    };
    resource::list(state.homepage_images.as_ref(), &HOMEPAGE_IMAGE, filter).await
}

/// The side is validated before anything is stored
async fn create_image(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewHomepageImage>,
) -> ApiResult<(StatusCode, Json<HomepageImage>)> {
    let image = payload.into_record(Utc::now())?;
    resource::create(state.homepage_images.as_ref(), &HOMEPAGE_IMAGE, &image).await
}

async fn update_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(changes): ApiJson<HomepageImageChanges>,
) -> ApiResult<Json<HomepageImage>> {
    resource::update(state.homepage_images.as_ref(), &HOMEPAGE_IMAGE, &id, &changes).await
}

async fn delete_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    resource::remove(state.homepage_images.as_ref(), &HOMEPAGE_IMAGE, &id).await
}
