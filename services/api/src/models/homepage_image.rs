//! Homepage image model

use std::{cmp::Ordering, fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::assign;
use crate::{
    error::{ApiError, ApiResult},
    repositories::Record,
    validation::RequiredFields,
};

/// Side of the homepage an image is shown on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ImageSide {
    Left,
    Right,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Type must be either \"left\" or \"right\"")]
pub struct InvalidImageSide;

impl ImageSide {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageSide::Left => "left",
            ImageSide::Right => "right",
        }
    }
}

impl FromStr for ImageSide {
    type Err = InvalidImageSide;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "left" => Ok(ImageSide::Left),
            "right" => Ok(ImageSide::Right),
            _ => Err(InvalidImageSide),
        }
    }
}

impl TryFrom<String> for ImageSide {
    type Error = InvalidImageSide;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for ImageSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Homepage image entity
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomepageImage {
    pub id: String,
    pub url: String,
    #[serde(rename = "type")]
    pub image_type: ImageSide,
    pub order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New homepage image payload; `type` stays raw text until validated
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHomepageImage {
    pub id: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub image_type: Option<String>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
}

impl NewHomepageImage {
    pub fn into_record(self, now: DateTime<Utc>) -> ApiResult<HomepageImage> {
        let mut required = RequiredFields::new();
        let id = required.take("id", self.id);
        let url = required.take("url", self.url);
        let image_type = required.take("type", self.image_type);
        required.finish("ID, URL, and type are required")?;

        let image_type = image_type
            .parse::<ImageSide>()
            .map_err(|e| ApiError::Validation(e.to_string()))?;

        Ok(HomepageImage {
            id,
            url,
            image_type,
            order: self.order.unwrap_or(0),
            is_active: self.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        })
    }
}

/// Homepage image update payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomepageImageChanges {
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub image_type: Option<ImageSide>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
}

/// Homepage image listing filter
#[derive(Debug, Clone, Default)]
pub struct HomepageImageFilter {
    pub image_type: Option<String>,
    pub active_only: bool,
}

impl Record for HomepageImage {
    type Filter = HomepageImageFilter;
    type Changes = HomepageImageChanges;

    fn id(&self) -> &str {
        &self.id
    }

    fn matches(&self, filter: &HomepageImageFilter) -> bool {
        filter
            .image_type
            .as_deref()
            .is_none_or(|t| t == self.image_type.as_str())
            && (!filter.active_only || self.is_active)
    }

    fn listing_order(&self, other: &Self) -> Ordering {
        self.order.cmp(&other.order)
    }

    fn apply(&mut self, changes: &HomepageImageChanges, now: DateTime<Utc>) {
        assign(&mut self.url, &changes.url);
        assign(&mut self.image_type, &changes.image_type);
        assign(&mut self.order, &changes.order);
        assign(&mut self.is_active, &changes.is_active);
        self.updated_at = now;
    }
}
