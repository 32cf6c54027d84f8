use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::categories::models::{Category, CategoryEventCount, NewCategory};
use crate::features::events::dtos::EventResponseDto;
use crate::shared::validation::{non_blank, validate_not_blank};

/// Response DTO for an area (category)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            image_url: c.image_url,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Request DTO for creating or fully replacing an area
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateCategoryDto {
    #[validate(
        length(min = 1, max = 120, message = "name is required"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
    pub description: Option<String>,
    #[validate(length(max = 500))]
    pub image_url: Option<String>,
}

impl CreateCategoryDto {
    pub fn into_new(self) -> NewCategory {
        NewCategory {
            name: self.name.trim().to_string(),
            description: non_blank(self.description),
            image_url: non_blank(self.image_url),
        }
    }
}

/// Number of events filed under an area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryEventCountDto {
    pub category_id: i64,
    pub event_count: i64,
}

impl From<CategoryEventCount> for CategoryEventCountDto {
    fn from(c: CategoryEventCount) -> Self {
        Self {
            category_id: c.category_id,
            event_count: c.event_count,
        }
    }
}

/// An area together with its next upcoming events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AreaOverviewDto {
    #[serde(flatten)]
    pub area: CategoryResponseDto,
    pub upcoming_events: Vec<EventResponseDto>,
}
