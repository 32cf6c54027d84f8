use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::events::dtos::EventResponseDto;

/// Query params for the combined search
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Search term, matched case-insensitively
    #[serde(default)]
    pub q: String,
    /// Restrict event matches to this area
    pub category_id: Option<i64>,
}

/// One search hit, tagged with `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SearchResultDto {
    Event(EventResponseDto),
    Area(CategoryResponseDto),
}

/// Combined search envelope: events first, then areas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SearchResponseDto {
    pub query: String,
    pub category_id: Option<i64>,
    pub total: usize,
    pub results: Vec<SearchResultDto>,
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn test_area_result_is_tagged() {
        let ts = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let result = SearchResultDto::Area(CategoryResponseDto {
            id: 3,
            name: "Arts & Culture".to_string(),
            description: None,
            image_url: None,
            created_at: ts,
            updated_at: ts,
        });

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["type"], "area");
        assert_eq!(value["name"], "Arts & Culture");
    }
}
