use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::sliders::models::Slider;

/// Response DTO for slider
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SliderResponseDto {
    pub id: Uuid,
    pub title: String,
    pub image_url: String,
    pub link_url: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
}

impl From<Slider> for SliderResponseDto {
    fn from(s: Slider) -> Self {
        Self {
            id: s.id,
            title: s.title,
            image_url: s.image_url,
            link_url: s.link_url,
            display_order: s.display_order,
            is_active: s.is_active,
        }
    }
}

/// Request DTO for creating a slider
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateSliderDto {
    #[validate(length(min = 1, max = 150, message = "Title must be 1-150 characters"))]
    pub title: String,

    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: String,

    #[validate(url(message = "Link URL must be a valid URL"))]
    pub link_url: Option<String>,

    #[serde(default)]
    pub display_order: i32,
}

/// Request DTO for updating a slider. All fields are applied as given.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateSliderDto {
    #[validate(length(min = 1, max = 150, message = "Title must be 1-150 characters"))]
    pub title: String,

    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: String,

    #[validate(url(message = "Link URL must be a valid URL"))]
    pub link_url: Option<String>,

    #[serde(default)]
    pub display_order: i32,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn create_dto_rejects_bad_urls() {
        let dto = CreateSliderDto {
            title: "Summer Sale".to_string(),
            image_url: "not a url".to_string(),
            link_url: Some("also not a url".to_string()),
            display_order: 0,
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("image_url"));
        assert!(errors.field_errors().contains_key("link_url"));
    }

    #[test]
    fn create_dto_accepts_valid_input() {
        let dto = CreateSliderDto {
            title: "Summer Sale".to_string(),
            image_url: "https://cdn.example.com/banners/summer.jpg".to_string(),
            link_url: None,
            display_order: 1,
        };
        assert!(dto.validate().is_ok());
    }
}
