use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::products::models::Product;
use crate::shared::validation::SLUG_REGEX;

/// Response DTO for product
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponseDto {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub image_url: Option<String>,
    pub is_active: bool,
}

impl From<Product> for ProductResponseDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            title: p.title,
            slug: p.slug,
            description: p.description,
            price: p.price,
            stock: p.stock,
            image_url: p.image_url,
            is_active: p.is_active,
        }
    }
}

/// Summary of a category assigned to a product
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct ProductCategoryDto {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
}

/// Response DTO for product detail, including assigned categories
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductDetailDto {
    #[serde(flatten)]
    pub product: ProductResponseDto,
    pub categories: Vec<ProductCategoryDto>,
}

/// Query params for the public product list
#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    /// Filter by category slug
    pub category: Option<String>,
    /// Case-insensitive search over product titles
    pub search: Option<String>,
}

/// Request DTO for creating a product
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductDto {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(
        length(min = 1, max = 200, message = "Slug must be 1-200 characters"),
        regex(path = "*SLUG_REGEX", message = "Slug must be lowercase-with-hyphens")
    )]
    pub slug: String,

    pub description: Option<String>,

    /// Unit price; must not be negative (checked by the service)
    pub price: Decimal,

    #[validate(range(min = 0, message = "Stock must not be negative"))]
    #[serde(default)]
    pub stock: i32,

    #[validate(url(message = "Image must be a valid URL"))]
    pub image_url: Option<String>,
}

/// Request DTO for updating a product
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProductDto {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(
        length(min = 1, max = 200, message = "Slug must be 1-200 characters"),
        regex(path = "*SLUG_REGEX", message = "Slug must be lowercase-with-hyphens")
    )]
    pub slug: String,

    pub description: Option<String>,

    /// Unit price; must not be negative (checked by the service)
    pub price: Decimal,

    #[validate(range(min = 0, message = "Stock must not be negative"))]
    pub stock: i32,

    #[validate(url(message = "Image must be a valid URL"))]
    pub image_url: Option<String>,

    pub is_active: bool,
}

/// Request DTO for replacing a product's category assignments
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssignCategoriesDto {
    /// Category ids to assign; duplicates are deduplicated
    pub category_ids: Vec<Uuid>,
}
