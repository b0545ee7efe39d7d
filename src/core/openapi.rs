use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::orders::{
    dtos as orders_dtos, handlers as orders_handlers, models as orders_models,
};
use crate::features::products::{dtos as products_dtos, handlers as products_handlers};
use crate::features::sliders::{dtos as sliders_dtos, handlers as sliders_handlers};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers, models as users_models};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::register,
        auth::handlers::login,
        auth::handlers::get_me,
        // Users
        users_handlers::get_profile,
        users_handlers::update_profile,
        users_handlers::change_password,
        users_handlers::list_users,
        users_handlers::set_user_active,
        // Categories
        categories_handlers::list_categories,
        categories_handlers::get_category,
        categories_handlers::get_breadcrumbs,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Products
        products_handlers::list_products,
        products_handlers::get_product,
        products_handlers::create_product,
        products_handlers::update_product,
        products_handlers::delete_product,
        products_handlers::set_product_categories,
        // Sliders
        sliders_handlers::list_sliders,
        sliders_handlers::create_slider,
        sliders_handlers::update_slider,
        sliders_handlers::delete_slider,
        // Orders
        orders_handlers::place_order,
        orders_handlers::list_orders,
        orders_handlers::get_order,
        orders_handlers::cancel_order,
        orders_handlers::list_all_orders,
        orders_handlers::update_order_status,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::model::AuthenticatedUser,
            auth::dtos::RegisterRequestDto,
            auth::dtos::LoginRequestDto,
            auth::dtos::AuthResponseDto,
            auth::dtos::AuthUserDto,
            auth::dtos::MeResponseDto,
            ApiResponse<auth::dtos::AuthResponseDto>,
            ApiResponse<auth::dtos::MeResponseDto>,
            // Users
            users_models::UserRole,
            users_dtos::UserResponseDto,
            users_dtos::UpdateProfileDto,
            users_dtos::ChangePasswordDto,
            users_dtos::SetActiveDto,
            ApiResponse<users_dtos::UserResponseDto>,
            ApiResponse<Vec<users_dtos::UserResponseDto>>,
            // Categories
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategoryTreeDto,
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            // Products
            products_dtos::ProductResponseDto,
            products_dtos::ProductCategoryDto,
            products_dtos::ProductDetailDto,
            products_dtos::CreateProductDto,
            products_dtos::UpdateProductDto,
            products_dtos::AssignCategoriesDto,
            ApiResponse<products_dtos::ProductResponseDto>,
            ApiResponse<Vec<products_dtos::ProductResponseDto>>,
            ApiResponse<products_dtos::ProductDetailDto>,
            ApiResponse<Vec<products_dtos::ProductCategoryDto>>,
            // Sliders
            sliders_dtos::SliderResponseDto,
            sliders_dtos::CreateSliderDto,
            sliders_dtos::UpdateSliderDto,
            ApiResponse<sliders_dtos::SliderResponseDto>,
            ApiResponse<Vec<sliders_dtos::SliderResponseDto>>,
            // Orders
            orders_models::OrderStatus,
            orders_dtos::PlaceOrderItemDto,
            orders_dtos::PlaceOrderDto,
            orders_dtos::OrderItemDto,
            orders_dtos::OrderResponseDto,
            orders_dtos::UpdateOrderStatusDto,
            ApiResponse<orders_dtos::OrderResponseDto>,
            ApiResponse<Vec<orders_dtos::OrderResponseDto>>,
        )
    ),
    tags(
        (name = "auth", description = "Registration, login, and token introspection"),
        (name = "users", description = "User profile management"),
        (name = "categories", description = "Product category hierarchy (public)"),
        (name = "products", description = "Product catalog (public)"),
        (name = "sliders", description = "Homepage sliders (public)"),
        (name = "orders", description = "Order placement and history"),
        (name = "admin", description = "Admin management endpoints"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Eshop API",
        version = "0.1.0",
        description = "API documentation for the eshop backend",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
