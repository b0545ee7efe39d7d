use std::collections::BTreeSet;

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::products::dtos::{
    AssignCategoriesDto, CreateProductDto, ListProductsQuery, ProductCategoryDto,
    ProductDetailDto, ProductResponseDto, UpdateProductDto,
};
use crate::features::products::models::Product;
use crate::shared::types::PaginationQuery;

const PRODUCT_COLUMNS: &str =
    "id, title, slug, description, price, stock, image_url, is_active, created_at, updated_at";

/// Service for the product catalog
pub struct ProductService {
    pool: PgPool,
}

impl ProductService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Public paginated list of active products, optionally filtered by
    /// category slug and title search.
    pub async fn list(
        &self,
        query: &ListProductsQuery,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<ProductResponseDto>, i64)> {
        const FILTER: &str = r#"
            FROM products p
            WHERE p.is_active = TRUE
              AND ($1::text IS NULL OR p.title ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR EXISTS (
                    SELECT 1
                    FROM product_selected_categories psc
                    JOIN product_categories c ON c.id = psc.category_id
                    WHERE psc.product_id = p.id AND c.slug = $2))
        "#;

        let total = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) {FILTER}"))
            .bind(&query.search)
            .bind(&query.category)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let products = sqlx::query_as::<_, Product>(&format!(
            r#"
            SELECT p.id, p.title, p.slug, p.description, p.price, p.stock,
                   p.image_url, p.is_active, p.created_at, p.updated_at
            {FILTER}
            ORDER BY p.created_at DESC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(&query.search)
        .bind(&query.category)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list products: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((products.into_iter().map(|p| p.into()).collect(), total))
    }

    /// Public product detail by slug, including assigned categories.
    pub async fn get_by_slug(&self, slug: &str) -> Result<ProductDetailDto> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE slug = $1 AND is_active = TRUE"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound(format!("Product '{}' not found", slug)))?;

        let categories = self.categories_of(product.id).await?;
        Ok(ProductDetailDto {
            product: product.into(),
            categories,
        })
    }

    /// Create a product (admin).
    pub async fn create(&self, dto: CreateProductDto) -> Result<ProductResponseDto> {
        if dto.price < Decimal::ZERO {
            return Err(AppError::Validation(vec![
                "price: Price must not be negative".to_string(),
            ]));
        }

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (title, slug, description, price, stock, image_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(&dto.title)
        .bind(&dto.slug)
        .bind(&dto.description)
        .bind(dto.price)
        .bind(dto.stock)
        .bind(&dto.image_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict(format!("Product slug '{}' already exists", dto.slug))
            }
            _ => {
                tracing::error!("Failed to create product: {:?}", e);
                AppError::Database(e)
            }
        })?;

        tracing::info!("Product created: id={}, slug={}", product.id, product.slug);
        Ok(product.into())
    }

    /// Update a product (admin).
    pub async fn update(&self, id: Uuid, dto: UpdateProductDto) -> Result<ProductResponseDto> {
        if dto.price < Decimal::ZERO {
            return Err(AppError::Validation(vec![
                "price: Price must not be negative".to_string(),
            ]));
        }

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
            SET title = $2, slug = $3, description = $4, price = $5, stock = $6,
                image_url = $7, is_active = $8, updated_at = NOW()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&dto.title)
        .bind(&dto.slug)
        .bind(&dto.description)
        .bind(dto.price)
        .bind(dto.stock)
        .bind(&dto.image_url)
        .bind(dto.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict(format!("Product slug '{}' already exists", dto.slug))
            }
            _ => {
                tracing::error!("Failed to update product: {:?}", e);
                AppError::Database(e)
            }
        })?
        .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))?;

        Ok(product.into())
    }

    /// Retire a product (admin). Orders keep their history, so products are
    /// deactivated rather than deleted.
    pub async fn retire(&self, id: Uuid) -> Result<()> {
        let result =
            sqlx::query("UPDATE products SET is_active = FALSE, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Product {} not found", id)));
        }

        tracing::info!("Product retired: id={}", id);
        Ok(())
    }

    /// Replace a product's category assignments (admin). Duplicate ids in the
    /// input are deduplicated; each (product, category) pair is stored once.
    pub async fn set_categories(
        &self,
        product_id: Uuid,
        dto: AssignCategoriesDto,
    ) -> Result<Vec<ProductCategoryDto>> {
        let exists =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products WHERE id = $1")
                .bind(product_id)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;
        if exists == 0 {
            return Err(AppError::NotFound(format!(
                "Product {} not found",
                product_id
            )));
        }

        let unique_ids: Vec<Uuid> = dto
            .category_ids
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let known = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM product_categories WHERE id = ANY($1)",
        )
        .bind(&unique_ids)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if known != unique_ids.len() as i64 {
            return Err(AppError::BadRequest(
                "One or more category ids do not exist".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query("DELETE FROM product_selected_categories WHERE product_id = $1")
            .bind(product_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        for category_id in &unique_ids {
            sqlx::query(
                r#"
                INSERT INTO product_selected_categories (product_id, category_id)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(product_id)
            .bind(category_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        }

        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!(
            "Product {} assigned to {} categories",
            product_id,
            unique_ids.len()
        );

        self.categories_of(product_id).await
    }

    async fn categories_of(&self, product_id: Uuid) -> Result<Vec<ProductCategoryDto>> {
        sqlx::query_as::<_, ProductCategoryDto>(
            r#"
            SELECT c.id, c.title, c.slug
            FROM product_selected_categories psc
            JOIN product_categories c ON c.id = psc.category_id
            WHERE psc.product_id = $1
            ORDER BY c.display_order, c.title
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch product categories: {:?}", e);
            AppError::Database(e)
        })
    }
}
