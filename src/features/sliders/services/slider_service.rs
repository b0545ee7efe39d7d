use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::sliders::dtos::{CreateSliderDto, SliderResponseDto, UpdateSliderDto};
use crate::features::sliders::models::Slider;

const SLIDER_COLUMNS: &str =
    "id, title, image_url, link_url, display_order, is_active, created_at, updated_at";

/// Service for homepage sliders.
pub struct SliderService {
    pool: PgPool,
}

impl SliderService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List active sliders ordered by display_order
    pub async fn list_active(&self) -> Result<Vec<SliderResponseDto>> {
        let sliders = sqlx::query_as::<_, Slider>(&format!(
            r#"
            SELECT {SLIDER_COLUMNS}
            FROM sliders
            WHERE is_active = TRUE
            ORDER BY display_order, created_at
            "#
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list sliders: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(sliders.into_iter().map(|s| s.into()).collect())
    }

    /// Create a slider
    pub async fn create(&self, dto: CreateSliderDto) -> Result<SliderResponseDto> {
        let slider = sqlx::query_as::<_, Slider>(&format!(
            r#"
            INSERT INTO sliders (title, image_url, link_url, display_order)
            VALUES ($1, $2, $3, $4)
            RETURNING {SLIDER_COLUMNS}
            "#
        ))
        .bind(&dto.title)
        .bind(&dto.image_url)
        .bind(&dto.link_url)
        .bind(dto.display_order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create slider: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Slider created: id={}", slider.id);
        Ok(slider.into())
    }

    /// Update a slider
    pub async fn update(&self, id: Uuid, dto: UpdateSliderDto) -> Result<SliderResponseDto> {
        let slider = sqlx::query_as::<_, Slider>(&format!(
            r#"
            UPDATE sliders
            SET title = $2, image_url = $3, link_url = $4, display_order = $5,
                is_active = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING {SLIDER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&dto.title)
        .bind(&dto.image_url)
        .bind(&dto.link_url)
        .bind(dto.display_order)
        .bind(dto.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update slider: {:?}", e);
            AppError::Database(e)
        })?;

        slider
            .map(|s| s.into())
            .ok_or_else(|| AppError::NotFound(format!("Slider {} not found", id)))
    }

    /// Delete a slider
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM sliders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Slider {} not found", id)));
        }

        tracing::info!("Slider deleted: id={}", id);
        Ok(())
    }
}
