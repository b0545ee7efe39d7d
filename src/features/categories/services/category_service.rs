use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    CategoryResponseDto, CategoryTreeDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::models::Category;
use crate::features::categories::tree::{CategoryTree, TreeError};

const CATEGORY_COLUMNS: &str =
    "id, parent_id, title, slug, display_order, is_active, created_at, updated_at";

/// Advisory lock key serializing writes to the category tree. Concurrent
/// opposing re-parents could otherwise both pass the cycle check against
/// their own snapshot and persist a cycle.
const CATEGORY_WRITE_LOCK: i64 = 0x6361_7465_676f_7279; // "category"

/// Service for the category hierarchy.
///
/// Reads reconstitute the tree from the flat table; writes go through
/// `CategoryTree` first so the acyclic invariant holds before anything is
/// persisted.
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all active categories (flat list)
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            r#"
            SELECT {CATEGORY_COLUMNS}
            FROM product_categories
            WHERE is_active = TRUE
            ORDER BY display_order, title
            "#
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// List active categories as a nested tree, roots first. An inactive
    /// category hides its whole subtree.
    pub async fn list_tree(&self) -> Result<Vec<CategoryTreeDto>> {
        let tree = self.load_tree().await?;
        Ok(CategoryTreeDto::from_tree(&tree))
    }

    /// Get category by slug
    pub async fn get_by_slug(&self, slug: &str) -> Result<CategoryResponseDto> {
        let category = sqlx::query_as::<_, Category>(&format!(
            r#"
            SELECT {CATEGORY_COLUMNS}
            FROM product_categories
            WHERE slug = $1 AND is_active = TRUE
            "#
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get category by slug: {:?}", e);
            AppError::Database(e)
        })?;

        category
            .map(|c| c.into())
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", slug)))
    }

    /// Ancestor chain for breadcrumbs: the category itself first, then each
    /// parent up to the root.
    pub async fn breadcrumbs(&self, slug: &str) -> Result<Vec<CategoryResponseDto>> {
        // The chain may pass through inactive ancestors, so load everything
        let tree = self.load_tree().await?;

        let category = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM product_categories WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", slug)))?;

        let chain = tree.ancestors(category.id).map_err(map_tree_error)?;
        Ok(chain.into_iter().map(|c| c.into()).collect())
    }

    /// Create a category. A given parent must exist.
    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let mut tx = self.write_lock_tx().await?;

        if let Some(parent_id) = dto.parent_id {
            let tree = Self::load_tree_in(&mut tx).await?;
            if !tree.contains(parent_id) {
                return Err(AppError::BadRequest(format!(
                    "Parent category {} does not exist",
                    parent_id
                )));
            }
        }

        let category = sqlx::query_as::<_, Category>(&format!(
            r#"
            INSERT INTO product_categories (parent_id, title, slug, display_order)
            VALUES ($1, $2, $3, $4)
            RETURNING {CATEGORY_COLUMNS}
            "#
        ))
        .bind(dto.parent_id)
        .bind(&dto.title)
        .bind(&dto.slug)
        .bind(dto.display_order)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict(format!("Category slug '{}' already exists", dto.slug))
            }
            _ => {
                tracing::error!("Failed to create category: {:?}", e);
                AppError::Database(e)
            }
        })?;

        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!("Category created: id={}, slug={}", category.id, category.slug);
        Ok(category.into())
    }

    /// Update a category. Re-parenting is rejected when the new parent is the
    /// category itself or one of its descendants; the cycle check and the
    /// UPDATE run under the same write lock so the snapshot cannot go stale.
    pub async fn update(&self, id: Uuid, dto: UpdateCategoryDto) -> Result<CategoryResponseDto> {
        let mut tx = self.write_lock_tx().await?;

        let tree = Self::load_tree_in(&mut tx).await?;

        if !tree.contains(id) {
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }

        if let Some(parent_id) = dto.parent_id {
            if !tree.contains(parent_id) {
                return Err(AppError::BadRequest(format!(
                    "Parent category {} does not exist",
                    parent_id
                )));
            }
            if tree.would_create_cycle(id, parent_id).map_err(map_tree_error)? {
                return Err(AppError::BadRequest(
                    "Cannot set a category's parent to itself or one of its descendants"
                        .to_string(),
                ));
            }
        }

        let category = sqlx::query_as::<_, Category>(&format!(
            r#"
            UPDATE product_categories
            SET parent_id = $2, title = $3, slug = $4, display_order = $5,
                is_active = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING {CATEGORY_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(dto.parent_id)
        .bind(&dto.title)
        .bind(&dto.slug)
        .bind(dto.display_order)
        .bind(dto.is_active)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict(format!("Category slug '{}' already exists", dto.slug))
            }
            _ => {
                tracing::error!("Failed to update category: {:?}", e);
                AppError::Database(e)
            }
        })?;

        tx.commit().await.map_err(AppError::Database)?;

        Ok(category.into())
    }

    /// Delete a category. Its children are re-parented to the deleted
    /// category's own parent (or become roots), and its product associations
    /// are removed, all in one transaction.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let mut tx = self.write_lock_tx().await?;

        let category = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM product_categories WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;

        sqlx::query("UPDATE product_categories SET parent_id = $2, updated_at = NOW() WHERE parent_id = $1")
            .bind(id)
            .bind(category.parent_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        sqlx::query("DELETE FROM product_selected_categories WHERE category_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        sqlx::query("DELETE FROM product_categories WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!(
            "Category deleted: id={}, children re-parented to {:?}",
            id,
            category.parent_id
        );
        Ok(())
    }

    /// Load the whole hierarchy into an arena. Inactive categories are
    /// included so parent chains stay resolvable; visibility filtering
    /// happens at render time.
    async fn load_tree(&self) -> Result<CategoryTree> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            r#"
            SELECT {CATEGORY_COLUMNS}
            FROM product_categories
            ORDER BY display_order, title
            "#
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load categories: {:?}", e);
            AppError::Database(e)
        })?;

        CategoryTree::build(categories).map_err(map_tree_error)
    }

    /// Same as `load_tree`, but reads inside the caller's write transaction
    /// so the snapshot stays valid until commit.
    async fn load_tree_in(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> Result<CategoryTree> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            r#"
            SELECT {CATEGORY_COLUMNS}
            FROM product_categories
            ORDER BY display_order, title
            "#
        ))
        .fetch_all(&mut **tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load categories: {:?}", e);
            AppError::Database(e)
        })?;

        CategoryTree::build(categories).map_err(map_tree_error)
    }

    /// Open a transaction holding the category write lock. The lock is
    /// released automatically at commit or rollback.
    async fn write_lock_tx(&self) -> Result<sqlx::Transaction<'_, sqlx::Postgres>> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(CATEGORY_WRITE_LOCK)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        Ok(tx)
    }
}

fn map_tree_error(err: TreeError) -> AppError {
    match err {
        TreeError::DanglingParent { .. } | TreeError::CycleDetected { .. } => {
            AppError::DataIntegrity(err.to_string())
        }
        TreeError::UnknownCategory(id) => AppError::NotFound(format!("Category {} not found", id)),
    }
}
