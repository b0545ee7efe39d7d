use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::models::Category;
use crate::features::categories::tree::CategoryTree;
use crate::shared::validation::SLUG_REGEX;

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub title: String,
    pub slug: String,
    pub display_order: i32,
    pub is_active: bool,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            parent_id: c.parent_id,
            title: c.title,
            slug: c.slug,
            display_order: c.display_order,
            is_active: c.is_active,
        }
    }
}

impl From<&Category> for CategoryResponseDto {
    fn from(c: &Category) -> Self {
        c.clone().into()
    }
}

/// Response DTO for category tree (hierarchical structure)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(no_recursion)]
pub struct CategoryTreeDto {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub display_order: i32,
    pub children: Vec<CategoryTreeDto>,
}

impl CategoryTreeDto {
    /// Render the arena as a nested structure, roots first. Inactive
    /// categories hide their whole subtree.
    pub fn from_tree(tree: &CategoryTree) -> Vec<CategoryTreeDto> {
        tree.roots()
            .into_iter()
            .filter(|root| root.is_active)
            .map(|root| Self::from_node(tree, root))
            .collect()
    }

    fn from_node(tree: &CategoryTree, category: &Category) -> CategoryTreeDto {
        let children = tree
            .children_of(category.id)
            .unwrap_or_default()
            .into_iter()
            .filter(|child| child.is_active)
            .map(|child| Self::from_node(tree, child))
            .collect();

        CategoryTreeDto {
            id: category.id,
            title: category.title.clone(),
            slug: category.slug.clone(),
            display_order: category.display_order,
            children,
        }
    }
}

/// Request DTO for creating a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,

    #[validate(
        length(min = 1, max = 100, message = "Slug must be 1-100 characters"),
        regex(path = "*SLUG_REGEX", message = "Slug must be lowercase-with-hyphens")
    )]
    pub slug: String,

    pub parent_id: Option<Uuid>,

    #[serde(default)]
    pub display_order: i32,
}

/// Request DTO for updating a category. All fields are applied as given;
/// `parent_id: None` moves the category to the root level.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,

    #[validate(
        length(min = 1, max = 100, message = "Slug must be 1-100 characters"),
        regex(path = "*SLUG_REGEX", message = "Slug must be lowercase-with-hyphens")
    )]
    pub slug: String,

    pub parent_id: Option<Uuid>,

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
    use chrono::Utc;
    use validator::Validate;

    fn category(parent_id: Option<Uuid>, slug: &str, is_active: bool) -> Category {
        Category {
            id: Uuid::new_v4(),
            parent_id,
            title: slug.to_string(),
            slug: slug.to_string(),
            display_order: 0,
            is_active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn inactive_subtree_is_hidden_from_tree_response() {
        let root = category(None, "electronics", true);
        let hidden = category(Some(root.id), "clearance", false);
        let orphaned = category(Some(hidden.id), "old-stock", true);
        let visible = category(Some(root.id), "phones", true);

        let tree =
            CategoryTree::build(vec![root, hidden, orphaned, visible]).unwrap();
        let rendered = CategoryTreeDto::from_tree(&tree);

        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].slug, "electronics");
        assert_eq!(rendered[0].children.len(), 1);
        assert_eq!(rendered[0].children[0].slug, "phones");
    }

    #[test]
    fn create_dto_rejects_long_title_and_bad_slug() {
        let dto = CreateCategoryDto {
            title: "x".repeat(101),
            slug: "Not A Slug".to_string(),
            parent_id: None,
            display_order: 0,
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
        assert!(errors.field_errors().contains_key("slug"));
    }

    #[test]
    fn create_dto_accepts_valid_input() {
        let dto = CreateCategoryDto {
            title: "Home Appliances".to_string(),
            slug: "home-appliances".to_string(),
            parent_id: None,
            display_order: 2,
        };
        assert!(dto.validate().is_ok());
    }
}
