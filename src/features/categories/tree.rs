//! Arena-based view of the category hierarchy.
//!
//! Categories live in a flat table with nullable `parent_id` self-references.
//! `CategoryTree` loads them into an arena indexed by id, with parent links as
//! arena indices, and validates the tree invariants up front: every parent
//! must exist and every parent chain must terminate. Write operations consult
//! the tree before mutating the table, so a cycle can never be persisted.

use std::collections::HashMap;

use thiserror::Error;
use uuid::Uuid;

use crate::features::categories::models::Category;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// A category references a parent id that is not in the table.
    #[error("category {child} references missing parent {parent}")]
    DanglingParent { child: Uuid, parent: Uuid },

    /// A parent chain does not terminate within the node count.
    #[error("cycle detected in parent chain of category {start}")]
    CycleDetected { start: Uuid },

    #[error("category {0} not found")]
    UnknownCategory(Uuid),
}

/// In-memory category tree. Nodes are stored in an arena; parent/child links
/// are arena indices. Child order follows the input order, so callers that
/// load categories sorted by display order get sorted children for free.
#[derive(Debug)]
pub struct CategoryTree {
    nodes: Vec<Category>,
    index: HashMap<Uuid, usize>,
    parents: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
}

impl CategoryTree {
    /// Build the arena from a flat category list, validating that parent
    /// links are resolvable and acyclic.
    pub fn build(categories: Vec<Category>) -> Result<Self, TreeError> {
        let index: HashMap<Uuid, usize> = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id, i))
            .collect();

        let mut parents = Vec::with_capacity(categories.len());
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); categories.len()];
        let mut roots = Vec::new();

        for (i, category) in categories.iter().enumerate() {
            match category.parent_id {
                None => {
                    parents.push(None);
                    roots.push(i);
                }
                Some(parent_id) => {
                    let parent_idx =
                        *index
                            .get(&parent_id)
                            .ok_or(TreeError::DanglingParent {
                                child: category.id,
                                parent: parent_id,
                            })?;
                    parents.push(Some(parent_idx));
                    children[parent_idx].push(i);
                }
            }
        }

        let tree = Self {
            nodes: categories,
            index,
            parents,
            children,
            roots,
        };

        // Every parent chain must terminate within the node count
        for i in 0..tree.nodes.len() {
            let mut hops = 0;
            let mut cursor = Some(i);
            while let Some(idx) = cursor {
                hops += 1;
                if hops > tree.nodes.len() {
                    return Err(TreeError::CycleDetected {
                        start: tree.nodes[i].id,
                    });
                }
                cursor = tree.parents[idx];
            }
        }

        Ok(tree)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.index.contains_key(&id)
    }

    /// Categories with no parent, in input order.
    pub fn roots(&self) -> Vec<&Category> {
        self.roots.iter().map(|&i| &self.nodes[i]).collect()
    }

    pub fn children_of(&self, id: Uuid) -> Result<Vec<&Category>, TreeError> {
        let &idx = self.index.get(&id).ok_or(TreeError::UnknownCategory(id))?;
        Ok(self.children[idx].iter().map(|&i| &self.nodes[i]).collect())
    }

    /// Ancestor chain for breadcrumbs: the category itself first, then each
    /// parent up to the root.
    pub fn ancestors(&self, id: Uuid) -> Result<Vec<&Category>, TreeError> {
        let &idx = self.index.get(&id).ok_or(TreeError::UnknownCategory(id))?;

        let mut chain = Vec::new();
        let mut cursor = Some(idx);
        while let Some(i) = cursor {
            chain.push(&self.nodes[i]);
            cursor = self.parents[i];
        }
        Ok(chain)
    }

    /// The subtree rooted at `id`, including the category itself
    /// (depth-first, parents before children).
    pub fn descendants(&self, id: Uuid) -> Result<Vec<&Category>, TreeError> {
        let &idx = self.index.get(&id).ok_or(TreeError::UnknownCategory(id))?;

        let mut result = Vec::new();
        let mut stack = vec![idx];
        while let Some(i) = stack.pop() {
            result.push(&self.nodes[i]);
            // Reverse so children pop in input order
            stack.extend(self.children[i].iter().rev());
        }
        Ok(result)
    }

    /// True when setting `new_parent` as the parent of `id` would close a
    /// cycle, i.e. the new parent is the category itself or one of its
    /// descendants.
    pub fn would_create_cycle(&self, id: Uuid, new_parent: Uuid) -> Result<bool, TreeError> {
        if !self.contains(new_parent) {
            return Err(TreeError::UnknownCategory(new_parent));
        }
        Ok(self
            .descendants(id)?
            .iter()
            .any(|c| c.id == new_parent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn category(id: Uuid, parent_id: Option<Uuid>, title: &str) -> Category {
        Category {
            id,
            parent_id,
            title: title.to_string(),
            slug: title.to_lowercase(),
            display_order: 0,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// Categories {A(null), B(A), C(B)} plus an unrelated root D.
    fn sample() -> (Uuid, Uuid, Uuid, Uuid, CategoryTree) {
        let (a, b, c, d) = (
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
        );
        let tree = CategoryTree::build(vec![
            category(a, None, "A"),
            category(b, Some(a), "B"),
            category(c, Some(b), "C"),
            category(d, None, "D"),
        ])
        .unwrap();
        (a, b, c, d, tree)
    }

    #[test]
    fn ancestor_chain_is_self_then_parents() {
        let (a, b, c, _, tree) = sample();
        let chain: Vec<Uuid> = tree.ancestors(c).unwrap().iter().map(|c| c.id).collect();
        assert_eq!(chain, vec![c, b, a]);
    }

    #[test]
    fn descendants_include_self_and_subtree() {
        let (a, b, c, _, tree) = sample();
        let ids: Vec<Uuid> = tree.descendants(a).unwrap().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![a, b, c]);
    }

    #[test]
    fn roots_plus_descendants_partition_the_table() {
        let (_, _, _, _, tree) = sample();
        let mut covered: Vec<Uuid> = tree
            .roots()
            .iter()
            .flat_map(|root| tree.descendants(root.id).unwrap())
            .map(|c| c.id)
            .collect();
        covered.sort();
        covered.dedup();
        assert_eq!(covered.len(), tree.len());
    }

    #[test]
    fn dangling_parent_is_reported() {
        let a = Uuid::new_v4();
        let ghost = Uuid::new_v4();
        let err = CategoryTree::build(vec![category(a, Some(ghost), "A")]).unwrap_err();
        assert_eq!(
            err,
            TreeError::DanglingParent {
                child: a,
                parent: ghost
            }
        );
    }

    #[test]
    fn cycle_in_stored_data_is_reported() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let err =
            CategoryTree::build(vec![category(a, Some(b), "A"), category(b, Some(a), "B")])
                .unwrap_err();
        assert!(matches!(err, TreeError::CycleDetected { .. }));
    }

    #[test]
    fn reparenting_under_own_descendant_is_a_cycle() {
        let (a, b, c, d, tree) = sample();
        // A under its grandchild C closes a cycle; A under itself too
        assert!(tree.would_create_cycle(a, c).unwrap());
        assert!(tree.would_create_cycle(a, a).unwrap());
        // B under the unrelated root D is fine
        assert!(!tree.would_create_cycle(b, d).unwrap());
    }

    #[test]
    fn unknown_category_is_an_error() {
        let (_, _, _, _, tree) = sample();
        let ghost = Uuid::new_v4();
        assert_eq!(
            tree.ancestors(ghost).unwrap_err(),
            TreeError::UnknownCategory(ghost)
        );
    }
}
