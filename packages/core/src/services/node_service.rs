//! NodeService - Hierarchy Rules and Traversal
//!
//! This module owns the domain rules for the skill tree: creation with
//! parent validation, content updates, cascading deletion, relocation
//! with cycle detection, and recursive materialization of tree views
//! from flat storage.
//!
//! # Architecture
//!
//! - The service holds an `Arc<dyn NodeStore>` and never touches
//!   storage internals; child lists always come from the store's
//!   parent index
//! - Relocation safety is a single iterative walk up the ancestor
//!   chain of the prospective parent; a tree free of cycles terminates
//!   at a root in at most depth steps
//! - Tree views are built by fetching direct children per node and
//!   recursing, so recursion depth equals subtree depth

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::models::{Node, NodeTree, NodeUpdate};
use crate::services::NodeServiceError;
use crate::store::NodeStore;

/// Upper bound on the ancestor walk during relocation checks
///
/// A well-formed tree terminates at a root long before this; the bound
/// only stops the walk if the stored hierarchy is already corrupt.
const MAX_ANCESTOR_WALK: usize = 1000;

/// Parameters for creating a node
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNodeParams {
    /// Skill or topic name
    pub title: String,

    /// Optional free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Optional grouping label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Mastery score in `[0, 100]`
    #[serde(default)]
    pub mastery: i64,

    /// Optional parent node; must exist when given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

/// Core service for node CRUD and hierarchy management
pub struct NodeService {
    store: Arc<dyn NodeStore>,
}

impl NodeService {
    /// Create a new NodeService on top of a store implementation
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use skillvault_core::services::NodeService;
    /// # use skillvault_core::store::MemoryStore;
    /// # use std::sync::Arc;
    /// let service = NodeService::new(Arc::new(MemoryStore::new()));
    /// ```
    pub fn new(store: Arc<dyn NodeStore>) -> Self {
        Self { store }
    }

    /// Get access to the underlying store
    pub fn store(&self) -> &Arc<dyn NodeStore> {
        &self.store
    }

    /// Create a new node, optionally under a parent
    ///
    /// The parent, when given, must exist; a brand-new node cannot be
    /// an ancestor of anything, so no cycle check is needed here.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParent` if `parent_id` references a missing
    /// node.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use skillvault_core::services::{CreateNodeParams, NodeService};
    /// # use skillvault_core::store::MemoryStore;
    /// # use std::sync::Arc;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// # let service = NodeService::new(Arc::new(MemoryStore::new()));
    /// let node = service
    ///     .create_node(CreateNodeParams {
    ///         title: "Rust".to_string(),
    ///         description: None,
    ///         category: Some("Programming".to_string()),
    ///         mastery: 40,
    ///         parent_id: None,
    ///     })
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_node(&self, params: CreateNodeParams) -> Result<Node, NodeServiceError> {
        if let Some(ref parent_id) = params.parent_id {
            if !self.node_exists(parent_id).await? {
                return Err(NodeServiceError::invalid_parent(parent_id));
            }
        }

        let node = Node::new(
            params.title,
            params.description,
            params.category,
            params.mastery,
            params.parent_id,
        );
        self.save(node).await
    }

    /// Get a node by id
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if the id is absent from the store.
    pub async fn get_node(&self, id: &str) -> Result<Node, NodeServiceError> {
        self.find_node(id)
            .await?
            .ok_or_else(|| NodeServiceError::node_not_found(id))
    }

    /// Overwrite a node's content fields
    ///
    /// Only title, description, category, and mastery change; the
    /// parent reference and the node's children are untouched. Content
    /// constraints are the caller's responsibility; they are enforced
    /// at the request boundary before this method is invoked.
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if the id is absent.
    pub async fn update_node(
        &self,
        id: &str,
        update: NodeUpdate,
    ) -> Result<Node, NodeServiceError> {
        let mut node = self.get_node(id).await?;
        node.apply_update(update);
        self.save(node).await
    }

    /// List direct children of a node, or the roots when `parent_id`
    /// is `None`
    ///
    /// Order is store-defined; the service imposes none.
    pub async fn list_children(
        &self,
        parent_id: Option<&str>,
    ) -> Result<Vec<Node>, NodeServiceError> {
        self.store
            .get_children(parent_id)
            .await
            .map_err(|e| NodeServiceError::store_failed(e.to_string()))
    }

    /// Delete a node and its entire descendant subtree
    ///
    /// The store removes the full subtree as one atomic unit of work.
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if the id is absent.
    pub async fn delete_node(&self, id: &str) -> Result<(), NodeServiceError> {
        let result = self
            .store
            .delete_node(id)
            .await
            .map_err(|e| NodeServiceError::store_failed(e.to_string()))?;

        if !result.existed {
            return Err(NodeServiceError::node_not_found(id));
        }
        Ok(())
    }

    /// Move a node under a new parent, or to root when `new_parent` is
    /// `None`
    ///
    /// Only the parent reference changes. Moving a node to its current
    /// parent is an idempotent success, as is moving a root to root.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `NodeNotFound` if the node doesn't exist
    /// - `InvalidParent` if the new parent doesn't exist
    /// - `HierarchyViolation` if `new_parent` equals the node itself
    /// - `CircularReference` if the new parent is a descendant of the
    ///   node (the move would close a parent cycle)
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use skillvault_core::services::NodeService;
    /// # use skillvault_core::store::MemoryStore;
    /// # use std::sync::Arc;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// # let service = NodeService::new(Arc::new(MemoryStore::new()));
    /// // Move under a new parent
    /// service.move_node("node-id", Some("new-parent-id")).await?;
    ///
    /// // Move to root
    /// service.move_node("node-id", None).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn move_node(
        &self,
        node_id: &str,
        new_parent: Option<&str>,
    ) -> Result<Node, NodeServiceError> {
        let mut node = self.get_node(node_id).await?;

        if let Some(parent_id) = new_parent {
            if parent_id == node_id {
                return Err(NodeServiceError::hierarchy_violation(format!(
                    "cannot move node '{}' under itself",
                    node_id
                )));
            }

            if !self.node_exists(parent_id).await? {
                return Err(NodeServiceError::invalid_parent(parent_id));
            }

            // Cycle guard: the new parent must not sit anywhere in the
            // subtree of the node being moved.
            if self.is_descendant(node_id, parent_id).await? {
                return Err(NodeServiceError::circular_reference(format!(
                    "cannot move node {} under its descendant {}",
                    node_id, parent_id
                )));
            }
        }

        node.parent_id = new_parent.map(String::from);
        self.save(node).await
    }

    /// Get the nested tree view rooted at a node
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if the id is absent.
    pub async fn get_subtree(&self, id: &str) -> Result<NodeTree, NodeServiceError> {
        let node = self.get_node(id).await?;
        self.build_tree(&node).await
    }

    /// Get the nested tree views of every root node
    pub async fn get_full_tree(&self) -> Result<Vec<NodeTree>, NodeServiceError> {
        let roots = self.list_children(None).await?;
        let mut trees = Vec::with_capacity(roots.len());
        for root in &roots {
            trees.push(self.build_tree(root).await?);
        }
        Ok(trees)
    }

    // Helper methods

    async fn find_node(&self, id: &str) -> Result<Option<Node>, NodeServiceError> {
        self.store
            .get_node(id)
            .await
            .map_err(|e| NodeServiceError::store_failed(e.to_string()))
    }

    async fn save(&self, node: Node) -> Result<Node, NodeServiceError> {
        self.store
            .save_node(node)
            .await
            .map_err(|e| NodeServiceError::store_failed(e.to_string()))
    }

    /// Check if a node exists
    async fn node_exists(&self, id: &str) -> Result<bool, NodeServiceError> {
        self.store
            .node_exists(id)
            .await
            .map_err(|e| NodeServiceError::store_failed(e.to_string()))
    }

    /// Check if `potential_descendant` sits in the subtree of `node_id`
    ///
    /// Walks up the parent chain from `potential_descendant`; finding
    /// `node_id` on the way means the candidate is a descendant. The
    /// walk ends at a root (no parent) or at the loop bound.
    async fn is_descendant(
        &self,
        node_id: &str,
        potential_descendant: &str,
    ) -> Result<bool, NodeServiceError> {
        let mut current_id = potential_descendant.to_string();

        for _ in 0..MAX_ANCESTOR_WALK {
            if current_id == node_id {
                return Ok(true);
            }

            match self.find_node(&current_id).await? {
                Some(node) => match node.parent_id {
                    Some(parent_id) => current_id = parent_id,
                    None => break,
                },
                None => break,
            }
        }

        Ok(false)
    }

    /// Recursively build the tree view for a node
    ///
    /// Fetches direct children from the store and recurses per child;
    /// each node in the subtree is visited exactly once.
    fn build_tree<'a>(
        &'a self,
        node: &'a Node,
    ) -> Pin<Box<dyn Future<Output = Result<NodeTree, NodeServiceError>> + Send + 'a>> {
        Box::pin(async move {
            let children = self.list_children(Some(&node.id)).await?;

            let mut views = Vec::with_capacity(children.len());
            for child in &children {
                views.push(self.build_tree(child).await?);
            }

            Ok(NodeTree {
                id: node.id.clone(),
                title: node.title.clone(),
                category: node.category.clone(),
                mastery: node.mastery,
                children: views,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn test_service() -> NodeService {
        NodeService::new(Arc::new(MemoryStore::new()))
    }

    fn params(title: &str, parent_id: Option<&str>) -> CreateNodeParams {
        CreateNodeParams {
            title: title.to_string(),
            description: None,
            category: None,
            mastery: 50,
            parent_id: parent_id.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_create_root_node() {
        let service = test_service();

        let node = service.create_node(params("Rust", None)).await.unwrap();
        assert_eq!(node.title, "Rust");
        assert_eq!(node.mastery, 50);
        assert!(node.parent_id.is_none());
        assert!(!node.id.is_empty());
    }

    #[tokio::test]
    async fn test_create_node_under_parent() {
        let service = test_service();
        let root = service.create_node(params("Rust", None)).await.unwrap();

        let child = service
            .create_node(params("Lifetimes", Some(&root.id)))
            .await
            .unwrap();
        assert_eq!(child.parent_id.as_deref(), Some(root.id.as_str()));
    }

    #[tokio::test]
    async fn test_create_node_missing_parent() {
        let service = test_service();

        let result = service.create_node(params("Rust", Some("missing"))).await;
        assert!(matches!(
            result.unwrap_err(),
            NodeServiceError::InvalidParent { .. }
        ));
    }

    #[tokio::test]
    async fn test_get_node_not_found() {
        let service = test_service();

        let result = service.get_node("missing").await;
        assert!(matches!(
            result.unwrap_err(),
            NodeServiceError::NodeNotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_update_node_overwrites_content() {
        let service = test_service();
        let root = service.create_node(params("Root", None)).await.unwrap();
        let node = service
            .create_node(CreateNodeParams {
                title: "Rust".to_string(),
                description: Some("Notes".to_string()),
                category: Some("Programming".to_string()),
                mastery: 40,
                parent_id: Some(root.id.clone()),
            })
            .await
            .unwrap();

        std::thread::sleep(std::time::Duration::from_millis(1));

        let updated = service
            .update_node(
                &node.id,
                NodeUpdate {
                    title: "Advanced Rust".to_string(),
                    description: None,
                    category: Some("Languages".to_string()),
                    mastery: 75,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Advanced Rust");
        assert_eq!(updated.description, None);
        assert_eq!(updated.category.as_deref(), Some("Languages"));
        assert_eq!(updated.mastery, 75);
        // Structure is untouched
        assert_eq!(updated.parent_id.as_deref(), Some(root.id.as_str()));
        assert_eq!(updated.created_at, node.created_at);
        assert!(updated.updated_at > node.updated_at);
    }

    #[tokio::test]
    async fn test_update_node_not_found() {
        let service = test_service();

        let result = service
            .update_node(
                "missing",
                NodeUpdate {
                    title: "Title".to_string(),
                    description: None,
                    category: None,
                    mastery: 0,
                },
            )
            .await;
        assert!(matches!(
            result.unwrap_err(),
            NodeServiceError::NodeNotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_list_children_and_roots() {
        let service = test_service();
        let root_a = service.create_node(params("A", None)).await.unwrap();
        let _root_b = service.create_node(params("B", None)).await.unwrap();
        let child = service
            .create_node(params("A1", Some(&root_a.id)))
            .await
            .unwrap();

        let roots = service.list_children(None).await.unwrap();
        assert_eq!(roots.len(), 2);

        let children = service.list_children(Some(&root_a.id)).await.unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id, child.id);
    }

    #[tokio::test]
    async fn test_delete_node_not_found() {
        let service = test_service();

        let result = service.delete_node("missing").await;
        assert!(matches!(
            result.unwrap_err(),
            NodeServiceError::NodeNotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_delete_cascades_to_descendants() {
        let service = test_service();
        let root = service.create_node(params("A", None)).await.unwrap();
        let child = service
            .create_node(params("B", Some(&root.id)))
            .await
            .unwrap();
        let grandchild = service
            .create_node(params("C", Some(&child.id)))
            .await
            .unwrap();

        service.delete_node(&root.id).await.unwrap();

        for id in [&root.id, &child.id, &grandchild.id] {
            assert!(matches!(
                service.get_node(id).await.unwrap_err(),
                NodeServiceError::NodeNotFound { .. }
            ));
        }
    }

    #[tokio::test]
    async fn test_move_node_to_new_parent() {
        let service = test_service();
        let root_a = service.create_node(params("A", None)).await.unwrap();
        let root_b = service.create_node(params("B", None)).await.unwrap();
        let child = service
            .create_node(params("A1", Some(&root_a.id)))
            .await
            .unwrap();

        let moved = service
            .move_node(&child.id, Some(&root_b.id))
            .await
            .unwrap();
        assert_eq!(moved.parent_id.as_deref(), Some(root_b.id.as_str()));

        assert!(service
            .list_children(Some(&root_a.id))
            .await
            .unwrap()
            .is_empty());
        assert_eq!(
            service.list_children(Some(&root_b.id)).await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn test_move_node_to_root() {
        let service = test_service();
        let root = service.create_node(params("A", None)).await.unwrap();
        let child = service
            .create_node(params("A1", Some(&root.id)))
            .await
            .unwrap();

        let moved = service.move_node(&child.id, None).await.unwrap();
        assert!(moved.parent_id.is_none());
        assert_eq!(service.list_children(None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_move_node_under_itself_rejected() {
        let service = test_service();
        let node = service.create_node(params("A", None)).await.unwrap();

        let result = service.move_node(&node.id, Some(&node.id)).await;
        assert!(matches!(
            result.unwrap_err(),
            NodeServiceError::HierarchyViolation(_)
        ));
    }

    #[tokio::test]
    async fn test_move_node_under_descendant_rejected() {
        let service = test_service();
        let a = service.create_node(params("A", None)).await.unwrap();
        let b = service.create_node(params("B", Some(&a.id))).await.unwrap();
        let c = service.create_node(params("C", Some(&b.id))).await.unwrap();

        // Direct child and deeper descendant both close a cycle
        for target in [&b.id, &c.id] {
            let result = service.move_node(&a.id, Some(target)).await;
            assert!(matches!(
                result.unwrap_err(),
                NodeServiceError::CircularReference { .. }
            ));
        }

        // The failed moves committed nothing
        assert!(service.get_node(&a.id).await.unwrap().parent_id.is_none());
    }

    #[tokio::test]
    async fn test_move_to_current_parent_is_idempotent() {
        let service = test_service();
        let root = service.create_node(params("A", None)).await.unwrap();
        let child = service
            .create_node(params("A1", Some(&root.id)))
            .await
            .unwrap();

        let moved = service
            .move_node(&child.id, Some(&root.id))
            .await
            .unwrap();
        assert_eq!(moved.parent_id.as_deref(), Some(root.id.as_str()));
        assert_eq!(
            service.list_children(Some(&root.id)).await.unwrap().len(),
            1
        );

        // Root to root succeeds trivially
        let still_root = service.move_node(&root.id, None).await.unwrap();
        assert!(still_root.parent_id.is_none());
    }

    #[tokio::test]
    async fn test_move_not_found_on_either_id() {
        let service = test_service();
        let node = service.create_node(params("A", None)).await.unwrap();

        assert!(matches!(
            service.move_node("missing", None).await.unwrap_err(),
            NodeServiceError::NodeNotFound { .. }
        ));
        assert!(matches!(
            service
                .move_node(&node.id, Some("missing"))
                .await
                .unwrap_err(),
            NodeServiceError::InvalidParent { .. }
        ));
    }
}

// Include tests
#[cfg(test)]
#[path = "node_service_tree_test.rs"]
mod node_service_tree_test;
