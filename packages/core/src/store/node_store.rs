//! NodeStore Trait - Storage Abstraction Layer
//!
//! This module defines the `NodeStore` trait that abstracts persistence
//! operations for nodes. The trait is the seam between `NodeService`
//! (hierarchy rules and traversal) and a concrete backend, so backends
//! can be swapped without touching business logic.
//!
//! # Design Decisions
//!
//! 1. **Async-First**: all methods are async so embedded and network
//!    backends share one contract
//! 2. **Ownership Semantics**: `save_node` takes the node by value;
//!    callers clone if they need to retain the original
//! 3. **Error Handling**: `anyhow::Result` for flexible error context;
//!    the service layer wraps failures in its own error type
//! 4. **Derived children**: child lists are answered from a parent
//!    index, never stored on the parent record

use crate::models::{DeleteResult, Node};
use anyhow::Result;
use async_trait::async_trait;

/// Abstraction layer for node persistence operations
///
/// Implementations must be `Send + Sync` so the service can be shared
/// across async tasks.
#[async_trait]
pub trait NodeStore: Send + Sync {
    /// Insert or replace a node record
    ///
    /// On first save the node is stored as given. When the id already
    /// exists the record is replaced, `created_at` is preserved from
    /// the stored record, and `updated_at` is refreshed.
    ///
    /// Returns the node as persisted (with the refreshed timestamp).
    async fn save_node(&self, node: Node) -> Result<Node>;

    /// Get node by ID
    ///
    /// Returns `Ok(None)` when the node doesn't exist; `Err` is
    /// reserved for storage failures.
    async fn get_node(&self, id: &str) -> Result<Option<Node>>;

    /// Get all children of a parent node
    ///
    /// `parent_id` of `None` fetches the roots (nodes without a
    /// parent). Order is store-defined but deterministic.
    async fn get_children(&self, parent_id: Option<&str>) -> Result<Vec<Node>>;

    /// Check whether a node with the given id exists
    async fn node_exists(&self, id: &str) -> Result<bool>;

    /// Delete a node and its entire descendant subtree
    ///
    /// # Cascade Delete Semantics
    ///
    /// - The target node and every transitive descendant are removed
    ///   in one atomic unit of work; no partial deletions
    /// - Deleting a non-existent node succeeds and reports
    ///   `existed: false` (idempotent delete); the caller decides
    ///   whether that is an error
    /// - The returned count covers the node plus all descendants
    async fn delete_node(&self, id: &str) -> Result<DeleteResult>;
}
