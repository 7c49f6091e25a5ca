//! Service Layer Error Types
//!
//! This module defines error types for service-layer operations,
//! covering missing records, structurally disallowed relocations, and
//! storage failures.

use thiserror::Error;

/// Service operation errors
///
/// Every failure is a pure signal (kind plus offending identifier or
/// message); the service performs no logging, retry, or compensating
/// action. The transport layer maps each kind to a user-facing status.
#[derive(Error, Debug)]
pub enum NodeServiceError {
    /// Node not found by ID
    #[error("Node not found: {id}")]
    NodeNotFound { id: String },

    /// Referenced parent node does not exist
    #[error("Parent node not found: {parent_id}")]
    InvalidParent { parent_id: String },

    /// Relocation would create a parent cycle
    #[error("Circular reference detected: {context}")]
    CircularReference { context: String },

    /// Node hierarchy constraint violation
    #[error("Hierarchy constraint violated: {0}")]
    HierarchyViolation(String),

    /// Store operation failed
    #[error("Store operation failed: {0}")]
    StoreFailed(String),
}

impl NodeServiceError {
    /// Create a node not found error
    pub fn node_not_found(id: impl Into<String>) -> Self {
        Self::NodeNotFound { id: id.into() }
    }

    /// Create an invalid parent error
    pub fn invalid_parent(parent_id: impl Into<String>) -> Self {
        Self::InvalidParent {
            parent_id: parent_id.into(),
        }
    }

    /// Create a circular reference error
    pub fn circular_reference(context: impl Into<String>) -> Self {
        Self::CircularReference {
            context: context.into(),
        }
    }

    /// Create a hierarchy violation error
    pub fn hierarchy_violation(msg: impl Into<String>) -> Self {
        Self::HierarchyViolation(msg.into())
    }

    /// Create a store failed error
    pub fn store_failed(msg: impl Into<String>) -> Self {
        Self::StoreFailed(msg.into())
    }
}
