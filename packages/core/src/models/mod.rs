//! Data Models
//!
//! This module contains the core data structures used throughout
//! Skillvault:
//!
//! - `Node` - A single skill/topic entry with an optional parent
//!   back-reference
//! - `NodeUpdate` - Content-update payload (title, description,
//!   category, mastery)
//! - `NodeTree` - Nested summary projection of a subtree
//! - `DeleteResult` - Outcome of a cascading delete
//!
//! Validation limits and the field-level `ValidationError` type live
//! here as well; they are enforced at the request boundary, not inside
//! the service layer.

mod node;

pub use node::{
    validate_node_fields, DeleteResult, Node, NodeTree, NodeUpdate, ValidationError,
    MASTERY_RANGE, MAX_CATEGORY_LEN, MAX_DESCRIPTION_LEN, MAX_TITLE_LEN,
};
