//! Node Data Structures
//!
//! This module defines the core `Node` struct for the skill hierarchy,
//! the content-update payload, and the nested tree projection returned
//! by subtree queries.
//!
//! # Architecture
//!
//! - **Flat records**: every node carries an optional `parent_id`
//!   back-reference; child lists are derived by the store, never owned
//!   by the parent record
//! - **Forest shape**: nodes with no parent are roots; the parent graph
//!   must stay acyclic under relocation
//!
//! # Examples
//!
//! ```rust
//! use skillvault_core::models::Node;
//!
//! // Create a root skill
//! let root = Node::new(
//!     "Programming".to_string(),
//!     None,
//!     Some("Engineering".to_string()),
//!     40,
//!     None,
//! );
//!
//! // Create a child skill under it
//! let child = Node::new(
//!     "Rust".to_string(),
//!     Some("Ownership, lifetimes, async".to_string()),
//!     Some("Engineering".to_string()),
//!     25,
//!     Some(root.id.clone()),
//! );
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Maximum length of a node title, in characters
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum length of a node description, in characters
pub const MAX_DESCRIPTION_LEN: usize = 5000;

/// Maximum length of a node category, in characters
pub const MAX_CATEGORY_LEN: usize = 100;

/// Inclusive bounds for the mastery score
pub const MASTERY_RANGE: std::ops::RangeInclusive<i64> = 0..=100;

/// Field-level validation errors for node content
///
/// Raised at the request boundary before a payload reaches the service
/// layer; the service assumes content fields are already valid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title is required and cannot be blank")]
    MissingTitle,

    #[error("Title must be between 1 and 200 characters")]
    TitleTooLong,

    #[error("Description cannot exceed 5000 characters")]
    DescriptionTooLong,

    #[error("Category cannot exceed 100 characters")]
    CategoryTooLong,

    #[error("Mastery must be between 0 and 100")]
    MasteryOutOfRange,
}

impl ValidationError {
    /// Name of the payload field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingTitle | ValidationError::TitleTooLong => "title",
            ValidationError::DescriptionTooLong => "description",
            ValidationError::CategoryTooLong => "category",
            ValidationError::MasteryOutOfRange => "mastery",
        }
    }
}

/// Validate node content fields, collecting every violation
///
/// `title` is `None` when the payload omitted it entirely; the other
/// fields are optional by contract. Returns an empty vector when the
/// content is acceptable.
pub fn validate_node_fields(
    title: Option<&str>,
    description: Option<&str>,
    category: Option<&str>,
    mastery: i64,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    match title {
        None => errors.push(ValidationError::MissingTitle),
        Some(t) if t.trim().is_empty() => errors.push(ValidationError::MissingTitle),
        Some(t) if t.chars().count() > MAX_TITLE_LEN => errors.push(ValidationError::TitleTooLong),
        Some(_) => {}
    }

    if let Some(d) = description {
        if d.chars().count() > MAX_DESCRIPTION_LEN {
            errors.push(ValidationError::DescriptionTooLong);
        }
    }

    if let Some(c) = category {
        if c.chars().count() > MAX_CATEGORY_LEN {
            errors.push(ValidationError::CategoryTooLong);
        }
    }

    if !MASTERY_RANGE.contains(&mastery) {
        errors.push(ValidationError::MasteryOutOfRange);
    }

    errors
}

/// A single entry in the skill hierarchy
///
/// # Fields
///
/// - `id`: Unique identifier (UUID v4, assigned at creation, immutable)
/// - `title`: Skill or topic name
/// - `description`: Optional free-text notes
/// - `category`: Optional grouping label
/// - `mastery`: Self-assessed score in `[0, 100]`
/// - `parent_id`: Optional reference to the parent node; `None` means
///   this node is a root
/// - `created_at`: Timestamp set once at creation
/// - `updated_at`: Timestamp refreshed on every mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique identifier (UUID v4)
    pub id: String,

    /// Skill or topic name
    pub title: String,

    /// Free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Grouping label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Mastery score in `[0, 100]`
    pub mastery: i64,

    /// Parent node reference; `None` for roots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Node {
    /// Create a new Node with an auto-generated UUID and fresh timestamps
    pub fn new(
        title: String,
        description: Option<String>,
        category: Option<String>,
        mastery: i64,
        parent_id: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            description,
            category,
            mastery,
            parent_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the four content fields from an update payload
    ///
    /// The parent reference and both timestamps are left untouched;
    /// `updated_at` is refreshed by the store when the node is saved.
    pub fn apply_update(&mut self, update: NodeUpdate) {
        self.title = update.title;
        self.description = update.description;
        self.category = update.category;
        self.mastery = update.mastery;
    }

    /// Validate this node's content fields, returning the first violation
    pub fn validate(&self) -> Result<(), ValidationError> {
        match validate_node_fields(
            Some(&self.title),
            self.description.as_deref(),
            self.category.as_deref(),
            self.mastery,
        )
        .into_iter()
        .next()
        {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Content-update payload for a node
///
/// Carries the four mutable content fields; all of them are overwritten
/// on update, so an omitted optional field clears the stored value. The
/// parent reference is never part of an update (relocation is a separate
/// operation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeUpdate {
    /// New title
    pub title: String,

    /// New description (`None` clears it)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// New category (`None` clears it)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// New mastery score
    #[serde(default)]
    pub mastery: i64,
}

/// Nested tree projection of a node and its descendants
///
/// A lightweight summary view: description, timestamps, and the parent
/// reference are intentionally omitted. Children are materialized
/// recursively from the store's child index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeTree {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub mastery: i64,
    pub children: Vec<NodeTree>,
}

/// Outcome of a cascading delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteResult {
    /// Whether the target node existed before deletion
    pub existed: bool,

    /// Number of records removed (the node plus all descendants)
    pub deleted_count: usize,
}

impl DeleteResult {
    /// The node existed; `count` records were removed
    pub fn deleted(count: usize) -> Self {
        Self {
            existed: true,
            deleted_count: count,
        }
    }

    /// The node did not exist; nothing was removed
    pub fn not_found() -> Self {
        Self {
            existed: false,
            deleted_count: 0,
        }
    }
}
