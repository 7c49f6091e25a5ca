//! Business Services
//!
//! This module contains the core business logic:
//!
//! - `NodeService` - CRUD operations, relocation with cycle detection,
//!   and tree/subtree materialization
//!
//! Services coordinate between the storage layer and application
//! logic, implementing the hierarchy rules and orchestrating
//! traversals.

pub mod error;
pub mod node_service;

pub use error::NodeServiceError;
pub use node_service::{CreateNodeParams, NodeService};
