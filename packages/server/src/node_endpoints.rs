//! Node Endpoints
//!
//! REST surface over the node service:
//!
//! - `GET /api/health` - Health check endpoint
//! - `POST /api/nodes` - Create a new node
//! - `GET /api/nodes?parentId=` - List roots or children of a parent
//! - `GET /api/nodes/:id` - Get a node by ID
//! - `PUT /api/nodes/:id` - Overwrite a node's content fields
//! - `DELETE /api/nodes/:id` - Delete a node and its subtree
//! - `GET /api/nodes/:id/subtree` - Nested tree view rooted at a node
//! - `GET /api/nodes/tree` - Nested tree views of all roots
//! - `PATCH /api/nodes/:id/move` - Relocate a node under a new parent
//!
//! Request payloads are validated here, before the service is invoked;
//! every violated field is reported in one response.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, patch, post},
    Router,
};
use serde::{Deserialize, Serialize};

use skillvault_core::models::{validate_node_fields, Node, NodeTree, NodeUpdate};
use skillvault_core::services::CreateNodeParams;

use crate::{AppState, HttpError};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

/// Payload for `POST /api/nodes`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNodeRequest {
    title: Option<String>,
    description: Option<String>,
    category: Option<String>,
    #[serde(default)]
    mastery: i64,
    parent_id: Option<String>,
}

/// Payload for `PUT /api/nodes/:id`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNodeRequest {
    title: Option<String>,
    description: Option<String>,
    category: Option<String>,
    #[serde(default)]
    mastery: i64,
}

/// Payload for `PATCH /api/nodes/:id/move`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveNodeRequest {
    new_parent_id: Option<String>,
}

/// Query parameters for `GET /api/nodes`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNodesQuery {
    parent_id: Option<String>,
}

/// Validate content fields, collecting every violation into the
/// `fields` map of a single error response
fn check_content_fields(
    title: Option<&str>,
    description: Option<&str>,
    category: Option<&str>,
    mastery: i64,
) -> Result<(), HttpError> {
    let errors = validate_node_fields(title, description, category, mastery);
    if errors.is_empty() {
        return Ok(());
    }

    let mut fields = BTreeMap::new();
    for error in errors {
        fields.insert(error.field().to_string(), error.to_string());
    }
    Err(HttpError::validation(fields))
}

async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn create_node(
    State(state): State<AppState>,
    Json(req): Json<CreateNodeRequest>,
) -> Result<Json<Node>, HttpError> {
    check_content_fields(
        req.title.as_deref(),
        req.description.as_deref(),
        req.category.as_deref(),
        req.mastery,
    )?;

    let node = state
        .node_service
        .create_node(CreateNodeParams {
            title: req.title.unwrap_or_default(),
            description: req.description,
            category: req.category,
            mastery: req.mastery,
            parent_id: req.parent_id,
        })
        .await?;

    Ok(Json(node))
}

async fn get_node(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Node>, HttpError> {
    let node = state.node_service.get_node(&id).await?;
    Ok(Json(node))
}

async fn update_node(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateNodeRequest>,
) -> Result<Json<Node>, HttpError> {
    check_content_fields(
        req.title.as_deref(),
        req.description.as_deref(),
        req.category.as_deref(),
        req.mastery,
    )?;

    let node = state
        .node_service
        .update_node(
            &id,
            NodeUpdate {
                title: req.title.unwrap_or_default(),
                description: req.description,
                category: req.category,
                mastery: req.mastery,
            },
        )
        .await?;

    Ok(Json(node))
}

async fn list_nodes(
    State(state): State<AppState>,
    Query(query): Query<ListNodesQuery>,
) -> Result<Json<Vec<Node>>, HttpError> {
    let nodes = state
        .node_service
        .list_children(query.parent_id.as_deref())
        .await?;
    Ok(Json(nodes))
}

async fn delete_node(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(), HttpError> {
    state.node_service.delete_node(&id).await?;
    Ok(())
}

async fn get_subtree(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<NodeTree>, HttpError> {
    let tree = state.node_service.get_subtree(&id).await?;
    Ok(Json(tree))
}

async fn get_full_tree(State(state): State<AppState>) -> Result<Json<Vec<NodeTree>>, HttpError> {
    let forest = state.node_service.get_full_tree().await?;
    Ok(Json(forest))
}

async fn move_node(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<MoveNodeRequest>,
) -> Result<Json<Node>, HttpError> {
    let node = state
        .node_service
        .move_node(&id, req.new_parent_id.as_deref())
        .await?;
    Ok(Json(node))
}

/// Build the node routes with the shared application state
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/nodes", post(create_node).get(list_nodes))
        .route("/api/nodes/tree", get(get_full_tree))
        .route(
            "/api/nodes/:id",
            get(get_node).put(update_node).delete(delete_node),
        )
        .route("/api/nodes/:id/subtree", get(get_subtree))
        .route("/api/nodes/:id/move", patch(move_node))
        .with_state(state)
}
