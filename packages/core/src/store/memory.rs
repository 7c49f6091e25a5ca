//! MemoryStore - In-Memory NodeStore Implementation
//!
//! Flat keyed storage for node records: a map from id to `Node` plus a
//! maintained secondary index from parent id to the set of child ids.
//! Both live behind a single `RwLock`, so every store operation is one
//! atomic unit of work.
//!
//! The child index is keyed by `Option<String>`; the `None` bucket
//! holds the roots. Child sets are `BTreeSet`s, which gives child
//! listings a deterministic id order.

use std::collections::{BTreeSet, HashMap, VecDeque};
use std::sync::RwLock;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;

use crate::models::{DeleteResult, Node};
use crate::store::NodeStore;

#[derive(Default)]
struct StoreInner {
    nodes: HashMap<String, Node>,
    children: HashMap<Option<String>, BTreeSet<String>>,
}

impl StoreInner {
    fn link(&mut self, parent_id: &Option<String>, id: &str) {
        self.children
            .entry(parent_id.clone())
            .or_default()
            .insert(id.to_string());
    }

    fn unlink(&mut self, parent_id: &Option<String>, id: &str) {
        if let Some(siblings) = self.children.get_mut(parent_id) {
            siblings.remove(id);
            if siblings.is_empty() {
                self.children.remove(parent_id);
            }
        }
    }
}

/// In-memory node store backing the service layer
pub struct MemoryStore {
    inner: RwLock<StoreInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner::default()),
        }
    }

    /// Create a store pre-populated with the given nodes
    ///
    /// Useful for tests; the child index is built from each node's
    /// `parent_id` as it is inserted.
    pub fn with_nodes(nodes: Vec<Node>) -> Self {
        let mut inner = StoreInner::default();
        for node in nodes {
            inner.link(&node.parent_id, &node.id);
            inner.nodes.insert(node.id.clone(), node);
        }
        Self {
            inner: RwLock::new(inner),
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, StoreInner>> {
        self.inner.read().map_err(|_| anyhow!("store lock poisoned"))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, StoreInner>> {
        self.inner
            .write()
            .map_err(|_| anyhow!("store lock poisoned"))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NodeStore for MemoryStore {
    async fn save_node(&self, mut node: Node) -> Result<Node> {
        let mut inner = self.write()?;

        let previous_parent = match inner.nodes.get(&node.id) {
            Some(existing) => {
                node.created_at = existing.created_at;
                node.updated_at = Utc::now();
                Some(existing.parent_id.clone())
            }
            None => None,
        };

        match previous_parent {
            Some(old_parent) if old_parent != node.parent_id => {
                inner.unlink(&old_parent, &node.id);
                inner.link(&node.parent_id, &node.id);
            }
            None => inner.link(&node.parent_id, &node.id),
            _ => {}
        }

        inner.nodes.insert(node.id.clone(), node.clone());
        Ok(node)
    }

    async fn get_node(&self, id: &str) -> Result<Option<Node>> {
        let inner = self.read()?;
        Ok(inner.nodes.get(id).cloned())
    }

    async fn get_children(&self, parent_id: Option<&str>) -> Result<Vec<Node>> {
        let inner = self.read()?;
        let key = parent_id.map(str::to_string);
        let Some(ids) = inner.children.get(&key) else {
            return Ok(Vec::new());
        };
        Ok(ids
            .iter()
            .filter_map(|id| inner.nodes.get(id).cloned())
            .collect())
    }

    async fn node_exists(&self, id: &str) -> Result<bool> {
        let inner = self.read()?;
        Ok(inner.nodes.contains_key(id))
    }

    async fn delete_node(&self, id: &str) -> Result<DeleteResult> {
        let mut inner = self.write()?;

        let Some(target) = inner.nodes.get(id).cloned() else {
            return Ok(DeleteResult::not_found());
        };

        // Breadth-first collection of the doomed subtree over the
        // child index, then removal of the whole set under the same
        // write lock.
        let mut doomed = vec![target.id.clone()];
        let mut queue = VecDeque::from([target.id.clone()]);
        while let Some(current) = queue.pop_front() {
            if let Some(kids) = inner.children.get(&Some(current)) {
                for kid in kids {
                    doomed.push(kid.clone());
                    queue.push_back(kid.clone());
                }
            }
        }

        for doomed_id in &doomed {
            inner.nodes.remove(doomed_id);
            inner.children.remove(&Some(doomed_id.clone()));
        }
        inner.unlink(&target.parent_id, &target.id);

        tracing::debug!(node_id = id, removed = doomed.len(), "cascade delete");
        Ok(DeleteResult::deleted(doomed.len()))
    }
}
