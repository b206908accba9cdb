//! Scene node hierarchy.
//!
//! All nodes of a document live in one [`NodeArena`] and refer to each other
//! through [`NodeId`] handles. A node is owned by exactly one parent's
//! `children` list, or by nobody if it is a root. The ID library maps
//! document IDs to handles without taking ownership, so a node can be both a
//! library entry and somebody's child.

use std::collections::HashMap;
use std::ops::{Index, IndexMut};

use dae_math::Mat4;

use crate::transform::{compose_transform, Transform};

/// Stable handle to a node in a [`NodeArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A point in the scene hierarchy.
#[derive(Clone, Debug, Default)]
pub struct Node {
    /// Display name (falls back to the ID)
    pub name: String,

    /// Library key, if the node has one
    pub id: Option<String>,

    /// Scoped ID, used by animation targets
    pub sid: Option<String>,

    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,

    /// Transform elements in document order
    pub transforms: Vec<Transform>,

    /// `<instance_geometry>` targets (geometry IDs, unresolved)
    pub geometry_instances: Vec<String>,

    /// `<instance_node>` targets (node IDs, unresolved)
    pub node_instances: Vec<String>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Transform from this node's frame into its parent's frame.
    pub fn local_transform(&self) -> Mat4 {
        compose_transform(&self.transforms)
    }
}

/// Owner of every node in a document, plus the ID library.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
    library: HashMap<String, NodeId>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and link it under `parent`, returning its handle.
    pub fn add_node(&mut self, mut node: Node, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = parent;
        self.nodes.push(node);
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Register `node` in the library under `key`.
    ///
    /// On a duplicate key the existing entry is kept and returned as the error.
    pub fn register(&mut self, key: impl Into<String>, node: NodeId) -> Result<(), NodeId> {
        let key = key.into();
        if let Some(&existing) = self.library.get(&key) {
            return Err(existing);
        }
        self.library.insert(key, node);
        Ok(())
    }

    /// Look up a library entry by ID.
    pub fn lookup(&self, key: &str) -> Option<NodeId> {
        self.library.get(key).copied()
    }

    /// Iterate over library entries.
    pub fn library(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.library.iter().map(|(key, &id)| (key.as_str(), id))
    }

    pub fn library_len(&self) -> usize {
        self.library.len()
    }

    /// Total number of nodes, including anonymous ones.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all handles in allocation order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Nodes without a parent.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.ids().filter(|&id| self.nodes[id.0].parent.is_none())
    }

    /// All nodes below `root`, depth-first, excluding `root` itself.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self[root].children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            result.push(id);
            stack.extend(self[id].children.iter().rev().copied());
        }
        result
    }

    /// Transform from `id`'s frame into the frame of its root.
    pub fn world_transform(&self, id: NodeId) -> Mat4 {
        let mut result = self[id].local_transform();
        let mut current = self[id].parent;
        while let Some(parent) = current {
            result = self[parent].local_transform() * result;
            current = self[parent].parent;
        }
        result
    }
}

impl Index<NodeId> for NodeArena {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for NodeArena {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }
}
