//! Intermediate representation produced by the COLLADA parser.

use std::collections::HashMap;

use crate::data::{Accessor, DataLibrary, ResolveError};
use crate::nodes::{Node, NodeArena, NodeId};

/// The axis pointing up in the authored document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum UpAxis {
    X,
    #[default]
    Y,
    Z,
}

impl UpAxis {
    /// Parse an `<up_axis>` value (`X_UP`, `Y_UP`, `Z_UP`).
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "X_UP" => Some(Self::X),
            "Y_UP" => Some(Self::Y),
            "Z_UP" => Some(Self::Z),
            _ => None,
        }
    }
}

/// Document-wide metadata from `<asset>`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AssetInfo {
    /// Size of one document unit in meters
    pub unit_size: f32,

    pub up_axis: UpAxis,
}

impl Default for AssetInfo {
    fn default() -> Self {
        Self {
            unit_size: 1.0,
            up_axis: UpAxis::Y,
        }
    }
}

/// A `<geometry>` entry. Only the data sources of its mesh are kept.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    pub id: String,
    pub name: Option<String>,

    /// IDs of the `<source>` elements declared by the mesh
    pub sources: Vec<String>,
}

/// Where the dispatcher currently is in the document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ParserState {
    #[default]
    Start,
    InAsset,
    InStructure,
    InGeometryLibrary,
    InSceneLibrary,
    SceneSelected,
    Done,
}

/// Everything read from one COLLADA document.
#[derive(Clone, Debug, Default)]
pub struct ColladaDocument {
    /// All nodes and the ID library
    pub nodes: NodeArena,

    /// Float arrays by ID
    pub data: DataLibrary,

    /// Accessors by the ID of their enclosing `<source>`
    pub accessors: HashMap<String, Accessor>,

    /// Geometries by ID
    pub geometries: HashMap<String, Geometry>,

    /// Root nodes of each `<visual_scene>`, in document order
    pub visual_scenes: Vec<NodeId>,

    pub asset: AssetInfo,

    /// The selected scene root (a visual scene handle)
    pub root: Option<NodeId>,
}

impl ColladaDocument {
    /// The selected scene root node.
    pub fn root_node(&self) -> Option<&Node> {
        self.root.and_then(|id| self.nodes.get(id))
    }

    /// Look up a node by library ID.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.lookup(id).and_then(|handle| self.nodes.get(handle))
    }

    /// Read the tuples of the accessor declared in `<source id=source_id>`.
    pub fn read_source(&self, source_id: &str) -> Result<Vec<&[f32]>, ResolveError> {
        let accessor = self
            .accessors
            .get(source_id)
            .ok_or_else(|| ResolveError::UnresolvedReference(source_id.to_string()))?;
        self.data.read_accessor_tuples(accessor)
    }
}
