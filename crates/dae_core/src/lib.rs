//! DAE Core - COLLADA document parsing for the DAE import pipeline.
//!
//! This crate provides:
//!
//! - **Node arena**: `NodeArena`, `Node`, `NodeId` (scene hierarchy with an ID library)
//! - **Data library**: raw float arrays and strided `Accessor` views over them
//! - **Transforms**: the six COLLADA transform elements and their composition
//! - **COLLADA support**: structural parsing of `.dae` documents
//!
//! The parser does not assemble a renderable scene. References between
//! accessors and arrays, or nodes and geometries, are kept as IDs and
//! resolved by the consumer.
//!
//! # Example
//!
//! ```ignore
//! use dae_core::collada::load_collada;
//!
//! let document = load_collada("scene.dae")?;
//! println!("Loaded {} nodes, {} data arrays",
//!     document.nodes.len(),
//!     document.data.len());
//! ```

pub mod collada;
pub mod data;
pub mod nodes;
pub mod transform;

// Re-export commonly used types
pub use collada::{load_collada, parse_collada, ColladaDocument, ColladaParser, ParserOptions};
pub use data::{Accessor, AccessorParam, Data, DataLibrary, ResolveError};
pub use nodes::{Node, NodeArena, NodeId};
pub use transform::{compose_transform, Transform, TransformKind};
