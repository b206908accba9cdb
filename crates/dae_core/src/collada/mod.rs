//! COLLADA (`.dae`) support for DAE.
//!
//! This module reads the structure of a COLLADA document into the
//! intermediate representation: node hierarchies, raw data arrays with their
//! accessors, and asset metadata.
//!
//! ## Supported Elements
//!
//! - `<asset>`: `<unit meter>`, `<up_axis>`
//! - `<library_geometries>`: `<source>` arrays and accessors of each `<mesh>`
//! - `<library_visual_scenes>` / `<library_nodes>`: node trees with transforms
//! - `<scene>`: `<instance_visual_scene>` selection
//!
//! Everything else is skipped without interpretation. Mesh topology,
//! materials, controllers and animations are left to the scene assembly.
//!
//! # Example
//!
//! ```ignore
//! use dae_core::collada::parse_collada;
//!
//! let document = parse_collada(&xml)?;
//! if let Some(root) = document.root_node() {
//!     println!("Scene root: {}", root.name);
//! }
//! ```

mod error;
mod loader;
mod options;
mod parser;
mod reader;
mod source;
mod types;

pub use error::*;
pub use loader::*;
pub use options::*;
pub use parser::*;
pub use source::*;
pub use types::*;
