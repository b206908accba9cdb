// Re-export glam for convenience
pub use glam::*;

// DAE math helpers
mod transform;
pub use transform::Mat4Ext;
