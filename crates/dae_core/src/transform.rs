//! Node transform operations.
//!
//! A node carries an ordered list of transform elements. Their order is
//! significant and is preserved from the document.

use dae_math::{Mat4, Mat4Ext, Vec3};

/// The six COLLADA transform elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransformKind {
    /// `<lookat>`: eye, interest point, up vector
    LookAt,

    /// `<rotate>`: axis and angle in degrees
    Rotate,

    /// `<translate>`
    Translate,

    /// `<scale>`
    Scale,

    /// `<skew>`: angle in degrees, rotation axis, translation axis
    Skew,

    /// `<matrix>`: 16 values in row-major order
    Matrix,
}

impl TransformKind {
    /// Map an element name to its transform kind.
    pub fn from_element(name: &str) -> Option<Self> {
        match name {
            "lookat" => Some(Self::LookAt),
            "rotate" => Some(Self::Rotate),
            "translate" => Some(Self::Translate),
            "scale" => Some(Self::Scale),
            "skew" => Some(Self::Skew),
            "matrix" => Some(Self::Matrix),
            _ => None,
        }
    }

    /// The element name this kind is read from.
    pub fn element_name(self) -> &'static str {
        match self {
            Self::LookAt => "lookat",
            Self::Rotate => "rotate",
            Self::Translate => "translate",
            Self::Scale => "scale",
            Self::Skew => "skew",
            Self::Matrix => "matrix",
        }
    }

    /// Number of values the element carries.
    pub fn arity(self) -> usize {
        match self {
            Self::LookAt => 9,
            Self::Rotate => 4,
            Self::Translate | Self::Scale => 3,
            Self::Skew => 7,
            Self::Matrix => 16,
        }
    }
}

/// A single parsed transform element.
///
/// Only the first `kind.arity()` slots of `values` are meaningful; the rest are zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub kind: TransformKind,
    pub values: [f32; 16],
}

impl Transform {
    /// Build a transform from exactly `kind.arity()` values.
    ///
    /// Returns `None` when the number of values does not match.
    pub fn from_values(kind: TransformKind, values: &[f32]) -> Option<Self> {
        if values.len() != kind.arity() {
            return None;
        }
        let mut slots = [0.0; 16];
        slots[..values.len()].copy_from_slice(values);
        Some(Self { kind, values: slots })
    }

    fn vec3_at(&self, index: usize) -> Vec3 {
        Vec3::new(self.values[index], self.values[index + 1], self.values[index + 2])
    }

    /// Convert this operation to a transformation matrix.
    pub fn to_matrix(&self) -> Mat4 {
        match self.kind {
            TransformKind::LookAt => {
                Mat4::look_at_frame(self.vec3_at(0), self.vec3_at(3), self.vec3_at(6))
            }
            TransformKind::Rotate => match self.vec3_at(0).try_normalize() {
                Some(axis) => Mat4::from_axis_angle(axis, self.values[3].to_radians()),
                None => Mat4::IDENTITY,
            },
            TransformKind::Translate => Mat4::from_translation(self.vec3_at(0)),
            TransformKind::Scale => Mat4::from_scale(self.vec3_at(0)),
            TransformKind::Skew => Mat4::skew(self.values[0], self.vec3_at(1), self.vec3_at(4)),
            TransformKind::Matrix => Mat4::from_row_major(&self.values),
        }
    }
}

/// Combine an ordered list of transform elements into a single matrix.
///
/// Elements are multiplied in document order, `M = T0 * T1 * ... * Tn`. The
/// first element is the outermost frame operation, so for points the last
/// element's matrix is applied first.
pub fn compose_transform(transforms: &[Transform]) -> Mat4 {
    let mut result = Mat4::IDENTITY;
    for transform in transforms {
        result *= transform.to_matrix();
    }
    result
}
