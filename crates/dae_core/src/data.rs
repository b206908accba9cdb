//! Raw numeric arrays and strided accessors.
//!
//! A `<float_array>` becomes a [`Data`] entry keyed by its ID. An
//! `<accessor>` only names the array it views; the lookup happens when a
//! consumer reads it through [`DataLibrary::read_accessor_tuples`]. Arrays may
//! be declared after the accessors that use them.

use std::collections::HashMap;

use thiserror::Error;

/// Errors raised when an accessor is resolved against the data library.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("unresolved reference '#{0}'")]
    UnresolvedReference(String),

    #[error("tuple {index} of accessor over '#{array}' runs past the array end ({len} values)")]
    OutOfBounds {
        array: String,
        index: usize,
        len: usize,
    },
}

/// A flat, unshaped sequence of floats.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Data {
    pub values: Vec<f32>,
}

impl Data {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One `<param>` of an accessor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessorParam {
    /// Component name (`X`, `S`, ...). Unnamed params mark skipped slots.
    pub name: Option<String>,

    /// Declared value type, `float` if absent
    pub value_type: String,
}

/// A strided view over a data array.
#[derive(Clone, Debug, PartialEq)]
pub struct Accessor {
    /// Number of tuples
    pub count: usize,

    /// Index of the first value, in values
    pub offset: usize,

    /// Distance between tuple starts, in values
    pub stride: usize,

    /// ID of the viewed data array (without the leading `#`)
    pub source: String,

    pub params: Vec<AccessorParam>,
}

impl Accessor {
    /// Number of values in each tuple.
    ///
    /// This is the param count when params are declared, the stride otherwise.
    pub fn tuple_width(&self) -> usize {
        if self.params.is_empty() {
            self.stride
        } else {
            self.params.len()
        }
    }
}

/// Data arrays keyed by ID.
#[derive(Clone, Debug, Default)]
pub struct DataLibrary {
    arrays: HashMap<String, Data>,
}

impl DataLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an array, returning the previous entry with the same ID if any.
    pub fn insert(&mut self, id: impl Into<String>, data: Data) -> Option<Data> {
        self.arrays.insert(id.into(), data)
    }

    pub fn get(&self, id: &str) -> Option<&Data> {
        self.arrays.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.arrays.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Data)> {
        self.arrays.iter().map(|(id, data)| (id.as_str(), data))
    }

    /// Read the tuples an accessor describes.
    ///
    /// Returns exactly `accessor.count` slices. Tuple `i` starts at
    /// `offset + i * stride` and is `tuple_width()` values long.
    pub fn read_accessor_tuples(&self, accessor: &Accessor) -> Result<Vec<&[f32]>, ResolveError> {
        let data = self
            .get(&accessor.source)
            .ok_or_else(|| ResolveError::UnresolvedReference(accessor.source.clone()))?;
        let width = accessor.tuple_width();

        (0..accessor.count)
            .map(|index| {
                index
                    .checked_mul(accessor.stride)
                    .and_then(|step| step.checked_add(accessor.offset))
                    .and_then(|start| Some(start..start.checked_add(width)?))
                    .and_then(|range| data.values.get(range))
                    .ok_or_else(|| ResolveError::OutOfBounds {
                        array: accessor.source.clone(),
                        index,
                        len: data.len(),
                    })
            })
            .collect()
    }
}
