//! Shared types for displaced array views.
//!
//! Everything here is plain data: the error enum every view operation
//! returns, the ownership and kind tags of a view, and a serializable
//! geometry snapshot. Nothing in this crate touches element storage.
//!
//! # Coordinates
//!
//! A view of rank `R` keeps two per-axis vectors in *backing* coordinates:
//!
//! | Field | Meaning |
//! |-------|---------|
//! | `start` | first backing subscript covered by the view |
//! | `fill_pointer` | exclusive upper bound of the view |
//!
//! The logical extent along axis `i` is `fill_pointer[i] - start[i]`, and
//! `0 <= start[i] <= fill_pointer[i] <= capacity[i]` holds on every axis.
//!
//! # Examples
//!
//! ```
//! use dispview_types::{Ownership, Param, ViewError};
//!
//! let err = ViewError::ArityMismatch { param: Param::FillPointer, expected: 2, got: 3 };
//! assert_eq!(err.to_string(), "invalid shape/offset specification: fill pointer has 3 axes, expected 2");
//! assert!(Ownership::Private.may_grow());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which caller-supplied vector an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Param {
    Shape,
    Start,
    FillPointer,
    Capacity,
}

impl Param {
    pub fn as_str(&self) -> &'static str {
        match self {
            Param::Shape => "shape",
            Param::Start => "start",
            Param::FillPointer => "fill pointer",
            Param::Capacity => "capacity",
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced while building, resizing or indexing a view.
///
/// Every operation that returns one of these has left the view and its
/// backing store exactly as they were before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    /// A supplied vector does not have one entry per axis.
    #[error("invalid shape/offset specification: {param} has {got} axes, expected {expected}")]
    ArityMismatch {
        param: Param,
        expected: usize,
        got: usize,
    },

    /// `0 <= start <= fill_pointer <= capacity` does not hold on `axis`.
    #[error(
        "invalid shape/offset specification: axis {axis} needs start {start} <= fill pointer {fill_pointer} <= capacity {capacity}"
    )]
    OrderViolation {
        axis: usize,
        start: usize,
        fill_pointer: usize,
        capacity: usize,
    },

    /// An aliasing target and fresh-allocation initializers were both given.
    #[error(
        "invalid shape/offset specification: a backing store to alias cannot be combined with initial elements or contents"
    )]
    MutualExclusionViolation,

    /// A local subscript fell outside `[0, extent)` on `axis`.
    #[error("index {index} out of bounds on axis {axis} (extent {extent})")]
    IndexOutOfBounds {
        axis: usize,
        index: usize,
        extent: usize,
    },

    /// A row-major index fell outside `[0, len)`.
    #[error("row-major index {index} out of bounds (len {len})")]
    RowMajorOutOfBounds { index: usize, len: usize },

    /// The backing store cannot provide `requested` cells along `axis`.
    #[error("capacity exceeded on axis {axis}: requested {requested}, capacity {capacity}")]
    CapacityExceeded {
        axis: usize,
        requested: usize,
        capacity: usize,
    },

    /// Initial contents do not cover the allocation exactly.
    #[error("initial contents hold {got} elements, allocation needs {expected}")]
    ContentsMismatch { expected: usize, got: usize },

    /// The view owns its backing store privately; it cannot be shared.
    #[error("view owns its backing store privately and cannot be aliased")]
    NotAliasable,
}

/// How a view relates to its backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Ownership {
    /// The view allocated the store and may grow it on resize.
    Private,
    /// The store belongs to the caller and is never grown by the view.
    Aliased,
}

impl Ownership {
    pub fn may_grow(&self) -> bool {
        matches!(self, Ownership::Private)
    }
}

/// Closed classification of array-like values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArrayKind {
    /// Privately owned, window covers the whole store from the origin.
    Plain,
    /// Privately owned with a narrower window (spare capacity or offset).
    PrivateView,
    /// Window onto a caller-supplied store.
    AliasedView,
}

/// Point-in-time description of a view's placement in its store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewGeometry {
    pub rank: usize,
    pub kind: ArrayKind,
    pub ownership: Ownership,
    pub start: Vec<usize>,
    pub fill_pointer: Vec<usize>,
    pub shape: Vec<usize>,
    pub capacity: Vec<usize>,
}

impl ViewGeometry {
    /// Number of elements the view currently exposes.
    pub fn len(&self) -> usize {
        element_count(&self.shape)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Product of all extents; `1` for rank 0, `None` when it overflows `usize`.
#[inline]
pub fn checked_count(shape: &[usize]) -> Option<usize> {
    if shape.contains(&0) {
        return Some(0);
    }
    shape.iter().try_fold(1usize, |acc, &n| acc.checked_mul(n))
}

/// Product of all extents, saturating at `usize::MAX`.
#[inline]
pub fn element_count(shape: &[usize]) -> usize {
    checked_count(shape).unwrap_or(usize::MAX)
}
