//! Index translation - pure per-axis arithmetic
//!
//! Converts between row-major positions and subscripts, and translates a
//! view's local subscripts into backing-store subscripts.
//! Row-major means axis 0 varies slowest and the last axis fastest.
//! Nothing here allocates; everything is O(rank).

use crate::types::{checked_count, element_count, ViewError};

/// Logical extent per axis: `fill_pointer[i] - start[i]`.
#[inline]
pub fn shape_of<const R: usize>(start: &[usize; R], fill_pointer: &[usize; R]) -> [usize; R] {
    let mut shape = [0usize; R];
    for axis in 0..R {
        shape[axis] = fill_pointer[axis] - start[axis];
    }
    shape
}

/// Translate local subscripts into backing subscripts.
///
/// Fails on the first axis where `local[i] >= shape[i]`.
#[inline]
pub fn to_backing<const R: usize>(
    start: &[usize; R],
    fill_pointer: &[usize; R],
    local: &[usize; R],
) -> Result<[usize; R], ViewError> {
    let mut at = [0usize; R];
    for axis in 0..R {
        let extent = fill_pointer[axis] - start[axis];
        if local[axis] >= extent {
            return Err(ViewError::IndexOutOfBounds {
                axis,
                index: local[axis],
                extent,
            });
        }
        at[axis] = start[axis] + local[axis];
    }
    Ok(at)
}

/// Row-major weight of every axis: the product of all faster extents.
///
/// `None` when the element count of `shape` overflows `usize`.
#[inline]
pub fn weights<const R: usize>(shape: &[usize; R]) -> Option<[usize; R]> {
    checked_count(shape)?;
    let mut weights = [1usize; R];
    let mut acc = 1usize;
    for axis in (0..R).rev() {
        weights[axis] = acc;
        // Only overflows when another axis is empty; nothing is addressable then.
        acc = acc.checked_mul(shape[axis]).unwrap_or(0);
    }
    Some(weights)
}

/// Subscripts of the `index`-th element in row-major order.
///
/// Returns `None` when `index` is not below the element count, which
/// includes every index of a shape with an empty axis, or when the
/// element count overflows `usize`.
#[inline]
pub fn row_major_to_subscripts<const R: usize>(
    shape: &[usize; R],
    index: usize,
) -> Option<[usize; R]> {
    let len = checked_count(shape)?;
    if index >= len {
        return None;
    }
    let weights = weights(shape)?;
    let mut rem = index;
    let mut subs = [0usize; R];
    for axis in 0..R {
        subs[axis] = rem / weights[axis];
        rem %= weights[axis];
    }
    Some(subs)
}

/// Row-major position of `subscripts`; inverse of [`row_major_to_subscripts`]
/// for subscripts inside `[0, shape)`.
///
/// `None` when the element count of `shape` overflows `usize`.
#[inline]
pub fn subscripts_to_row_major<const R: usize>(
    shape: &[usize; R],
    subscripts: &[usize; R],
) -> Option<usize> {
    Some(
        weights(shape)?
            .iter()
            .zip(subscripts)
            .map(|(w, s)| w * s)
            .sum(),
    )
}

/// Iterator over every subscript of a shape in row-major order.
///
/// Walks like an odometer, so it never divides and never allocates.
#[derive(Debug, Clone)]
pub struct RowMajorIndices<const R: usize> {
    shape: [usize; R],
    next: Option<[usize; R]>,
    remaining: usize,
}

impl<const R: usize> RowMajorIndices<R> {
    /// Shapes whose element count overflows `usize` are walked as if they
    /// held `usize::MAX` elements.
    pub fn new(shape: [usize; R]) -> Self {
        let remaining = element_count(&shape);
        Self {
            shape,
            next: (remaining > 0).then_some([0usize; R]),
            remaining,
        }
    }
}

impl<const R: usize> Iterator for RowMajorIndices<R> {
    type Item = [usize; R];

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.remaining -= 1;

        let mut succ = current;
        let mut carried = true;
        for axis in (0..R).rev() {
            succ[axis] += 1;
            if succ[axis] < self.shape[axis] {
                carried = false;
                break;
            }
            succ[axis] = 0;
        }
        // Carrying out of axis 0 (or rank 0) means we just yielded the last one.
        self.next = if carried { None } else { Some(succ) };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<const R: usize> ExactSizeIterator for RowMajorIndices<R> {}
