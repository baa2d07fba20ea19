//! Bounds validation for construction and resize arguments
//!
//! All checks here are pure. Construction arguments are normalized into a
//! [`Plan`] that the builder executes without further checking, so a
//! rejected request never allocates or touches any store.

use crate::builder::Init;
use crate::store::{BackingStore, Shared};
use crate::types::{element_count, Param, ViewError};

/// Fully checked construction parameters.
pub(crate) enum Plan<T, const R: usize, S> {
    /// Allocate a private grid of `capacity`.
    Fresh {
        capacity: [usize; R],
        start: [usize; R],
        fill_pointer: [usize; R],
        init: Option<Init<T>>,
    },
    /// Window onto a caller-supplied store.
    Alias {
        store: Shared<S>,
        start: [usize; R],
        fill_pointer: [usize; R],
    },
}

/// Convert a caller-supplied vector into one entry per axis.
pub fn axes<const R: usize>(param: Param, values: &[usize]) -> Result<[usize; R], ViewError> {
    <[usize; R]>::try_from(values).map_err(|_| ViewError::ArityMismatch {
        param,
        expected: R,
        got: values.len(),
    })
}

/// `start + shape` per axis, saturating so an overflow fails the capacity
/// checks instead of wrapping.
#[inline]
pub fn offset_by<const R: usize>(start: &[usize; R], shape: &[usize; R]) -> [usize; R] {
    let mut out = [0usize; R];
    for axis in 0..R {
        out[axis] = start[axis].saturating_add(shape[axis]);
    }
    out
}

/// Check `0 <= start <= fill_pointer <= capacity` on every axis.
pub fn window<const R: usize>(
    start: &[usize; R],
    fill_pointer: &[usize; R],
    capacity: &[usize; R],
) -> Result<(), ViewError> {
    for axis in 0..R {
        if start[axis] > fill_pointer[axis] || fill_pointer[axis] > capacity[axis] {
            return Err(ViewError::OrderViolation {
                axis,
                start: start[axis],
                fill_pointer: fill_pointer[axis],
                capacity: capacity[axis],
            });
        }
    }
    Ok(())
}

/// Check that `fill_pointer` fits inside a store that will not grow.
pub fn within_capacity<const R: usize>(
    fill_pointer: &[usize; R],
    capacity: &[usize; R],
) -> Result<(), ViewError> {
    match (0..R).find(|&axis| fill_pointer[axis] > capacity[axis]) {
        Some(axis) => Err(ViewError::CapacityExceeded {
            axis,
            requested: fill_pointer[axis],
            capacity: capacity[axis],
        }),
        None => Ok(()),
    }
}

/// Element count of a `capacity` grid of `T`, rejecting any allocation
/// larger than `isize::MAX` bytes.
///
/// On failure the error names the first axis that pushes the size over
/// the limit, and the largest extent that axis could have had.
pub fn allocatable<T, const R: usize>(capacity: &[usize; R]) -> Result<usize, ViewError> {
    if capacity.contains(&0) {
        return Ok(0);
    }
    let max_elems = isize::MAX as usize / std::mem::size_of::<T>().max(1);
    let mut count = 1usize;
    for axis in 0..R {
        count = count
            .checked_mul(capacity[axis])
            .filter(|&n| n <= max_elems)
            .ok_or(ViewError::CapacityExceeded {
                axis,
                requested: capacity[axis],
                capacity: max_elems / count,
            })?;
    }
    Ok(count)
}

/// Error for backing subscripts a store no longer covers.
pub(crate) fn beyond_capacity<const R: usize>(at: &[usize; R], capacity: &[usize; R]) -> ViewError {
    let axis = (0..R).find(|&axis| at[axis] >= capacity[axis]).unwrap_or(0);
    ViewError::IndexOutOfBounds {
        axis,
        index: at.get(axis).copied().unwrap_or(0),
        extent: capacity.get(axis).copied().unwrap_or(0),
    }
}

/// Validate everything a construction request supplies.
pub(crate) fn construction<T, const R: usize, S>(
    shape: &[usize],
    start: Option<&[usize]>,
    fill_pointer: Option<&[usize]>,
    init: Option<Init<T>>,
    alias: Option<Shared<S>>,
) -> Result<Plan<T, R, S>, ViewError>
where
    S: BackingStore<R>,
{
    if alias.is_some() && init.is_some() {
        return Err(ViewError::MutualExclusionViolation);
    }

    let shape = axes::<R>(Param::Shape, shape)?;
    let start = match start {
        Some(values) => axes::<R>(Param::Start, values)?,
        None => [0usize; R],
    };
    let explicit_fill = match fill_pointer {
        Some(values) => Some(axes::<R>(Param::FillPointer, values)?),
        None => None,
    };

    match alias {
        Some(store) => {
            let capacity = store.borrow().capacity();
            let fill_pointer = explicit_fill.unwrap_or_else(|| offset_by(&start, &shape));
            window(&start, &fill_pointer, &capacity)?;
            Ok(Plan::Alias {
                store,
                start,
                fill_pointer,
            })
        }
        None => {
            // The requested shape is the allocation.
            let capacity = shape;
            allocatable::<T, R>(&capacity)?;
            let fill_pointer = explicit_fill.unwrap_or(capacity);
            window(&start, &fill_pointer, &capacity)?;
            if let Some(Init::Contents(contents)) = &init {
                let expected = element_count(&capacity);
                if contents.len() != expected {
                    return Err(ViewError::ContentsMismatch {
                        expected,
                        got: contents.len(),
                    });
                }
            }
            Ok(Plan::Fresh {
                capacity,
                start,
                fill_pointer,
                init,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{share, Grid};

    #[test]
    fn arity_is_checked_per_param() {
        assert_eq!(axes::<2>(Param::Start, &[1, 2]), Ok([1, 2]));
        assert_eq!(
            axes::<2>(Param::FillPointer, &[1, 2, 3]),
            Err(ViewError::ArityMismatch {
                param: Param::FillPointer,
                expected: 2,
                got: 3
            })
        );
    }

    #[test]
    fn window_reports_first_bad_axis() {
        assert!(window(&[0, 0], &[4, 4], &[4, 4]).is_ok());
        assert_eq!(
            window(&[0, 3], &[4, 2], &[4, 4]),
            Err(ViewError::OrderViolation {
                axis: 1,
                start: 3,
                fill_pointer: 2,
                capacity: 4
            })
        );
        assert!(matches!(
            window(&[0, 0], &[5, 4], &[4, 4]),
            Err(ViewError::OrderViolation { axis: 0, .. })
        ));
    }

    #[test]
    fn overflowing_window_fails_capacity() {
        let fillp = offset_by(&[usize::MAX, 0], &[1, 1]);
        assert_eq!(fillp, [usize::MAX, 1]);
        assert!(within_capacity(&fillp, &[8, 8]).is_err());
        assert!(allocatable::<u8, 2>(&[usize::MAX, 2]).is_err());
        assert_eq!(allocatable::<u8, 0>(&[]), Ok(1));
        assert_eq!(allocatable::<u8, 2>(&[usize::MAX, 0]), Ok(0));
    }

    #[test]
    fn allocation_size_is_measured_in_bytes() {
        // Countable, but 2^61 * 8 bytes is past isize::MAX.
        let capacity = [usize::MAX / 8, 1];
        assert!(allocatable::<u8, 2>(&capacity).is_ok());
        assert_eq!(
            allocatable::<u64, 2>(&capacity),
            Err(ViewError::CapacityExceeded {
                axis: 0,
                requested: usize::MAX / 8,
                capacity: isize::MAX as usize / 8
            })
        );
    }

    #[test]
    fn alias_with_init_is_rejected_first() {
        let store = share(Grid::new([8, 8], 0u8));
        // Even with a bad arity, the exclusive modes are reported.
        let plan = construction::<u8, 2, _>(&[1], None, None, Some(Init::Fill(1)), Some(store));
        assert!(matches!(plan, Err(ViewError::MutualExclusionViolation)));
    }

    #[test]
    fn alias_defaults_fill_pointer_from_shape() {
        let store = share(Grid::new([8, 8], 0u8));
        let plan = construction::<u8, 2, _>(&[4, 4], Some(&[2, 2]), None, None, Some(store));
        match plan {
            Ok(Plan::Alias {
                start,
                fill_pointer,
                ..
            }) => {
                assert_eq!(start, [2, 2]);
                assert_eq!(fill_pointer, [6, 6]);
            }
            _ => panic!("expected an alias plan"),
        }
    }

    #[test]
    fn fresh_contents_must_match_allocation() {
        let plan = construction::<u8, 2, Grid<u8, 2>>(
            &[2, 2],
            None,
            None,
            Some(Init::Contents(vec![1, 2, 3])),
            None,
        );
        assert!(matches!(
            plan,
            Err(ViewError::ContentsMismatch {
                expected: 4,
                got: 3
            })
        ));
    }
}
