//! View construction
//!
//! Which view comes out depends on what the builder was given:
//!
//! | Given | Result |
//! |-------|--------|
//! | shape only | Plain: private grid of exactly `shape`, window covers it |
//! | shape + smaller fill pointer | PrivateView: grid of `shape`, window `0..fill_pointer` |
//! | shape + `alias(store)` | AliasedView: window `start..fill_pointer` onto the caller's store |
//!
//! For an aliased view, `start` defaults to the origin and `fill_pointer`
//! to `start + shape`. Fill pointers are always in backing coordinates.
//!
//! ```
//! use dispview_core::{share, ArrayKind, Grid, ViewBuilder};
//!
//! let screen = share(Grid::new([8, 8], 0u8));
//! let view = ViewBuilder::<u8, 2>::new(&[4, 4])
//!     .start(&[2, 2])
//!     .alias(screen.clone())
//!     .build()
//!     .unwrap();
//! assert_eq!(view.kind(), ArrayKind::AliasedView);
//! assert_eq!(view.fill_pointer(), [6, 6]);
//! ```

use std::marker::PhantomData;

use tracing::trace;

use crate::store::{BackingStore, Grid, Shared};
use crate::types::ViewError;
use crate::validate::{self, Plan};
use crate::view::{ArrayView, Backing};

/// Initial data for a freshly allocated grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Init<T> {
    /// Every cell, including cells added by later growth.
    Fill(T),
    /// Row-major contents covering the whole allocation.
    Contents(Vec<T>),
}

/// Builder for [`ArrayView`].
#[derive(Debug)]
pub struct ViewBuilder<'a, T, const R: usize, S = Grid<T, R>> {
    shape: &'a [usize],
    start: Option<&'a [usize]>,
    fill_pointer: Option<&'a [usize]>,
    init: Option<Init<T>>,
    alias: Option<Shared<S>>,
    _rank: PhantomData<[usize; R]>,
}

impl<'a, T, const R: usize> ViewBuilder<'a, T, R> {
    pub fn new(shape: &'a [usize]) -> Self {
        Self {
            shape,
            start: None,
            fill_pointer: None,
            init: None,
            alias: None,
            _rank: PhantomData,
        }
    }
}

impl<'a, T, const R: usize, S> ViewBuilder<'a, T, R, S> {
    /// Backing subscripts of the view's first cell.
    pub fn start(mut self, start: &'a [usize]) -> Self {
        self.start = Some(start);
        self
    }

    /// Exclusive upper bound of the view, in backing coordinates.
    pub fn fill_pointer(mut self, fill_pointer: &'a [usize]) -> Self {
        self.fill_pointer = Some(fill_pointer);
        self
    }

    pub fn fill(mut self, value: T) -> Self {
        self.init = Some(Init::Fill(value));
        self
    }

    pub fn contents(mut self, contents: Vec<T>) -> Self {
        self.init = Some(Init::Contents(contents));
        self
    }

    /// Alias a caller-owned store instead of allocating.
    pub fn alias<S2>(self, store: Shared<S2>) -> ViewBuilder<'a, T, R, S2> {
        ViewBuilder {
            shape: self.shape,
            start: self.start,
            fill_pointer: self.fill_pointer,
            init: self.init,
            alias: Some(store),
            _rank: PhantomData,
        }
    }
}

impl<T, const R: usize, S> ViewBuilder<'_, T, R, S>
where
    T: Clone + Default,
    S: BackingStore<R, Elem = T>,
{
    /// Validate and build. Nothing is allocated when this fails.
    pub fn build(self) -> Result<ArrayView<T, R, S>, ViewError> {
        let plan = validate::construction::<T, R, S>(
            self.shape,
            self.start,
            self.fill_pointer,
            self.init,
            self.alias,
        )?;

        let view = match plan {
            Plan::Fresh {
                capacity,
                start,
                fill_pointer,
                init,
            } => {
                let grid = match init {
                    None => Grid::try_new(capacity, T::default())?,
                    Some(Init::Fill(value)) => Grid::try_new(capacity, value)?,
                    Some(Init::Contents(contents)) => Grid::from_contents(capacity, contents)?,
                };
                ArrayView::from_parts(start, fill_pointer, Backing::Private(grid))
            }
            Plan::Alias {
                store,
                start,
                fill_pointer,
            } => ArrayView::from_parts(start, fill_pointer, Backing::Aliased(store)),
        };
        trace!(
            rank = R,
            kind = ?view.kind(),
            start = ?view.start(),
            fill_pointer = ?view.fill_pointer(),
            "built view"
        );
        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::share;
    use crate::types::{ArrayKind, Param};

    #[test]
    fn shape_only_builds_plain() {
        let view = ViewBuilder::<i32, 2>::new(&[3, 4]).build().unwrap();
        assert_eq!(view.kind(), ArrayKind::Plain);
        assert_eq!(view.shape(), [3, 4]);
        assert_eq!(view.capacity(), [3, 4]);
        assert_eq!(view.get([2, 3]), Ok(0));
    }

    #[test]
    fn smaller_fill_pointer_preallocates() {
        let view = ViewBuilder::<i32, 2>::new(&[8, 8])
            .fill_pointer(&[4, 4])
            .fill(7)
            .build()
            .unwrap();
        assert_eq!(view.kind(), ArrayKind::PrivateView);
        assert_eq!(view.shape(), [4, 4]);
        assert_eq!(view.capacity(), [8, 8]);
        assert_eq!(view.get([3, 3]), Ok(7));
    }

    #[test]
    fn contents_fill_row_major() {
        let view = ViewBuilder::<char, 2>::new(&[2, 3])
            .contents("abcdef".chars().collect())
            .build()
            .unwrap();
        assert_eq!(view.get([0, 2]), Ok('c'));
        assert_eq!(view.get([1, 0]), Ok('d'));
    }

    #[test]
    fn alias_takes_explicit_window() {
        let store = share(Grid::new([8, 8], 0u8));
        let view = ViewBuilder::<u8, 2>::new(&[4, 4])
            .start(&[1, 2])
            .fill_pointer(&[3, 3])
            .alias(store)
            .build()
            .unwrap();
        assert_eq!(view.shape(), [2, 1]);
    }

    #[test]
    fn alias_rejects_window_past_capacity() {
        let store = share(Grid::new([8, 8], 0u8));
        let err = ViewBuilder::<u8, 2>::new(&[4, 4])
            .start(&[6, 0])
            .alias(store)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ViewError::OrderViolation {
                axis: 0,
                start: 6,
                fill_pointer: 10,
                capacity: 8
            }
        );
    }

    #[test]
    fn rank_mismatch_in_shape() {
        let err = ViewBuilder::<u8, 3>::new(&[4, 4]).build().unwrap_err();
        assert_eq!(
            err,
            ViewError::ArityMismatch {
                param: Param::Shape,
                expected: 3,
                got: 2
            }
        );
    }

    #[test]
    fn scalar_view() {
        let mut view = ViewBuilder::<u64, 0>::new(&[]).fill(3).build().unwrap();
        assert_eq!(view.len(), 1);
        assert_eq!(view.get([]), Ok(3));
        view.set([], 4).unwrap();
        assert_eq!(view.row_major_get(0), Ok(4));
    }
}
