//! Array views - per-axis windows onto one backing store
//!
//! An [`ArrayView`] is `start` and `fill_pointer` per axis plus exactly one
//! backing store. Its local subscript `s` lives at backing subscript
//! `start + s`, and the view never points at another view, so every access
//! is O(rank) no matter how the view was derived.
//!
//! # Ownership
//!
//! The backing is a closed enum:
//!
//! - `Private`: the view allocated the grid itself. Resizing may
//!   grow it; growth keeps every cell at its backing subscripts, so values
//!   stay at their local subscripts too.
//! - `Aliased`: the store belongs to the caller and may be shared
//!   with other views, which see each other's writes. Resizing only moves the
//!   window inside the existing capacity. Moving to other storage takes an
//!   explicit [`ArrayView::rebind`].
//!
//! # Failure
//!
//! Every mutating operation validates first and commits last: on error the
//! view and its store are exactly as they were.

use std::rc::Rc;

use tracing::{debug, trace};

use crate::builder::ViewBuilder;
use crate::index::{self, RowMajorIndices};
use crate::store::{BackingStore, Grid, Shared};
use crate::types::{element_count, ArrayKind, Ownership, Param, ViewError, ViewGeometry};
use crate::validate;

/// Where a view's cells live.
#[derive(Debug)]
pub(crate) enum Backing<T, const R: usize, S> {
    Private(Grid<T, R>),
    Aliased(Shared<S>),
}

/// Explicit change of backing store for [`ArrayView::rebind`].
#[derive(Debug)]
pub enum Rebind<'a, S> {
    /// Alias `store`, window starting at `start` (origin when `None`).
    Alias {
        store: Shared<S>,
        start: Option<&'a [usize]>,
    },
    /// Move onto a fresh private grid sized exactly to the new shape,
    /// carrying over every value whose local subscript survives.
    Detach,
}

/// A rank-`R` window onto one backing store.
#[derive(Debug)]
pub struct ArrayView<T, const R: usize, S = Grid<T, R>> {
    start: [usize; R],
    fill_pointer: [usize; R],
    backing: Backing<T, R, S>,
}

impl<T: Clone, const R: usize> From<Grid<T, R>> for ArrayView<T, R> {
    /// Adopt a grid as a plain view covering all of it.
    fn from(grid: Grid<T, R>) -> Self {
        Self {
            start: [0; R],
            fill_pointer: grid.capacity(),
            backing: Backing::Private(grid),
        }
    }
}

impl<T, const R: usize, S> ArrayView<T, R, S> {
    pub(crate) fn from_parts(
        start: [usize; R],
        fill_pointer: [usize; R],
        backing: Backing<T, R, S>,
    ) -> Self {
        Self {
            start,
            fill_pointer,
            backing,
        }
    }

    pub fn rank(&self) -> usize {
        R
    }

    pub fn start(&self) -> [usize; R] {
        self.start
    }

    pub fn fill_pointer(&self) -> [usize; R] {
        self.fill_pointer
    }

    pub fn shape(&self) -> [usize; R] {
        index::shape_of(&self.start, &self.fill_pointer)
    }

    /// Number of cells the view exposes.
    pub fn len(&self) -> usize {
        element_count(&self.shape())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ownership(&self) -> Ownership {
        match self.backing {
            Backing::Private(_) => Ownership::Private,
            Backing::Aliased(_) => Ownership::Aliased,
        }
    }

    /// Local subscripts in row-major order.
    pub fn indices(&self) -> RowMajorIndices<R> {
        RowMajorIndices::new(self.shape())
    }
}

impl<T, const R: usize, S> ArrayView<T, R, S>
where
    T: Clone,
    S: BackingStore<R, Elem = T>,
{
    pub fn capacity(&self) -> [usize; R] {
        match &self.backing {
            Backing::Private(grid) => grid.capacity(),
            Backing::Aliased(store) => store.borrow().capacity(),
        }
    }

    pub fn kind(&self) -> ArrayKind {
        match &self.backing {
            Backing::Private(grid)
                if self.start == [0; R] && self.fill_pointer == grid.capacity() =>
            {
                ArrayKind::Plain
            }
            Backing::Private(_) => ArrayKind::PrivateView,
            Backing::Aliased(_) => ArrayKind::AliasedView,
        }
    }

    pub fn geometry(&self) -> ViewGeometry {
        ViewGeometry {
            rank: R,
            kind: self.kind(),
            ownership: self.ownership(),
            start: self.start.to_vec(),
            fill_pointer: self.fill_pointer.to_vec(),
            shape: self.shape().to_vec(),
            capacity: self.capacity().to_vec(),
        }
    }

    pub fn get(&self, local: [usize; R]) -> Result<T, ViewError> {
        let at = index::to_backing(&self.start, &self.fill_pointer, &local)?;
        let value = match &self.backing {
            Backing::Private(grid) => grid.get(at).cloned(),
            Backing::Aliased(store) => store.borrow().get(at).cloned(),
        };
        value.ok_or_else(|| validate::beyond_capacity(&at, &self.capacity()))
    }

    pub fn set(&mut self, local: [usize; R], value: T) -> Result<(), ViewError> {
        let at = index::to_backing(&self.start, &self.fill_pointer, &local)?;
        let stored = match &mut self.backing {
            Backing::Private(grid) => grid.set(at, value),
            Backing::Aliased(store) => store.borrow_mut().set(at, value),
        };
        if stored {
            Ok(())
        } else {
            Err(validate::beyond_capacity(&at, &self.capacity()))
        }
    }

    pub fn row_major_get(&self, index: usize) -> Result<T, ViewError> {
        let local = self.row_major_subscripts(index)?;
        self.get(local)
    }

    pub fn row_major_set(&mut self, index: usize, value: T) -> Result<(), ViewError> {
        let local = self.row_major_subscripts(index)?;
        self.set(local, value)
    }

    fn row_major_subscripts(&self, index: usize) -> Result<[usize; R], ViewError> {
        let shape = self.shape();
        index::row_major_to_subscripts(&shape, index).ok_or(ViewError::RowMajorOutOfBounds {
            index,
            len: element_count(&shape),
        })
    }

    /// Values in row-major order.
    pub fn to_vec(&self) -> Result<Vec<T>, ViewError> {
        self.indices().map(|local| self.get(local)).collect()
    }

    /// Set every cell of the view to `value`.
    pub fn fill(&mut self, value: T) -> Result<(), ViewError> {
        for local in self.indices() {
            self.set(local, value.clone())?;
        }
        Ok(())
    }

    /// Aliased view of a sub-window of this one.
    ///
    /// `start` is local to this view. The result points straight at this
    /// view's store with the offsets already composed.
    pub fn subview(&self, start: &[usize], shape: &[usize]) -> Result<Self, ViewError> {
        let store = match &self.backing {
            Backing::Private(_) => return Err(ViewError::NotAliasable),
            Backing::Aliased(store) => Rc::clone(store),
        };
        let local_start = validate::axes::<R>(Param::Start, start)?;
        let shape = validate::axes::<R>(Param::Shape, shape)?;
        let local_end = validate::offset_by(&local_start, &shape);
        validate::window(&local_start, &local_end, &self.shape())?;

        Ok(Self {
            start: validate::offset_by(&self.start, &local_start),
            fill_pointer: validate::offset_by(&self.start, &local_end),
            backing: Backing::Aliased(store),
        })
    }

    /// Resize to `shape`, optionally moving the window to `start`.
    ///
    /// A private grid grows when the new window does not fit; growth keeps
    /// every cell in place. An aliased store is never grown: a window past
    /// its capacity is rejected with [`ViewError::CapacityExceeded`].
    pub fn resize(&mut self, shape: &[usize], start: Option<&[usize]>) -> Result<(), ViewError> {
        let shape = validate::axes::<R>(Param::Shape, shape)?;
        let start = match start {
            Some(values) => validate::axes::<R>(Param::Start, values)?,
            None => self.start,
        };
        let fill_pointer = validate::offset_by(&start, &shape);

        let capacity = self.capacity();
        if let Err(err) = validate::within_capacity(&fill_pointer, &capacity) {
            let may_grow = self.ownership().may_grow();
            match &mut self.backing {
                Backing::Private(grid) if may_grow => {
                    let mut target = capacity;
                    for axis in 0..R {
                        target[axis] = target[axis].max(fill_pointer[axis]);
                    }
                    if let Err(err) = grid.grow(target) {
                        debug!(%err, to = ?target, "private backing store could not grow");
                        return Err(err);
                    }
                    debug!(from = ?capacity, to = ?target, "grew private backing store");
                }
                _ => {
                    debug!(%err, fill_pointer = ?fill_pointer, "refused to grow aliased store");
                    return Err(err);
                }
            }
        }

        trace!(start = ?start, fill_pointer = ?fill_pointer, "moved view window");
        self.start = start;
        self.fill_pointer = fill_pointer;
        Ok(())
    }

    /// Resize onto different storage, replacing backing and ownership together.
    pub fn rebind(&mut self, shape: &[usize], target: Rebind<'_, S>) -> Result<(), ViewError>
    where
        T: Default,
    {
        let rebound = match target {
            Rebind::Alias { store, start } => {
                let builder = ViewBuilder::<T, R>::new(shape).alias(store);
                match start {
                    Some(start) => builder.start(start).build()?,
                    None => builder.build()?,
                }
            }
            Rebind::Detach => self.detached(shape)?,
        };
        debug!(
            from = ?self.ownership(),
            to = ?rebound.ownership(),
            shape = ?rebound.shape(),
            "rebound view"
        );
        *self = rebound;
        Ok(())
    }

    fn detached(&self, shape: &[usize]) -> Result<Self, ViewError>
    where
        T: Default,
    {
        let shape = validate::axes::<R>(Param::Shape, shape)?;
        let old = self.shape();
        let mut overlap = [0usize; R];
        for axis in 0..R {
            overlap[axis] = old[axis].min(shape[axis]);
        }

        let mut grid = Grid::try_new(shape, T::default())?;
        for local in RowMajorIndices::new(overlap) {
            grid.set(local, self.get(local)?);
        }
        Ok(Self {
            start: [0; R],
            fill_pointer: shape,
            backing: Backing::Private(grid),
        })
    }
}
