//! Backing stores - the physical cells a view reads and writes through
//!
//! [`BackingStore`] is the contract a view needs from its storage:
//! element access by backing subscripts, the per-axis capacity, and a
//! growth operation that never renumbers existing cells.
//!
//! [`Grid`] is the stock implementation: a flat row-major `Vec` with a
//! fill element for cells that growth adds. A grid made with
//! [`Grid::fixed`] refuses to grow at all.

use std::cell::RefCell;
use std::rc::Rc;

use crate::index::{self, RowMajorIndices};
use crate::types::{element_count, ViewError};
use crate::validate;

/// A caller-owned store that several views may alias.
///
/// Single-threaded on purpose: callers serialize mutation themselves and no
/// lock is taken on their behalf.
pub type Shared<S> = Rc<RefCell<S>>;

/// Wrap a store so views can alias it.
pub fn share<S>(store: S) -> Shared<S> {
    Rc::new(RefCell::new(store))
}

/// Rank-`R` storage addressed by backing subscripts.
pub trait BackingStore<const R: usize> {
    type Elem;

    /// Number of addressable cells along each axis.
    fn capacity(&self) -> [usize; R];

    /// Element at `at`, or `None` outside capacity.
    fn get(&self, at: [usize; R]) -> Option<&Self::Elem>;

    /// Store `value` at `at`. Returns false outside capacity.
    fn set(&mut self, at: [usize; R], value: Self::Elem) -> bool;

    /// Extend capacity to at least `capacity` on every axis.
    ///
    /// Every existing element keeps its subscripts. On error the store is
    /// unchanged.
    fn grow(&mut self, capacity: [usize; R]) -> Result<(), ViewError>;
}

/// Dense row-major grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T, const R: usize> {
    capacity: [usize; R],
    cells: Vec<T>,
    fill: T,
    growable: bool,
}

impl<T: Clone, const R: usize> Grid<T, R> {
    /// Growable grid with every cell set to `fill`.
    ///
    /// # Panics
    ///
    /// If the allocation cannot be made; see [`Grid::try_new`].
    pub fn new(capacity: [usize; R], fill: T) -> Self {
        match Self::try_new(capacity, fill) {
            Ok(grid) => grid,
            Err(err) => panic!("grid allocation failed: {err}"),
        }
    }

    /// Growable grid with every cell set to `fill`, or `CapacityExceeded`
    /// when the cells would not fit in memory.
    pub fn try_new(capacity: [usize; R], fill: T) -> Result<Self, ViewError> {
        let cells = allocate(&capacity, &[0; R], &fill)?;
        Ok(Self {
            capacity,
            cells,
            fill,
            growable: true,
        })
    }

    /// Grid whose capacity can never change.
    pub fn fixed(capacity: [usize; R], fill: T) -> Self {
        Self {
            growable: false,
            ..Self::new(capacity, fill)
        }
    }

    /// Growable grid initialized from row-major `contents`.
    pub fn from_contents(capacity: [usize; R], contents: Vec<T>) -> Result<Self, ViewError>
    where
        T: Default,
    {
        let expected = element_count(&capacity);
        if contents.len() != expected {
            return Err(ViewError::ContentsMismatch {
                expected,
                got: contents.len(),
            });
        }
        Ok(Self {
            capacity,
            cells: contents,
            fill: T::default(),
            growable: true,
        })
    }
}

/// Cells for a `capacity` grid, all `fill`, without aborting when the
/// allocator refuses.
///
/// `held` is the capacity being replaced; a refusal is reported against
/// the first axis that grows past it.
fn allocate<T: Clone, const R: usize>(
    capacity: &[usize; R],
    held: &[usize; R],
    fill: &T,
) -> Result<Vec<T>, ViewError> {
    let len = validate::allocatable::<T, R>(capacity)?;
    let mut cells = Vec::new();
    if cells.try_reserve_exact(len).is_err() {
        let axis = (0..R).find(|&axis| capacity[axis] > held[axis]).unwrap_or(0);
        return Err(ViewError::CapacityExceeded {
            axis,
            requested: capacity.get(axis).copied().unwrap_or(0),
            capacity: held.get(axis).copied().unwrap_or(0),
        });
    }
    cells.resize(len, fill.clone());
    Ok(cells)
}

impl<T, const R: usize> Grid<T, R> {
    /// All cells in row-major order.
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    #[inline(always)]
    fn offset(&self, at: &[usize; R]) -> Option<usize> {
        if at.iter().zip(&self.capacity).any(|(a, c)| a >= c) {
            return None;
        }
        index::subscripts_to_row_major(&self.capacity, at)
    }
}

impl<T: Clone, const R: usize> BackingStore<R> for Grid<T, R> {
    type Elem = T;

    fn capacity(&self) -> [usize; R] {
        self.capacity
    }

    fn get(&self, at: [usize; R]) -> Option<&T> {
        self.offset(&at).map(|i| &self.cells[i])
    }

    fn set(&mut self, at: [usize; R], value: T) -> bool {
        match self.offset(&at) {
            Some(i) => {
                self.cells[i] = value;
                true
            }
            None => false,
        }
    }

    fn grow(&mut self, capacity: [usize; R]) -> Result<(), ViewError> {
        let mut target = self.capacity;
        for axis in 0..R {
            if capacity[axis] <= target[axis] {
                continue;
            }
            if !self.growable {
                return Err(ViewError::CapacityExceeded {
                    axis,
                    requested: capacity[axis],
                    capacity: self.capacity[axis],
                });
            }
            target[axis] = capacity[axis];
        }
        if target == self.capacity {
            return Ok(());
        }

        let mut cells = allocate(&target, &self.capacity, &self.fill)?;
        let old = std::mem::take(&mut self.cells);
        for (subs, value) in RowMajorIndices::new(self.capacity).zip(old) {
            if let Some(i) = index::subscripts_to_row_major(&target, &subs) {
                cells[i] = value;
            }
        }
        self.cells = cells;
        self.capacity = target;
        Ok(())
    }
}
