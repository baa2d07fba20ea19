//! Core view logic - pure, synchronous, and allocation-free on hot paths
//!
//! A view exposes a rectangular window of a rank-`R` backing store. Each
//! axis carries its own start offset and fill pointer, so a view can be
//! moved, shrunk or grown without relocating any cell it, or any other
//! view of the same store, can see.
//!
//! # Module Structure
//!
//! - [`index`]: row-major conversion and local-to-backing translation
//! - [`store`]: the [`BackingStore`] contract and the stock [`Grid`]
//! - [`validate`]: argument checks run before anything is committed
//! - [`builder`]: [`ViewBuilder`], the three construction outcomes
//! - [`view`]: [`ArrayView`] access, resize and rebind
//!
//! # Example
//!
//! ```
//! use dispview_core::{share, Grid, ViewBuilder};
//!
//! // An 8x8 store, and a 4x4 window onto its middle.
//! let store = share(Grid::new([8, 8], 0u8));
//! let mut view = ViewBuilder::<u8, 2>::new(&[4, 4])
//!     .start(&[2, 2])
//!     .alias(store.clone())
//!     .build()
//!     .unwrap();
//!
//! view.fill(1).unwrap();
//! assert_eq!(store.borrow().cells().iter().filter(|&&c| c == 1).count(), 16);
//!
//! // Local (0, 0) is backing (2, 2).
//! view.set([0, 0], 7).unwrap();
//! assert_eq!(store.borrow().cells()[2 * 8 + 2], 7);
//! ```
//!
//! # Sharing
//!
//! Aliased stores are [`Shared`] (`Rc<RefCell<_>>`): any number of views
//! may alias one store, all on one thread. Nothing here locks; callers
//! that need cross-thread access wrap the whole arrangement themselves.

pub mod builder;
pub mod index;
pub mod store;
pub mod validate;
pub mod view;

pub use dispview_types as types;

// Re-export commonly used types for convenience
pub use builder::{Init, ViewBuilder};
pub use index::{row_major_to_subscripts, subscripts_to_row_major, RowMajorIndices};
pub use store::{share, BackingStore, Grid, Shared};
pub use types::{ArrayKind, Ownership, Param, ViewError, ViewGeometry};
pub use view::{ArrayView, Rebind};
