//! Drawing surfaces over shared cell grids.
//!
//! A [`Surface`] is one viewport's worth of cells. It holds a single view
//! onto a cell grid and does all reads and writes through that view, so it
//! never needs to know whether the grid is its own or shared with other
//! surfaces. Flushing to an actual terminal is left to the caller; the
//! surface only hands out rows of text.

pub mod cell;
pub mod surface;

pub use dispview_core as core;
pub use dispview_types as types;

pub use cell::{Cell, Rgb, Style};
pub use surface::{screen, CellGrid, Surface, Viewport};
