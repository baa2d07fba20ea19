//! Surfaces: a viewport's window onto a cell grid.
//!
//! Coordinates are `(x, y)` with `x` the column. Internally the grid is
//! row-major with rows on axis 0, so `(x, y)` is local subscript `[y, x]`.

use tracing::debug;

use crate::cell::{Cell, Style};
use crate::core::{share, ArrayView, Grid, Shared, ViewBuilder};
use crate::types::{ViewError, ViewGeometry};

/// A full-screen grid of cells that several surfaces may alias.
pub type CellGrid = Grid<Cell, 2>;

/// On-screen placement of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A viewport at the origin.
    pub fn sized(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    fn start(&self) -> [usize; 2] {
        [self.y as usize, self.x as usize]
    }

    fn shape(&self) -> [usize; 2] {
        [self.height as usize, self.width as usize]
    }
}

/// A blank, fixed-size screen grid ready to be shared.
pub fn screen(width: u16, height: u16) -> Shared<CellGrid> {
    share(Grid::fixed([height as usize, width as usize], Cell::BLANK))
}

/// A drawable window of cells.
#[derive(Debug)]
pub struct Surface {
    view: ArrayView<Cell, 2>,
}

impl Surface {
    /// Surface drawing straight into `screen` at `viewport`.
    pub fn over(screen: &Shared<CellGrid>, viewport: Viewport) -> Result<Self, ViewError> {
        let view = ViewBuilder::<Cell, 2>::new(&viewport.shape())
            .start(&viewport.start())
            .alias(screen.clone())
            .build()?;
        Ok(Self { view })
    }

    /// Surface with its own cells, pre-allocated `headroom` columns and rows
    /// beyond `width x height` so it can grow without reallocating.
    pub fn offscreen(width: u16, height: u16, headroom: (u16, u16)) -> Result<Self, ViewError> {
        let capacity = [
            height as usize + headroom.1 as usize,
            width as usize + headroom.0 as usize,
        ];
        let view = ViewBuilder::<Cell, 2>::new(&capacity)
            .fill_pointer(&[height as usize, width as usize])
            .fill(Cell::BLANK)
            .build()?;
        Ok(Self { view })
    }

    pub fn width(&self) -> u16 {
        self.view.shape()[1] as u16
    }

    pub fn height(&self) -> u16 {
        self.view.shape()[0] as u16
    }

    /// Current placement in the backing grid.
    pub fn viewport(&self) -> Viewport {
        let [y, x] = self.view.start();
        Viewport::new(x as u16, y as u16, self.width(), self.height())
    }

    pub fn geometry(&self) -> ViewGeometry {
        self.view.geometry()
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.view.get([y as usize, x as usize]).ok()
    }

    /// Returns false outside the surface.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        self.view.set([y as usize, x as usize], cell).is_ok()
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: Style) -> bool {
        self.set(x, y, Cell::new(ch, style))
    }

    /// Write `s` from `(x, y)`, clipped at the right edge. Returns the
    /// number of characters written.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: Style) -> usize {
        let mut written = 0;
        for (cx, ch) in (x..self.width()).zip(s.chars()) {
            if self.put_char(cx, y, ch, style) {
                written += 1;
            }
        }
        written
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: Style) {
        for dy in 0..h {
            for dx in 0..w {
                self.put_char(x.saturating_add(dx), y.saturating_add(dy), ch, style);
            }
        }
    }

    pub fn clear(&mut self, cell: Cell) -> Result<(), ViewError> {
        self.view.fill(cell)
    }

    /// Change the surface size, keeping its origin and every visible cell.
    pub fn resize(&mut self, width: u16, height: u16) -> Result<(), ViewError> {
        self.view
            .resize(&[height as usize, width as usize], None)
            .inspect_err(|err| debug!(%err, width, height, "surface resize rejected"))
    }

    /// Move the surface's origin within its grid, keeping its size.
    pub fn move_to(&mut self, x: u16, y: u16) -> Result<(), ViewError> {
        let shape = self.view.shape();
        self.view.resize(&shape, Some(&[y as usize, x as usize]))
    }

    /// Rows of the surface as text, top to bottom.
    pub fn lines(&self) -> Result<Vec<String>, ViewError> {
        let cells = self.view.to_vec()?;
        let width = self.width() as usize;
        if width == 0 {
            return Ok(vec![String::new(); self.height() as usize]);
        }
        Ok(cells
            .chunks(width)
            .map(|row| row.iter().map(|c| c.ch).collect())
            .collect())
    }
}
