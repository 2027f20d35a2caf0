//! Block-resolution color index grid
//!
//! Every recipe builds one of these, mutates it through several passes and
//! renders it once. Cells always hold an index below the palette length, so
//! rendering never needs a fallback color.

use image::{Rgb, Rgba, RgbaImage};
use ndarray::Array2;

/// 2-D array of palette indices at block resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorGrid {
    /// Palette indices, indexed `[row, col]`
    cells: Array2<usize>,
    /// Palette length every cell is bounded by
    colors: usize,
}

impl ColorGrid {
    /// Create a grid filled with `index`
    pub fn filled(width: usize, height: usize, colors: usize, index: usize) -> Self {
        let colors = colors.max(1);
        Self {
            cells: Array2::from_elem((height, width), index.min(colors - 1)),
            colors,
        }
    }

    /// Create a grid by evaluating `cell(x, y)` at every position
    pub fn from_fn(
        width: usize,
        height: usize,
        colors: usize,
        mut cell: impl FnMut(usize, usize) -> usize,
    ) -> Self {
        let colors = colors.max(1);
        Self {
            cells: Array2::from_shape_fn((height, width), |(y, x)| cell(x, y).min(colors - 1)),
            colors,
        }
    }

    /// Grid width in cells
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Grid height in cells
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of cells
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Palette length the grid indexes into
    pub const fn colors(&self) -> usize {
        self.colors
    }

    /// Read-only view of the underlying array
    pub const fn cells(&self) -> &Array2<usize> {
        &self.cells
    }

    /// Palette index at `(x, y)`, or 0 outside the grid
    pub fn get(&self, x: usize, y: usize) -> usize {
        self.cells.get([y, x]).copied().unwrap_or(0)
    }

    /// Palette index at signed coordinates, `None` outside the grid
    pub fn get_signed(&self, x: isize, y: isize) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        self.cells.get([y as usize, x as usize]).copied()
    }

    /// Overwrite `(x, y)`; out-of-range positions are ignored and indices clamped
    pub fn set(&mut self, x: usize, y: usize, index: usize) {
        let bounded = index.min(self.colors - 1);
        if let Some(cell) = self.cells.get_mut([y, x]) {
            *cell = bounded;
        }
    }

    /// Overwrite signed coordinates, ignoring anything outside the grid
    pub fn set_signed(&mut self, x: isize, y: isize, index: usize) {
        if x >= 0 && y >= 0 {
            self.set(x as usize, y as usize, index);
        }
    }

    /// Whether signed coordinates fall inside the grid
    pub fn contains(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width() && (y as usize) < self.height()
    }

    /// Replace the contents with another grid of identical shape
    pub fn replace_cells(&mut self, cells: Array2<usize>) {
        if cells.dim() == self.cells.dim() {
            self.cells = cells;
        }
    }

    /// Count cells equal to `index` in the 3x3 block centred on `(x, y)`
    ///
    /// The centre cell itself is included.
    pub fn count_matching_neighbors(&self, x: usize, y: usize, index: usize) -> usize {
        let mut count = 0;
        for dy in -1..=1_isize {
            for dx in -1..=1_isize {
                if self.get_signed(x as isize + dx, y as isize + dy) == Some(index) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Most frequent index in the `width`×`height` area at `(x, y)`
    ///
    /// Ties resolve to the lowest palette index.
    pub fn dominant_in(&self, x: usize, y: usize, width: usize, height: usize) -> usize {
        let mut counts = vec![0_usize; self.colors];
        for cy in y..(y + height).min(self.height()) {
            for cx in x..(x + width).min(self.width()) {
                if let Some(count) = counts.get_mut(self.get(cx, cy)) {
                    *count += 1;
                }
            }
        }
        most_frequent(&counts)
    }

    /// Render at `block` pixels per cell
    ///
    /// Each output pixel maps to its owning cell by integer division.
    pub fn render(&self, palette: &[Rgb<u8>], block: usize) -> RgbaImage {
        let block = block.max(1);
        let width = (self.width() * block) as u32;
        let height = (self.height() * block) as u32;
        RgbaImage::from_fn(width, height, |px, py| {
            let index = self.get(px as usize / block, py as usize / block);
            opaque(palette.get(index).copied().unwrap_or(Rgb([0, 0, 0])))
        })
    }

    /// Render a `width`×`height` image, repeating the grid toroidally
    ///
    /// Used when cells are coarser than the reconciled block and the grid
    /// no longer covers the output exactly.
    pub fn render_tiled(
        &self,
        palette: &[Rgb<u8>],
        cell: usize,
        width: usize,
        height: usize,
    ) -> RgbaImage {
        let cell = cell.max(1);
        let columns = self.width().max(1);
        let rows = self.height().max(1);
        RgbaImage::from_fn(width as u32, height as u32, |px, py| {
            let index = self.get((px as usize / cell) % columns, (py as usize / cell) % rows);
            opaque(palette.get(index).copied().unwrap_or(Rgb([0, 0, 0])))
        })
    }
}

/// Index of the largest count, lowest index winning ties
pub fn most_frequent(counts: &[usize]) -> usize {
    let mut best = 0;
    let mut best_count = 0;
    for (index, &count) in counts.iter().enumerate() {
        if count > best_count {
            best = index;
            best_count = count;
        }
    }
    best
}

/// Lift an RGB palette entry into the canonical opaque RGBA pixel
pub const fn opaque(color: Rgb<u8>) -> Rgba<u8> {
    let [r, g, b] = color.0;
    Rgba([r, g, b, 255])
}
