//! Boolean stamp library and overlap-limited placement onto a color grid

use crate::io::configuration::{TEMPLATE_ATTEMPT_DIVISOR, TEMPLATE_OVERLAP_TOLERANCE};
use crate::math::probability::select_weighted;
use crate::spatial::grid::ColorGrid;
use bitvec::prelude::*;
use rand::Rng;

/// Color bias for stamps wider than they are tall
const WIDE_PROFILE: [f64; 4] = [0.5, 0.3, 0.15, 0.05];
/// Color bias for stamps taller than they are wide
const TALL_PROFILE: [f64; 4] = [0.2, 0.3, 0.3, 0.2];
/// Color bias for square stamps
const SQUARE_PROFILE: [f64; 4] = [0.4, 0.3, 0.2, 0.1];

/// Fixed rectangular stamp shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    width: usize,
    height: usize,
    cells: BitVec,
}

impl Template {
    /// Build from rows of `'#'` (filled) and `'.'` (empty)
    ///
    /// Rows shorter than the first row are padded with empty cells.
    pub fn from_rows(rows: &[&str]) -> Self {
        let width = rows.first().map_or(0, |row| row.len());
        let height = rows.len();
        let mut cells = bitvec![0; width * height];
        for (y, row) in rows.iter().enumerate() {
            for (x, symbol) in row.chars().take(width).enumerate() {
                cells.set(y * width + x, symbol == '#');
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Stamp width in cells
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Stamp height in cells
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Whether the stamp paints `(x, y)`
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        x < self.width && self.cells.get(y * self.width + x).as_deref() == Some(&true)
    }

    /// Number of painted cells
    pub fn filled_count(&self) -> usize {
        self.cells.count_ones()
    }

    /// Filled positions relative to the stamp origin
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter_ones()
            .map(move |slot| (slot % self.width, slot / self.width))
    }

    fn color_profile(&self) -> &'static [f64] {
        match self.width.cmp(&self.height) {
            std::cmp::Ordering::Greater => &WIDE_PROFILE,
            std::cmp::Ordering::Less => &TALL_PROFILE,
            std::cmp::Ordering::Equal => &SQUARE_PROFILE,
        }
    }
}

/// Squares, rectangles and strips at mixed aspect ratios
pub fn library() -> Vec<Template> {
    vec![
        Template::from_rows(&["###", "#.#", "###"]),
        Template::from_rows(&["##..", "##..", "..##", "..##"]),
        Template::from_rows(&["###...", "###...", "...###"]),
        Template::from_rows(&["####....", "....####"]),
        Template::from_rows(&["#.#.", ".#.#"]),
        Template::from_rows(&["#.", "#.", ".#", ".#", "#.", "#."]),
        Template::from_rows(&["#.#", ".#.", "#.#", ".#."]),
        Template::from_rows(&["#.", ".#"]),
        Template::from_rows(&[".#.", "###", ".#."]),
        Template::from_rows(&["#.#.#", ".###.", "#...#"]),
        Template::from_rows(&["#.#", ".#.", "###", ".#.", "#.#"]),
        Template::from_rows(&["#.#.#."]),
        Template::from_rows(&["#", ".", "#", ".", "#", "."]),
    ]
}

/// Record of one accepted stamp, kept for inspection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Index into the template slice
    pub template: usize,
    /// Left column of the stamp
    pub x: usize,
    /// Top row of the stamp
    pub y: usize,
    /// Palette index the stamp was painted with
    pub color: usize,
}

/// Stamp templates over `grid` with an attempt budget of area/15
///
/// Oversized templates are skipped. A placement is accepted when at most 30%
/// of its filled cells were painted by earlier placements. Each filled cell is
/// then painted with probability 0.85, raised to 0.95 within two cells of the
/// grid edge and lowered to 0.6 where the 3x3 block already holds more than
/// six cells of that color.
pub fn place_templates<R: Rng + ?Sized>(
    grid: &mut ColorGrid,
    templates: &[Template],
    rng: &mut R,
) -> Vec<Placement> {
    let (width, height) = (grid.width(), grid.height());
    let mut placements = Vec::new();
    if templates.is_empty() || width == 0 || height == 0 {
        return placements;
    }

    let mut used = bitvec![0; width * height];
    let attempts = grid.area() / TEMPLATE_ATTEMPT_DIVISOR;

    for _ in 0..attempts {
        let choice = rng.random_range(0..templates.len());
        let Some(template) = templates.get(choice) else {
            continue;
        };
        if template.width() > width || template.height() > height {
            continue;
        }

        let left = rng.random_range(0..=width - template.width());
        let top = rng.random_range(0..=height - template.height());

        let total = template.filled_count();
        let overlap = template
            .filled_cells()
            .filter(|&(tx, ty)| used.get((top + ty) * width + left + tx).as_deref() == Some(&true))
            .count();
        if total == 0 || overlap as f64 / total as f64 > TEMPLATE_OVERLAP_TOLERANCE {
            continue;
        }

        let color = select_weighted(template.color_profile(), grid.colors(), rng);
        for (tx, ty) in template.filled_cells() {
            let (x, y) = (left + tx, top + ty);
            let near_edge = x < 2 || y < 2 || x + 2 >= width || y + 2 >= height;
            let chance = if grid.count_matching_neighbors(x, y, color) > 6 {
                0.6
            } else if near_edge {
                0.95
            } else {
                0.85
            };

            if rng.random::<f64>() < chance {
                grid.set(x, y, color);
                used.set(y * width + x, true);
            }
        }

        placements.push(Placement {
            template: choice,
            x: left,
            y: top,
            color,
        });
    }

    tracing::debug!(placed = placements.len(), attempts, "stamped templates");
    placements
}
