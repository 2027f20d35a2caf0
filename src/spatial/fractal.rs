//! Iterated function system layer used as a self-similar blend source

use crate::spatial::grid::ColorGrid;
use rand::Rng;
use std::f64::consts::FRAC_PI_4;

/// One affine map of the unit square, tagged with a palette index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractalParams {
    /// Horizontal scale
    pub scale_x: f64,
    /// Vertical scale
    pub scale_y: f64,
    /// Rotation in radians
    pub rotation: f64,
    /// Horizontal translation in unit coordinates
    pub translate_x: f64,
    /// Vertical translation in unit coordinates
    pub translate_y: f64,
    /// Palette index stamped where this map lands (taken modulo palette length)
    pub color: usize,
    /// Selection weight
    pub probability: f64,
}

impl FractalParams {
    /// Apply the map to a point in unit coordinates
    pub fn transform(&self, x: f64, y: f64) -> (f64, f64) {
        let (sin, cos) = self.rotation.sin_cos();
        (
            self.scale_x * cos * x - self.scale_y * sin * y + self.translate_x,
            self.scale_x * sin * x + self.scale_y * cos * y + self.translate_y,
        )
    }
}

/// The four half-scale quadrant maps, the last one rotated by 45°
pub fn quadrant_maps() -> [FractalParams; 4] {
    let map = |translate_x, translate_y, rotation, color| FractalParams {
        scale_x: 0.5,
        scale_y: 0.5,
        rotation,
        translate_x,
        translate_y,
        color,
        probability: 0.25,
    };
    [
        map(0.0, 0.0, 0.0, 0),
        map(0.5, 0.0, 0.0, 1),
        map(0.0, 0.5, 0.0, 2),
        map(0.5, 0.5, FRAC_PI_4, 3),
    ]
}

fn choose_map<'a, R: Rng + ?Sized>(
    maps: &'a [FractalParams],
    rng: &mut R,
) -> Option<&'a FractalParams> {
    let draw = rng.random::<f64>();
    let mut cumulative = 0.0;
    for map in maps {
        cumulative += map.probability;
        if draw <= cumulative {
            return Some(map);
        }
    }
    maps.first()
}

/// Run the chaos game over `maps` and record landing colors on a grid
///
/// The running point starts at the centre of the unit square and takes
/// area/4 steps. Cells never landed on keep palette index 0.
pub fn ifs_layer<R: Rng + ?Sized>(
    width: usize,
    height: usize,
    colors: usize,
    maps: &[FractalParams],
    rng: &mut R,
) -> ColorGrid {
    let mut layer = ColorGrid::filled(width, height, colors, 0);
    let colors = colors.max(1);
    let (mut x, mut y) = (0.5, 0.5);

    for _ in 0..(width * height) / 4 {
        let Some(map) = choose_map(maps, rng) else {
            break;
        };
        (x, y) = map.transform(x, y);

        let cell_x = (x * width as f64).floor() as isize;
        let cell_y = (y * height as f64).floor() as isize;
        layer.set_signed(cell_x, cell_y, map.color % colors);
    }

    layer
}
