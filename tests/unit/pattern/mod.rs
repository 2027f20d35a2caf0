pub mod pat2;
pub mod pat4;

use camogen::math::probability::equal_ratios;
use camogen::pattern::{Canvas, Generator};
use image::{Rgb, Rgba, RgbaImage};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Three-color woodland palette used across recipe tests
pub const PALETTE: [Rgb<u8>; 3] = [Rgb([34, 51, 17]), Rgb([102, 85, 51]), Rgb([170, 170, 119])];

/// Run `generator` on a `width`×`height` canvas with the test palette
pub fn render_with(
    generator: &dyn Generator,
    width: usize,
    height: usize,
    block: usize,
    seed: u64,
) -> RgbaImage {
    let ratios = equal_ratios(PALETTE.len());
    let canvas = Canvas {
        width,
        height,
        block,
        palette: &PALETTE,
        ratios: &ratios,
    };
    let mut rng = StdRng::seed_from_u64(seed);
    generator.generate(&canvas, &mut rng)
}

/// Whether every pixel is an opaque palette color
pub fn only_palette_pixels(image: &RgbaImage) -> bool {
    image.pixels().all(|pixel| {
        PALETTE
            .iter()
            .any(|color| *pixel == Rgba([color.0[0], color.0[1], color.0[2], 255]))
    })
}

/// Number of distinct palette colors present
pub fn colors_used(image: &RgbaImage) -> usize {
    PALETTE
        .iter()
        .filter(|color| {
            let target = Rgba([color.0[0], color.0[1], color.0[2], 255]);
            image.pixels().any(|pixel| *pixel == target)
        })
        .count()
}
