//! Tests for the scattered multi-scale recipe

#[cfg(test)]
mod tests {
    use super::super::{colors_used, only_palette_pixels, render_with};
    use camogen::pattern::pat2::Pat2Generator;

    #[test]
    fn test_output_has_exact_dimensions() {
        let image = render_with(&Pat2Generator, 120, 80, 4, 1);
        assert_eq!(image.dimensions(), (120, 80));
    }

    #[test]
    fn test_only_palette_colors_are_used() {
        let image = render_with(&Pat2Generator, 96, 96, 3, 2);
        assert!(only_palette_pixels(&image));
        assert!(colors_used(&image) >= 2);
    }

    #[test]
    fn test_same_seed_same_pattern() {
        let first = render_with(&Pat2Generator, 64, 48, 2, 99);
        let second = render_with(&Pat2Generator, 64, 48, 2, 99);
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_cell_canvas() {
        let image = render_with(&Pat2Generator, 4, 4, 4, 3);
        assert_eq!(image.dimensions(), (4, 4));
        assert!(only_palette_pixels(&image));
    }

    // Tests that blob, cluster and stroke layers all run at pixel resolution
    #[test]
    fn test_fine_grid_runs_every_layer() {
        let image = render_with(&Pat2Generator, 200, 150, 1, 22);
        assert_eq!(image.dimensions(), (200, 150));
        assert!(only_palette_pixels(&image));
        assert!(colors_used(&image) >= 2);
    }
}
