//! Tests for the organic cellular recipe

#[cfg(test)]
mod tests {
    use super::super::{colors_used, only_palette_pixels, render_with};
    use camogen::pattern::pat4::Pat4Generator;

    #[test]
    fn test_output_has_exact_dimensions() {
        let image = render_with(&Pat4Generator, 120, 80, 4, 1);
        assert_eq!(image.dimensions(), (120, 80));
    }

    #[test]
    fn test_only_palette_colors_are_used() {
        let image = render_with(&Pat4Generator, 96, 96, 3, 2);
        assert!(only_palette_pixels(&image));
        assert!(colors_used(&image) >= 2);
    }

    #[test]
    fn test_same_seed_same_pattern() {
        let first = render_with(&Pat4Generator, 64, 48, 2, 99);
        let second = render_with(&Pat4Generator, 64, 48, 2, 99);
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_cell_canvas() {
        let image = render_with(&Pat4Generator, 4, 4, 4, 3);
        assert_eq!(image.dimensions(), (4, 4));
        assert!(only_palette_pixels(&image));
    }
}
