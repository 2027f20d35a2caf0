//! Tests for the block-resolution color grid

#[cfg(test)]
mod tests {
    use camogen::spatial::grid::{ColorGrid, most_frequent, opaque};
    use image::{Rgb, Rgba};

    #[test]
    fn test_indices_are_clamped_to_palette() {
        let mut grid = ColorGrid::from_fn(3, 2, 2, |x, _| x);
        assert_eq!(grid.get(2, 0), 1);

        grid.set(0, 0, 9);
        assert_eq!(grid.get(0, 0), 1);

        assert_eq!(ColorGrid::filled(2, 2, 3, 7).get(1, 1), 2);
    }

    #[test]
    fn test_out_of_range_access_is_ignored() {
        let mut grid = ColorGrid::filled(4, 3, 3, 1);
        grid.set(10, 10, 2);
        grid.set_signed(-1, 0, 2);
        assert!(grid.cells().iter().all(|&cell| cell == 1));

        assert_eq!(grid.get_signed(-1, 0), None);
        assert_eq!(grid.get_signed(3, 2), Some(1));
        assert_eq!(grid.get_signed(4, 0), None);
        assert!(grid.contains(3, 2));
        assert!(!grid.contains(0, 3));
    }

    #[test]
    fn test_neighbor_count_includes_centre() {
        let mut grid = ColorGrid::filled(3, 3, 2, 0);
        grid.set(1, 1, 1);
        grid.set(0, 0, 1);
        assert_eq!(grid.count_matching_neighbors(1, 1, 1), 2);
        assert_eq!(grid.count_matching_neighbors(1, 1, 0), 7);
        // Corner cells only see their in-grid neighbors
        assert_eq!(grid.count_matching_neighbors(0, 0, 0), 2);
    }

    #[test]
    fn test_dominant_ties_go_to_lowest_index() {
        let grid = ColorGrid::from_fn(4, 1, 3, |x, _| if x < 2 { 2 } else { 1 });
        assert_eq!(grid.dominant_in(0, 0, 4, 1), 1);
        assert_eq!(grid.dominant_in(0, 0, 3, 1), 2);
        assert_eq!(most_frequent(&[0, 3, 3, 1]), 1);
        assert_eq!(most_frequent(&[]), 0);
    }

    #[test]
    fn test_render_maps_pixels_to_cells() {
        let palette = [Rgb([10, 20, 30]), Rgb([200, 100, 50])];
        let grid = ColorGrid::from_fn(2, 2, 2, |x, y| (x + y) % 2);
        let image = grid.render(&palette, 3);

        assert_eq!(image.dimensions(), (6, 6));
        assert_eq!(*image.get_pixel(2, 2), Rgba([10, 20, 30, 255]));
        assert_eq!(*image.get_pixel(3, 0), Rgba([200, 100, 50, 255]));
        assert_eq!(*image.get_pixel(5, 5), Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_tiled_render_wraps_to_exact_size() {
        let palette = [Rgb([0, 0, 0]), Rgb([255, 255, 255])];
        let grid = ColorGrid::from_fn(2, 1, 2, |x, _| x);
        let image = grid.render_tiled(&palette, 2, 9, 3);

        assert_eq!(image.dimensions(), (9, 3));
        assert_eq!(*image.get_pixel(1, 2), opaque(palette[0]));
        assert_eq!(*image.get_pixel(2, 0), opaque(palette[1]));
        // Column 4 wraps back to grid column 0
        assert_eq!(*image.get_pixel(8, 0), opaque(palette[0]));
    }
}
