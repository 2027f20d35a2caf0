//! Tests for the IFS layer

#[cfg(test)]
mod tests {
    use camogen::spatial::fractal::{FractalParams, ifs_layer, quadrant_maps};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_quadrant_maps_halve_and_translate() {
        let maps = quadrant_maps();
        let (x, y) = maps[1].transform(1.0, 1.0);
        assert!((x - 1.0).abs() < 1e-12);
        assert!((y - 0.5).abs() < 1e-12);

        let total: f64 = maps.iter().map(|map| map.probability).sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!(maps[3].rotation > 0.0);
    }

    #[test]
    fn test_layer_uses_map_colors_modulo_palette() {
        let mut rng = StdRng::seed_from_u64(6);
        let layer = ifs_layer(32, 32, 3, &quadrant_maps(), &mut rng);

        assert_eq!((layer.width(), layer.height()), (32, 32));
        assert!(layer.cells().iter().all(|&cell| cell < 3));
        // Map 3 wraps to color 0, map 1 paints color 1
        assert!(layer.cells().iter().any(|&cell| cell == 1));
    }

    #[test]
    fn test_without_maps_layer_stays_background() {
        let mut rng = StdRng::seed_from_u64(6);
        let layer = ifs_layer(8, 8, 4, &[], &mut rng);
        assert!(layer.cells().iter().all(|&cell| cell == 0));

        let identity = FractalParams {
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
            translate_x: 0.0,
            translate_y: 0.0,
            color: 2,
            probability: 1.0,
        };
        let centred = ifs_layer(8, 8, 4, &[identity], &mut rng);
        assert_eq!(centred.get(4, 4), 2);
        assert_eq!(centred.get(0, 0), 0);
    }
}
