//! Tests for k-means color extraction

#[cfg(test)]
mod tests {
    use super::super::quadrants;
    use camogen::CamoError;
    use camogen::analysis::kmeans::{kmeans, kmeans_palette, nearest, to_color};
    use image::{Rgb, RgbaImage};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::{Duration, Instant};

    #[test]
    fn test_nearest_prefers_lowest_index_on_ties() {
        let centroids = [[0.0, 0.0, 0.0], [10.0, 0.0, 0.0], [0.0, 10.0, 0.0]];
        assert_eq!(nearest(&[5.0, 0.0, 0.0], &centroids), 0);
        assert_eq!(nearest(&[9.0, 1.0, 0.0], &centroids), 1);
    }

    #[test]
    fn test_quadrants_converge_to_their_colors() {
        let mut rng = StdRng::seed_from_u64(3);
        let palette = kmeans_palette(&quadrants(16, 16), 4, 100, &mut rng).unwrap_or_default();

        let mut found: Vec<[u8; 3]> = palette.iter().map(|color| color.0).collect();
        found.sort_unstable();
        assert_eq!(
            found,
            vec![[10, 10, 10], [40, 80, 30], [110, 70, 40], [200, 180, 130]]
        );
    }

    #[test]
    fn test_more_clusters_than_colors() {
        let points = [[0.0, 0.0, 0.0], [0.0, 0.0, 0.0], [255.0, 255.0, 255.0]];
        let mut rng = StdRng::seed_from_u64(8);
        let centroids = kmeans(&points, 3, 10, &mut rng);

        assert_eq!(centroids.len(), 3);
        assert!(centroids.iter().all(|centroid| points.contains(centroid)));
    }

    #[test]
    fn test_invalid_inputs() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            kmeans_palette(&quadrants(4, 4), 0, 10, &mut rng),
            Err(CamoError::InvalidParameter { parameter: "k", .. })
        ));
        assert!(kmeans_palette(&RgbaImage::new(0, 0), 2, 10, &mut rng).is_err());
        assert!(kmeans(&[], 2, 10, &mut rng).is_empty());
    }

    #[test]
    fn test_to_color_truncates_and_clamps() {
        assert_eq!(to_color(&[12.9, -4.0, 300.0]), Rgb([12, 0, 255]));
    }

    // Verified by a million mostly distinct colors, as a full-resolution photo produces
    #[test]
    fn test_initialisation_scales_to_large_images() {
        let points: Vec<[f64; 3]> = (0..1_000_u32)
            .flat_map(|y| {
                (0..1_000_u32).map(move |x| {
                    let mixed = x.wrapping_mul(2_654_435_761) ^ y.wrapping_mul(40_503);
                    [
                        f64::from(mixed & 0xff),
                        f64::from((mixed >> 8) & 0xff),
                        f64::from((mixed >> 16) & 0xff),
                    ]
                })
            })
            .collect();
        let mut rng = StdRng::seed_from_u64(12);

        let start = Instant::now();
        let centroids = kmeans(&points, 4, 1, &mut rng);

        assert_eq!(centroids.len(), 4);
        assert!(start.elapsed() < Duration::from_secs(30));
    }
}
