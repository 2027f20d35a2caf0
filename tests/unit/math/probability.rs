//! Tests for weighted selection and ratio profiles

#[cfg(test)]
mod tests {
    use camogen::io::error::ErrorKind;
    use camogen::math::probability::{
        RatioSpec, cumulative_index, equal_ratios, marpat_ratios, select_weighted,
        select_weighted_excluding,
    };
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_empty_and_single_ratios_select_background() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            assert_eq!(select_weighted(&[], 4, &mut rng), 0);
            assert_eq!(select_weighted(&[1.0], 4, &mut rng), 0);
        }
    }

    #[test]
    fn test_even_ratios_split_evenly() {
        let mut rng = StdRng::seed_from_u64(7);
        let draws = 100_000;
        let ones = (0..draws)
            .filter(|_| select_weighted(&[0.5, 0.5], 2, &mut rng) == 1)
            .count();
        let share = ones as f64 / f64::from(draws);
        assert!((share - 0.5).abs() < 0.02, "share of index 1 was {share}");
    }

    #[test]
    fn test_cumulative_index_clamps_to_palette() {
        let ratios = [0.2, 0.3, 0.5];
        assert_eq!(cumulative_index(0.1, &ratios, 3), 0);
        assert_eq!(cumulative_index(0.45, &ratios, 3), 1);
        assert_eq!(cumulative_index(0.99, &ratios, 3), 2);
        assert_eq!(cumulative_index(0.99, &ratios, 2), 1);
        assert_eq!(cumulative_index(1.5, &[0.3, 0.3], 2), 1);
    }

    #[test]
    fn test_excluding_never_returns_excluded() {
        let mut rng = StdRng::seed_from_u64(3);
        let ratios = equal_ratios(4);
        for _ in 0..2000 {
            let index = select_weighted_excluding(&ratios, &[0, 2], 4, &mut rng);
            assert!(index == 1 || index == 3);
        }
        assert_eq!(select_weighted_excluding(&ratios, &[0, 1, 2], 4, &mut rng), 3);
        assert_eq!(select_weighted_excluding(&ratios, &[0, 1, 2, 3], 4, &mut rng), 0);
    }

    #[test]
    fn test_ratio_profiles() {
        assert!(equal_ratios(0).is_empty());
        assert_eq!(equal_ratios(4), vec![0.25; 4]);
        assert_eq!(marpat_ratios(4), vec![0.45, 0.30, 0.15, 0.10]);
        assert_eq!(marpat_ratios(3), vec![0.50, 0.35, 0.15]);
        assert_eq!(marpat_ratios(5), equal_ratios(5));
    }

    #[test]
    fn test_ratio_spec_parsing() {
        assert_eq!("".parse::<RatioSpec>().ok(), Some(RatioSpec::Equal));
        assert_eq!("equal".parse::<RatioSpec>().ok(), Some(RatioSpec::Equal));
        assert_eq!("random".parse::<RatioSpec>().ok(), Some(RatioSpec::Random));
        assert_eq!(
            "2, 1,3".parse::<RatioSpec>().ok(),
            Some(RatioSpec::Cycle(vec![2, 1, 3]))
        );

        for bad in ["0,1", "-2,1", "a,1", "1,,2", "1.5"] {
            let error = bad.parse::<RatioSpec>().err();
            assert!(
                error.as_ref().is_some_and(|e| e.kind() == ErrorKind::Input),
                "{bad} should be rejected"
            );
        }
    }

    // Cycled weights repeat to the palette length before normalising
    #[test]
    fn test_ratio_spec_resolution() {
        let mut rng = StdRng::seed_from_u64(11);
        let cycled = RatioSpec::Cycle(vec![2, 1]).resolve(4, &mut rng);
        let expected = [2.0 / 6.0, 1.0 / 6.0, 2.0 / 6.0, 1.0 / 6.0];
        for (got, want) in cycled.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12);
        }

        let random = RatioSpec::Random.resolve(5, &mut rng);
        assert_eq!(random.len(), 5);
        assert!((random.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(random.iter().all(|&ratio| ratio > 0.0));

        assert_eq!(RatioSpec::Equal.resolve(2, &mut rng), vec![0.5, 0.5]);
    }
}
