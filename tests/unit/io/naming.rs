//! Tests for output file name conventions

#[cfg(test)]
mod tests {
    use camogen::io::naming::{image_file_name, pattern_file_name};
    use camogen::io::palette::Palette;
    use camogen::pattern::PatternKind;
    use image::Rgb;
    use std::path::Path;

    #[test]
    fn test_pattern_file_name() {
        let codes = vec!["#4B5320".to_string(), "8b7355".to_string(), "#abc".to_string()];
        let Ok(palette) = Palette::from_hex("woodland", &codes) else {
            unreachable!("codes are valid");
        };
        assert_eq!(
            pattern_file_name(7, &palette, PatternKind::Pat3, 1500, 1000),
            "gocamo_007_woodland_4B5320_8b7355_abc_pat3_w1500x1000.png"
        );
    }

    #[test]
    fn test_image_file_name() {
        let colors = [Rgb([16, 32, 48]), Rgb([255, 0, 170])];
        assert_eq!(
            image_file_name(Path::new("photos/forest.floor.jpg"), 12, &colors, 4, 800, 600),
            "gocamo_from_image_forest.floor_012_102030_ff00aa_k4_w800x600.png"
        );
    }

    #[test]
    fn test_index_padding_grows_past_three_digits() {
        let codes = vec!["000".to_string(), "fff".to_string()];
        let Ok(palette) = Palette::from_hex("mono", &codes) else {
            unreachable!("codes are valid");
        };
        let name = pattern_file_name(1234, &palette, PatternKind::Blob, 8, 8);
        assert_eq!(name, "gocamo_1234_mono_000_fff_blob_w8x8.png");
    }
}
