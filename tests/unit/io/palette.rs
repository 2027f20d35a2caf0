//! Tests for hex parsing, palette files and image discovery

#[cfg(test)]
mod tests {
    use camogen::CamoError;
    use camogen::io::error::ErrorKind;
    use camogen::io::palette::{
        Palette, find_images, is_image_file, load_palette_file, parse_color_list, parse_hex,
        parse_palette_json, strip_hash, to_hex,
    };
    use image::Rgb;
    use std::path::Path;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(parse_hex("#FF8000").ok(), Some(Rgb([255, 128, 0])));
        assert_eq!(parse_hex("ff8000").ok(), Some(Rgb([255, 128, 0])));
        assert_eq!(parse_hex("#0aF").ok(), Some(Rgb([0, 170, 255])));
        assert_eq!(parse_hex("abc").ok(), Some(Rgb([170, 187, 204])));
    }

    // Tests rejection of malformed codes
    // Verified by accepting inner spaces
    #[test]
    fn test_parse_hex_rejects_bad_codes() {
        for bad in ["", "#", "ff00", "#ff00000", "gg0000", " ff0000", "ff0000 ", "ff 000", "##fff"] {
            let result = parse_hex(bad);
            assert!(
                matches!(result, Err(CamoError::InvalidColor { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_hex_round_trip_helpers() {
        assert_eq!(to_hex(Rgb([1, 171, 255])), "01abff");
        assert_eq!(strip_hash("#a1b2c3"), "a1b2c3");
        assert_eq!(strip_hash("a1b2c3"), "a1b2c3");
    }

    #[test]
    fn test_palette_requires_two_colors() {
        let none: Vec<String> = Vec::new();
        assert!(matches!(Palette::from_hex("x", &none), Err(CamoError::NoColors)));

        let one = vec!["#000000".to_string()];
        assert!(matches!(
            Palette::from_hex("x", &one),
            Err(CamoError::TooFewColors { count: 1 })
        ));

        let two = vec!["#000000".to_string(), "fff".to_string()];
        let palette = Palette::from_hex("night", &two);
        assert_eq!(
            palette.ok().map(|p| p.colors),
            Some(vec![Rgb([0, 0, 0]), Rgb([255, 255, 255])])
        );
    }

    #[test]
    fn test_color_list_drops_spaces_and_empty_entries() {
        let palette = parse_color_list(" #112233, 445566 ,,778899");
        let Ok(palette) = palette else {
            unreachable!("list should parse");
        };
        assert_eq!(palette.name, "custom");
        assert_eq!(palette.codes, vec!["#112233", "445566", "778899"]);
        assert_eq!(palette.colors.len(), 3);

        assert!(matches!(
            parse_color_list("ff0000"),
            Err(CamoError::TooFewColors { count: 1 })
        ));
        assert!(matches!(parse_color_list(" , "), Err(CamoError::NoColors)));
    }

    #[test]
    fn test_palette_json() {
        let path = Path::new("palettes.json");
        let text = r##"[
            {"name": "woodland", "colors": ["#4b5320", "#8b7355", "#2f3f2f"]},
            {"name": "desert", "colors": ["c2b280", "a0522d"]}
        ]"##;
        let entries = parse_palette_json(text, path).unwrap_or_default();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "woodland");
        assert_eq!(entries[1].colors, vec!["c2b280", "a0522d"]);

        let empty = parse_palette_json("[]", path);
        assert!(empty.is_err_and(|e| e.kind() == ErrorKind::Input));

        let malformed = parse_palette_json("{\"name\": 1}", path);
        assert!(matches!(malformed, Err(CamoError::PaletteFile { .. })));
    }

    #[test]
    fn test_load_palette_file_reports_missing_file() {
        let result = load_palette_file(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(CamoError::FileSystem { .. })));
    }

    #[test]
    fn test_find_images_recurses_and_filters() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested)?;
        for name in ["a.png", "b.JPG", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"")?;
        }
        std::fs::write(nested.join("c.jpeg"), b"")?;

        let found = find_images(dir.path()).unwrap_or_default();
        let names: Vec<String> = found
            .iter()
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().to_string())
            .collect();
        assert_eq!(found.len(), 3);
        assert!(names.contains(&"a.png".to_string()));
        assert!(names.contains(&"b.JPG".to_string()));
        assert!(names.contains(&"c.jpeg".to_string()));

        assert!(is_image_file(Path::new("x.PNG")));
        assert!(!is_image_file(Path::new("x.gif")));
        assert!(!is_image_file(Path::new("png")));
        Ok(())
    }
}
