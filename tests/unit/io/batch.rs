//! Tests for job expansion and batch execution

#[cfg(test)]
mod tests {
    use camogen::CamoError;
    use camogen::io::batch::{
        BatchSettings, JobSource, image_jobs, palette_jobs, run_batch, run_job,
    };
    use camogen::io::configuration::GenerationConfig;
    use camogen::io::palette::PaletteEntry;
    use camogen::io::progress::BatchProgress;
    use camogen::pattern::PatternKind;
    use image::{Rgba, RgbaImage};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::path::{Path, PathBuf};
    use std::time::Duration;

    fn entry(name: &str, colors: &[&str]) -> PaletteEntry {
        PaletteEntry {
            name: name.to_string(),
            colors: colors.iter().map(|c| (*c).to_string()).collect(),
        }
    }

    fn small_config() -> GenerationConfig {
        GenerationConfig {
            width: 40,
            height: 24,
            block_size: 4,
            ..GenerationConfig::default()
        }
    }

    fn settings(output_dir: &Path, timeout: Duration) -> BatchSettings {
        BatchSettings {
            config: small_config(),
            output_dir: output_dir.to_path_buf(),
            cores: 2,
            timeout,
            seed: Some(42),
        }
    }

    #[test]
    fn test_all_expands_palettes_with_consecutive_indices() {
        let entries = [entry("a", &["000", "fff"]), entry("b", &["111", "eee"])];
        let jobs = palette_jobs(&entries, &PatternKind::ALL);

        assert_eq!(jobs.len(), 10);
        for (position, job) in jobs.iter().enumerate() {
            assert_eq!(job.index, position);
        }
        let JobSource::Palette { entry, pattern } = &jobs[6].source else {
            unreachable!("palette jobs only");
        };
        assert_eq!(entry.name, "b");
        assert_eq!(*pattern, PatternKind::Pat2);
    }

    #[test]
    fn test_image_jobs_follow_path_order() {
        let paths = [PathBuf::from("x.png"), PathBuf::from("y.jpg")];
        let jobs = image_jobs(&paths);
        assert_eq!(jobs.len(), 2);
        assert!(matches!(&jobs[1].source, JobSource::Image { path } if path == Path::new("y.jpg")));
    }

    #[test]
    fn test_run_job_writes_named_png() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        let jobs = palette_jobs(&[entry("test", &["#ff0000", "00ff00"])], &[PatternKind::Pat3]);
        let mut rng = StdRng::seed_from_u64(1);

        let written = run_job(&jobs[0], &small_config(), dir.path(), &mut rng);
        let expected = dir.path().join("gocamo_000_test_ff0000_00ff00_pat3_w40x24.png");
        assert_eq!(written.ok(), Some(expected.clone()));

        let image = image::open(&expected).map_err(std::io::Error::other)?;
        assert_eq!((image.width(), image.height()), (40, 24));
        Ok(())
    }

    #[test]
    fn test_image_job_names_output_after_source() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        let source = dir.path().join("swatch.png");
        RgbaImage::from_fn(20, 20, |x, _| {
            if x < 10 {
                Rgba([20, 40, 20, 255])
            } else {
                Rgba([200, 180, 120, 255])
            }
        })
        .save(&source)
        .map_err(std::io::Error::other)?;

        let config = GenerationConfig {
            k: 2,
            ..small_config()
        };
        let jobs = image_jobs(&[source]);
        let mut rng = StdRng::seed_from_u64(2);
        let written = run_job(&jobs[0], &config, &dir.path().join("out"), &mut rng);

        let Ok(path) = written else {
            unreachable!("image job should succeed");
        };
        let name = path.file_name().map(|n| n.to_string_lossy().to_string());
        assert!(name.as_deref().is_some_and(|n| n.starts_with("gocamo_from_image_swatch_000_")));
        assert!(name.as_deref().is_some_and(|n| n.ends_with("_k2_w40x24.png")));
        assert!(path.exists());
        Ok(())
    }

    // Tests that one bad palette fails alone
    // Verified by aborting the batch on the first error
    #[test]
    fn test_batch_isolates_failing_jobs() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        let entries = [
            entry("good", &["333", "999"]),
            entry("bad", &["zzzzzz", "999"]),
            entry("short", &["333"]),
        ];
        let jobs = palette_jobs(&entries, &[PatternKind::Pat1]);
        let progress = BatchProgress::hidden(jobs.len());

        let outcomes = run_batch(jobs, settings(dir.path(), Duration::from_secs(60)), &progress)
            .unwrap_or_default();

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].result.is_ok());
        assert!(matches!(outcomes[1].result, Err(CamoError::InvalidColor { .. })));
        assert!(matches!(outcomes[2].result, Err(CamoError::TooFewColors { count: 1 })));
        assert_eq!(progress.failed(), 2);
        Ok(())
    }

    #[test]
    fn test_seeded_batches_are_reproducible() -> std::io::Result<()> {
        let first = tempfile::tempdir()?;
        let second = tempfile::tempdir()?;
        let jobs = palette_jobs(&[entry("r", &["102030", "405060", "708090"])], &[PatternKind::Pat4]);

        for dir in [&first, &second] {
            let progress = BatchProgress::hidden(1);
            let outcomes =
                run_batch(jobs.clone(), settings(dir.path(), Duration::from_secs(60)), &progress)
                    .unwrap_or_default();
            assert!(outcomes.iter().all(|outcome| outcome.result.is_ok()));
        }

        let name = "gocamo_000_r_102030_405060_708090_pat4_w40x24.png";
        let a = std::fs::read(first.path().join(name))?;
        let b = std::fs::read(second.path().join(name))?;
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    fn test_overrunning_job_times_out() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        let jobs = palette_jobs(&[entry("slow", &["000", "fff"])], &[PatternKind::Pat2]);
        let mut batch = settings(dir.path(), Duration::ZERO);
        batch.config.width = 600;
        batch.config.height = 600;
        let progress = BatchProgress::hidden(1);

        let outcomes = run_batch(jobs, batch, &progress).unwrap_or_default();
        assert!(matches!(outcomes[0].result, Err(CamoError::Timeout { seconds: 0 })));
        Ok(())
    }
}
