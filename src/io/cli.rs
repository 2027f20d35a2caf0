//! Command-line interface for batch camouflage generation

use crate::io::batch::{BatchSettings, Job, JobOutcome, image_jobs, palette_jobs, run_batch};
use crate::io::configuration::{
    DEFAULT_BLOCK_SIZE, DEFAULT_HEIGHT, DEFAULT_INPUT_DIR, DEFAULT_K, DEFAULT_OUTPUT_DIR, DEFAULT_TIMEOUT_SECS,
    DEFAULT_WIDTH, GenerationConfig,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::palette::{PaletteEntry, find_images, load_palette_file, parse_color_list};
use crate::io::progress::BatchProgress;
use crate::math::probability::RatioSpec;
use crate::pattern::PatternKind;
use clap::Parser;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser, Debug, Clone)]
#[command(name = "camogen")]
#[command(
    author,
    version,
    about = "Generate digital camouflage from colour palettes or photographs"
)]
/// Command-line arguments for the camouflage generator
pub struct Cli {
    /// Output width in pixels
    #[arg(short = 'w', long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Output height in pixels
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Base block size in pixels (adjusted to divide the output exactly)
    #[arg(short = 'b', long, default_value_t = DEFAULT_BLOCK_SIZE)]
    pub block_size: usize,

    /// Comma-separated hex colors for a single palette
    #[arg(short = 'c', long)]
    pub colors: Option<String>,

    /// JSON file holding a list of named palettes
    #[arg(short = 'j', long)]
    pub json: Option<PathBuf>,

    /// Directory generated images are written to
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Pattern type: pat1..pat5, box, blob, all, or image
    #[arg(short = 't', long, default_value = "pat1")]
    pub pattern: String,

    /// Directory of source photographs (switches to image mode)
    #[arg(short = 'i', long)]
    pub images: Option<PathBuf>,

    /// Number of colors to extract in image mode
    #[arg(short = 'k', long, default_value_t = DEFAULT_K)]
    pub k: usize,

    /// Color ratios: 'equal', 'random', or integers like '2,1,3'
    #[arg(short = 'r', long)]
    pub ratios: Option<String>,

    /// Mix random palette noise into the output
    #[arg(long)]
    pub noise: bool,

    /// Roughen block edges
    #[arg(long)]
    pub edge: bool,

    /// Worker threads (clamped to the available cores)
    #[arg(long)]
    pub cores: Option<usize>,

    /// Seconds each job may run before it is abandoned
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Base seed for reproducible output; job i uses seed + i
    #[arg(long)]
    pub seed: Option<u64>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

/// What the batch produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// One recipe per palette
    Single(PatternKind),
    /// Every numbered recipe per palette
    All,
    /// Extract colors from photographs
    Image,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Resolve the mode; `-i` always selects image mode
    ///
    /// # Errors
    ///
    /// Returns an unknown pattern error for an unrecognised `-t` value.
    pub fn mode(&self) -> Result<Mode> {
        if self.images.is_some() {
            return Ok(Mode::Image);
        }
        match self.pattern.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Mode::All),
            "image" => Ok(Mode::Image),
            _ => self.pattern.parse().map(Mode::Single),
        }
    }

    /// Generation parameters with out-of-range values replaced by defaults
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error for a malformed ratio list.
    pub fn generation_config(&self) -> Result<GenerationConfig> {
        let or_default = |value: usize, default: usize| if value < 1 { default } else { value };
        let ratios = self
            .ratios
            .as_deref()
            .map(str::parse::<RatioSpec>)
            .transpose()?;
        Ok(GenerationConfig {
            width: or_default(self.width, DEFAULT_WIDTH),
            height: or_default(self.height, DEFAULT_HEIGHT),
            block_size: or_default(self.block_size, DEFAULT_BLOCK_SIZE),
            ratios,
            add_noise: self.noise,
            add_edge: self.edge,
            k: self.k,
            ..GenerationConfig::default()
        })
    }

    /// Worker count clamped to `1..=available`
    pub fn worker_count(&self) -> usize {
        let available = std::thread::available_parallelism().map_or(1, usize::from);
        self.cores.unwrap_or(available).clamp(1, available)
    }

    fn palettes(&self) -> Result<Vec<PaletteEntry>> {
        if let Some(list) = &self.colors {
            let palette = parse_color_list(list)?;
            return Ok(vec![PaletteEntry {
                name: palette.name,
                colors: palette.codes,
            }]);
        }
        if let Some(path) = &self.json {
            return load_palette_file(path);
        }
        Err(invalid_parameter(
            "input",
            &"none",
            &"use -c for colors, -j for a JSON file, or -i for an image directory",
        ))
    }

    /// Expand the arguments into numbered jobs
    ///
    /// # Errors
    ///
    /// Fails on an unknown pattern, missing or invalid palette input, or an
    /// image directory that cannot be read or holds no images.
    pub fn jobs(&self) -> Result<Vec<Job>> {
        match self.mode()? {
            Mode::Image => {
                let dir = self.images.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR));
                let paths = find_images(&dir)?;
                if paths.is_empty() {
                    return Err(invalid_parameter(
                        "images",
                        &dir.display(),
                        &"no image files found in directory",
                    ));
                }
                Ok(image_jobs(&paths))
            }
            Mode::All => Ok(palette_jobs(&self.palettes()?, &PatternKind::ALL)),
            Mode::Single(kind) => Ok(palette_jobs(&self.palettes()?, &[kind])),
        }
    }

    /// Run the whole batch and return per-job outcomes
    ///
    /// Failed jobs are logged and counted but do not fail the run.
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments are invalid or the worker pool
    /// cannot be started.
    pub fn run(&self) -> Result<Vec<JobOutcome>> {
        let start_time = Instant::now();
        let config = self.generation_config()?;
        let jobs = self.jobs()?;

        let settings = BatchSettings {
            config,
            output_dir: self.output.clone(),
            cores: self.worker_count(),
            timeout: Duration::from_secs(self.timeout),
            seed: self.seed,
        };
        tracing::info!(
            width = settings.config.width,
            height = settings.config.height,
            block_size = settings.config.block_size,
            pattern = %self.pattern,
            noise = settings.config.add_noise,
            edge = settings.config.add_edge,
            "generating patterns"
        );

        let progress = if self.should_show_progress() {
            BatchProgress::new(jobs.len())
        } else {
            BatchProgress::hidden(jobs.len())
        };
        let outcomes = run_batch(jobs, settings, &progress)?;
        progress.finish();

        let failed = progress.failed();
        if failed > 0 {
            tracing::warn!(failed, total = progress.total(), "some jobs failed");
        }
        tracing::info!(
            seconds = start_time.elapsed().as_secs_f64(),
            "batch complete"
        );
        Ok(outcomes)
    }
}
