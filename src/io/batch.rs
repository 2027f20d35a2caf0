//! Parallel batch execution of generation jobs
//!
//! Jobs run on a bounded rayon pool. Each job executes on its own thread and
//! the pool worker waits for it with a timeout; a job that overruns is
//! reported as failed and left to finish in the background.

use crate::analysis::extractor::generate_from_image;
use crate::io::configuration::GenerationConfig;
use crate::io::error::{CamoError, Result};
use crate::io::image::save_png;
use crate::io::naming::{image_file_name, pattern_file_name};
use crate::io::palette::{Palette, PaletteEntry};
use crate::io::progress::BatchProgress;
use crate::pattern::{PatternKind, generate};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::{Arc, mpsc};
use std::time::Duration;

/// What a single job generates from
#[derive(Debug, Clone)]
pub enum JobSource {
    /// A palette rendered with one recipe
    Palette {
        /// Unparsed palette entry; bad codes fail only this job
        entry: PaletteEntry,
        /// Recipe to run
        pattern: PatternKind,
    },
    /// A photograph to extract colors from
    Image {
        /// Path of the source image
        path: PathBuf,
    },
}

/// One unit of work with its externally assigned index
#[derive(Debug, Clone)]
pub struct Job {
    /// Index used in the output name and to derive the job seed
    pub index: usize,
    /// Input of the job
    pub source: JobSource,
}

/// Settings shared by every job of a batch
#[derive(Debug, Clone)]
pub struct BatchSettings {
    /// Generation parameters; the recipe comes from each job
    pub config: GenerationConfig,
    /// Directory outputs are written to
    pub output_dir: PathBuf,
    /// Worker thread count
    pub cores: usize,
    /// Time budget per job
    pub timeout: Duration,
    /// Base seed; job `i` uses `seed + i`, otherwise seeded from the OS
    pub seed: Option<u64>,
}

/// Result of one job
#[derive(Debug)]
pub struct JobOutcome {
    /// Index of the job
    pub index: usize,
    /// Written file or the job's error
    pub result: Result<PathBuf>,
}

/// Jobs for every palette and recipe, indexed consecutively
///
/// Palettes are the outer loop so `all` gives each palette a run of
/// consecutive indices.
pub fn palette_jobs(entries: &[PaletteEntry], patterns: &[PatternKind]) -> Vec<Job> {
    entries
        .iter()
        .flat_map(|entry| patterns.iter().map(move |&pattern| (entry, pattern)))
        .enumerate()
        .map(|(index, (entry, pattern))| Job {
            index,
            source: JobSource::Palette {
                entry: entry.clone(),
                pattern,
            },
        })
        .collect()
}

/// One job per source image
pub fn image_jobs(paths: &[PathBuf]) -> Vec<Job> {
    paths
        .iter()
        .enumerate()
        .map(|(index, path)| Job {
            index,
            source: JobSource::Image { path: path.clone() },
        })
        .collect()
}

fn job_rng(seed: Option<u64>, index: usize) -> StdRng {
    seed.map_or_else(StdRng::from_os_rng, |base| {
        StdRng::seed_from_u64(base.wrapping_add(index as u64))
    })
}

/// Run one job to completion on the current thread and write its PNG
///
/// # Errors
///
/// Returns the job's input, decode or export error.
pub fn run_job(
    job: &Job,
    config: &GenerationConfig,
    output_dir: &Path,
    rng: &mut StdRng,
) -> Result<PathBuf> {
    match &job.source {
        JobSource::Palette { entry, pattern } => {
            let palette = Palette::from_hex(entry.name.clone(), &entry.colors)?;
            let job_config = GenerationConfig {
                pattern: *pattern,
                ..config.clone()
            };
            let image = generate(&job_config, &palette.colors, rng)?;
            let name = pattern_file_name(
                job.index,
                &palette,
                *pattern,
                config.width,
                config.height,
            );
            let path = output_dir.join(name);
            save_png(&image, &path)?;
            Ok(path)
        }
        JobSource::Image { path } => {
            let extraction = generate_from_image(config, path, rng)?;
            let name = image_file_name(
                path,
                job.index,
                &extraction.palette,
                config.k,
                config.width,
                config.height,
            );
            let output = output_dir.join(name);
            save_png(&extraction.image, &output)?;
            Ok(output)
        }
    }
}

/// Run one job on a dedicated thread, waiting at most `settings.timeout`
///
/// # Errors
///
/// Returns [`CamoError::Timeout`] when the budget runs out, a worker error if
/// the thread cannot start or dies, and otherwise the job's own error.
pub fn run_with_timeout(job: Job, settings: &Arc<BatchSettings>) -> Result<PathBuf> {
    let (sender, receiver) = mpsc::channel();
    let shared = Arc::clone(settings);
    let index = job.index;

    std::thread::Builder::new()
        .name(format!("camogen-job-{index}"))
        .spawn(move || {
            let mut rng = job_rng(shared.seed, job.index);
            let result = run_job(&job, &shared.config, &shared.output_dir, &mut rng);
            // Receiver is gone once the job has timed out
            let _ = sender.send(result);
        })
        .map_err(|error| CamoError::Worker {
            reason: format!("could not spawn job {index}: {error}"),
        })?;

    match receiver.recv_timeout(settings.timeout) {
        Ok(result) => result,
        Err(mpsc::RecvTimeoutError::Timeout) => Err(CamoError::Timeout {
            seconds: settings.timeout.as_secs(),
        }),
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(CamoError::Worker {
            reason: format!("job {index} stopped without a result"),
        }),
    }
}

/// Run every job on a pool of `settings.cores` threads
///
/// Outcomes are returned in job order; individual failures never abort the
/// batch.
///
/// # Errors
///
/// Returns a worker error only if the thread pool cannot be built.
pub fn run_batch(
    jobs: Vec<Job>,
    settings: BatchSettings,
    progress: &BatchProgress,
) -> Result<Vec<JobOutcome>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(settings.cores.max(1))
        .build()
        .map_err(|error| CamoError::Worker {
            reason: format!("could not build thread pool: {error}"),
        })?;
    let settings = Arc::new(settings);

    tracing::info!(
        jobs = jobs.len(),
        cores = settings.cores,
        output = %settings.output_dir.display(),
        "starting batch"
    );

    let mut outcomes: Vec<JobOutcome> = pool.install(|| {
        jobs.into_par_iter()
            .map(|job| {
                let index = job.index;
                let result = run_with_timeout(job, &settings);
                match &result {
                    Ok(path) => tracing::info!(index, path = %path.display(), "job finished"),
                    Err(error) => tracing::warn!(index, %error, "job failed"),
                }
                progress.record(result.is_ok());
                JobOutcome { index, result }
            })
            .collect()
    });

    outcomes.sort_by_key(|outcome| outcome.index);
    Ok(outcomes)
}
