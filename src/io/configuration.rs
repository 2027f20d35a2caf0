//! Generation constants and runtime configuration defaults

use crate::math::divisors::reconcile_block_size;
use crate::math::probability::RatioSpec;
use crate::pattern::PatternKind;

// Output geometry defaults
/// Default output width in pixels
pub const DEFAULT_WIDTH: usize = 1500;
/// Default output height in pixels
pub const DEFAULT_HEIGHT: usize = 1500;
/// Block size used when none (or zero) is requested
pub const DEFAULT_BLOCK_SIZE: usize = 4;

// Image-derived palette defaults
/// Default number of colors extracted from a photograph
pub const DEFAULT_K: usize = 4;
/// Shortest side a source photograph is normalised to before cover-resizing
pub const NORMALIZED_SHORTEST_SIDE: u32 = 256;
/// Fixed k-means iteration count
pub const KMEANS_ITERATIONS: usize = 100;
/// Centroid distance gap below which two colors are blended
pub const SOFT_BLEND_GAP: f64 = 30.0;
/// Nearest-centroid distance above which blending may apply
pub const SOFT_BLEND_FLOOR: f64 = 10.0;

// Batch settings
/// Seconds a job may run before the batch stops waiting for it
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
/// Directory generated images are written to
pub const DEFAULT_OUTPUT_DIR: &str = "output";
/// Directory scanned for photographs when image mode has no `-i`
pub const DEFAULT_INPUT_DIR: &str = "input";
/// Prefix shared by every output file name
pub const OUTPUT_PREFIX: &str = "gocamo";

// Organic growth tunables
/// Candidate placements tried around an active point before retiring it
pub const POISSON_RETRY_LIMIT: usize = 30;
/// Share of growth steps that follow a seed's preferred directions
pub const GROWTH_DIRECTION_BIAS: f64 = 0.7;
/// How strongly local density suppresses growth
pub const GROWTH_DENSITY_DAMPING: f64 = 0.3;
/// Chance per round that the growth frontier is halved
pub const GROWTH_PRUNE_CHANCE: f64 = 0.3;

// Template placement tunables
/// Grid area per placement attempt
pub const TEMPLATE_ATTEMPT_DIVISOR: usize = 15;
/// Largest share of a stamp that may cover earlier stamps
pub const TEMPLATE_OVERLAP_TOLERANCE: f64 = 0.3;

// Post-processing tunables
/// Per-pixel chance of mixing in a random palette color
pub const NOISE_CHANCE: f64 = 0.05;
/// Width in pixels of the jittered band along cell boundaries
pub const EDGE_BAND: usize = 2;

// Progress bar display settings
/// Width of the batch progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Everything a single generation call reads
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    /// Output width in pixels
    pub width: usize,
    /// Output height in pixels
    pub height: usize,
    /// Requested block size before reconciliation
    pub block_size: usize,
    /// Recipe to run
    pub pattern: PatternKind,
    /// Color weighting; `None` lets the recipe choose
    pub ratios: Option<RatioSpec>,
    /// Apply the noise post-pass
    pub add_noise: bool,
    /// Apply the edge jitter post-pass
    pub add_edge: bool,
    /// Number of colors to extract in image mode
    pub k: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            block_size: DEFAULT_BLOCK_SIZE,
            pattern: PatternKind::Pat1,
            ratios: None,
            add_noise: false,
            add_edge: false,
            k: DEFAULT_K,
        }
    }
}

impl GenerationConfig {
    /// Block size that exactly tiles the configured output
    pub fn reconciled_block_size(&self) -> usize {
        reconcile_block_size(self.block_size, self.width, self.height)
    }

    /// Grid dimensions `(columns, rows)` at the reconciled block size
    pub fn grid_dimensions(&self) -> (usize, usize) {
        let block = self.reconciled_block_size();
        (self.width / block, self.height / block)
    }
}
