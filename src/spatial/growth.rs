//! Poisson-disk seeded organic cluster growth
//!
//! Seeds are spread with an approximate Poisson-disk sampler, then each seed
//! floods outward along its preferred compass directions until it reaches its
//! size budget. Clusters render as rectangular stamps whose granularity
//! depends on how large the cluster was allowed to become.

use crate::io::configuration::{
    GROWTH_DENSITY_DAMPING, GROWTH_DIRECTION_BIAS, GROWTH_PRUNE_CHANCE, POISSON_RETRY_LIMIT,
};
use crate::spatial::grid::opaque;
use bitvec::prelude::*;
use image::{Rgb, RgbaImage};
use rand::Rng;
use std::collections::HashMap;
use std::f64::consts::{PI, SQRT_2};

/// Compass offsets in the order NW, N, NE, W, E, SW, S, SE
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Starting point and growth parameters for one cluster
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterSeed {
    /// Column of the seed pixel
    pub x: usize,
    /// Row of the seed pixel
    pub y: usize,
    /// Palette index the cluster is painted with
    pub color: usize,
    /// Maximum number of pixels the cluster may claim
    pub max_size: usize,
    /// Preferred indices into [`DIRECTIONS`], 2 to 4 distinct entries
    pub directions: Vec<usize>,
    /// Base acceptance probability for growth steps, in `[0.5, 1.0)`
    pub intensity: f64,
}

/// Render granularity derived from a cluster's size budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    /// Whole-cell stamps
    Large,
    /// Mostly whole cells, sometimes half-height
    Medium,
    /// Half and quarter cells
    Small,
    /// Single pixels
    Detail,
}

impl BlockType {
    /// Classify by the ratio of `max_size` to the base block size
    pub fn from_size(max_size: usize, base: usize) -> Self {
        let ratio = max_size as f64 / base.max(1) as f64;
        if ratio > 20.0 {
            Self::Large
        } else if ratio > 8.0 {
            Self::Medium
        } else if ratio > 3.0 {
            Self::Small
        } else {
            Self::Detail
        }
    }
}

/// Connected set of pixels sharing one palette index
#[derive(Debug, Clone, PartialEq)]
pub struct OrganicCluster {
    /// Claimed pixel positions as `(x, y)`
    pub pixels: Vec<(usize, usize)>,
    /// Palette index
    pub color: usize,
    /// Render granularity
    pub block_type: BlockType,
    /// Size budget inherited from the seed
    pub max_size: usize,
}

/// Occupancy buckets for the minimum-distance test
struct SeedBuckets {
    cell: f64,
    min_distance: f64,
    buckets: HashMap<(i64, i64), Vec<(f64, f64)>>,
}

impl SeedBuckets {
    fn new(min_distance: f64) -> Self {
        Self {
            cell: (min_distance / SQRT_2).max(f64::EPSILON),
            min_distance,
            buckets: HashMap::new(),
        }
    }

    fn key(&self, x: f64, y: f64) -> (i64, i64) {
        ((x / self.cell) as i64, (y / self.cell) as i64)
    }

    fn insert(&mut self, x: usize, y: usize) {
        let point = (x as f64, y as f64);
        let key = self.key(point.0, point.1);
        self.buckets.entry(key).or_default().push(point);
    }

    // A bucket is min_distance/√2 wide, so two buckets either way covers the radius
    fn is_clear(&self, x: usize, y: usize) -> bool {
        let (px, py) = (x as f64, y as f64);
        let (bx, by) = self.key(px, py);
        let limit = self.min_distance * self.min_distance;

        for dy in -2..=2 {
            for dx in -2..=2 {
                let Some(points) = self.buckets.get(&(bx + dx, by + dy)) else {
                    continue;
                };
                if points
                    .iter()
                    .any(|&(qx, qy)| (qx - px).powi(2) + (qy - py).powi(2) < limit)
                {
                    return false;
                }
            }
        }
        true
    }
}

fn random_directions<R: Rng + ?Sized>(rng: &mut R) -> Vec<usize> {
    let wanted = rng.random_range(2..=4);
    let mut directions = Vec::with_capacity(wanted);
    while directions.len() < wanted {
        let direction = rng.random_range(0..DIRECTIONS.len());
        if !directions.contains(&direction) {
            directions.push(direction);
        }
    }
    directions
}

fn make_seed<R: Rng + ?Sized>(
    x: usize,
    y: usize,
    colors: usize,
    max_size: usize,
    rng: &mut R,
) -> ClusterSeed {
    ClusterSeed {
        x,
        y,
        color: rng.random_range(0..colors.max(1)),
        max_size,
        directions: random_directions(rng),
        intensity: 0.5 + rng.random::<f64>() * 0.5,
    }
}

/// Spread cluster seeds over a `width`×`height` area
///
/// A pool of uniformly random initial seeds (count grows with area) is placed
/// without spacing checks. The sampler then repeatedly picks an active point
/// and tries to place a new seed at a random angle and a distance in
/// `[min, 2·min)`, where `min` is half the base block size. A candidate is
/// accepted only when no existing seed lies closer than `min`; an active point
/// that fails 30 times in a row is retired.
pub fn place_seeds<R: Rng + ?Sized>(
    width: usize,
    height: usize,
    base: usize,
    colors: usize,
    rng: &mut R,
) -> Vec<ClusterSeed> {
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let base = base.max(1);
    let area = width * height;
    let block_area = base * base;
    let min_distance = base as f64 * 0.5;
    let initial_count = 20 + area / (block_area * 100);
    let max_attempts = area / (block_area * 4);

    let mut buckets = SeedBuckets::new(min_distance);
    let mut seeds = Vec::with_capacity(initial_count);
    let mut active = Vec::with_capacity(initial_count);

    for _ in 0..initial_count {
        let x = rng.random_range(0..width);
        let y = rng.random_range(0..height);
        let max_size = base * rng.random_range(10..30);
        seeds.push(make_seed(x, y, colors, max_size, rng));
        active.push((x, y));
        buckets.insert(x, y);
    }

    let mut attempts = 0;
    while !active.is_empty() && attempts < max_attempts {
        attempts += 1;
        let slot = rng.random_range(0..active.len());
        let Some(&(ax, ay)) = active.get(slot) else {
            break;
        };

        let mut placed = false;
        for _ in 0..POISSON_RETRY_LIMIT {
            let angle = rng.random::<f64>() * 2.0 * PI;
            let distance = min_distance + rng.random::<f64>() * min_distance;
            let nx = (ax as f64 + distance * angle.cos()) as isize;
            let ny = (ay as f64 + distance * angle.sin()) as isize;
            if nx < 0 || ny < 0 || nx as usize >= width || ny as usize >= height {
                continue;
            }

            let (nx, ny) = (nx as usize, ny as usize);
            if buckets.is_clear(nx, ny) {
                let max_size = base * rng.random_range(8..26);
                seeds.push(make_seed(nx, ny, colors, max_size, rng));
                active.push((nx, ny));
                buckets.insert(nx, ny);
                placed = true;
                break;
            }
        }

        if !placed {
            active.swap_remove(slot);
        }
    }

    tracing::debug!(seeds = seeds.len(), attempts, "placed cluster seeds");
    seeds
}

/// Fraction of claimed pixels within a disc of `radius` around `(x, y)`
fn local_density(
    claimed: &BitSlice,
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    radius: usize,
) -> f64 {
    let radius = radius as isize;
    let mut nearby = 0;
    let mut total = 0;

    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            total += 1;
            let cx = x as isize + dx;
            let cy = y as isize + dy;
            if cx < 0 || cy < 0 || cx as usize >= width || cy as usize >= height {
                continue;
            }
            if claimed.get(cy as usize * width + cx as usize).as_deref() == Some(&true) {
                nearby += 1;
            }
        }
    }

    if total == 0 {
        0.0
    } else {
        f64::from(nearby) / f64::from(total)
    }
}

/// Grow one cluster per seed over a shared occupancy mask
///
/// Clusters never claim a pixel another cluster already owns. Every cluster
/// holds at most its seed's `max_size` pixels.
pub fn grow_clusters<R: Rng + ?Sized>(
    width: usize,
    height: usize,
    seeds: &[ClusterSeed],
    base: usize,
    rng: &mut R,
) -> Vec<OrganicCluster> {
    let mut claimed = bitvec![0; width * height];
    let mut clusters = Vec::with_capacity(seeds.len());

    for seed in seeds {
        let block_type = BlockType::from_size(seed.max_size, base);
        let mut pixels = Vec::new();

        // A seed landing on claimed ground yields an empty cluster
        if seed.x < width && seed.y < height && seed.max_size > 0 {
            let seed_slot = seed.y * width + seed.x;
            if claimed.get(seed_slot).as_deref() == Some(&false) {
                pixels.push((seed.x, seed.y));
                claimed.set(seed_slot, true);
            }
        }

        let mut frontier = pixels.clone();
        while !frontier.is_empty() && pixels.len() < seed.max_size {
            let mut next_frontier = Vec::new();

            for &(fx, fy) in &frontier {
                let steps = rng.random_range(2..=5);
                for _ in 0..steps {
                    if pixels.len() >= seed.max_size {
                        break;
                    }

                    let preferred = !seed.directions.is_empty()
                        && rng.random::<f64>() < GROWTH_DIRECTION_BIAS;
                    let direction = if preferred {
                        seed.directions
                            .get(rng.random_range(0..seed.directions.len()))
                            .copied()
                            .unwrap_or(0)
                    } else {
                        rng.random_range(0..DIRECTIONS.len())
                    };
                    let Some(&(dx, dy)) = DIRECTIONS.get(direction) else {
                        continue;
                    };

                    let nx = fx as isize + dx;
                    let ny = fy as isize + dy;
                    if nx < 0 || ny < 0 || nx as usize >= width || ny as usize >= height {
                        continue;
                    }
                    let (nx, ny) = (nx as usize, ny as usize);
                    let slot = ny * width + nx;
                    if claimed.get(slot).as_deref() == Some(&true) {
                        continue;
                    }

                    let density = local_density(&claimed, width, height, nx, ny, base);
                    let acceptance = seed.intensity * (1.0 - density * GROWTH_DENSITY_DAMPING);
                    if rng.random::<f64>() < acceptance {
                        claimed.set(slot, true);
                        pixels.push((nx, ny));
                        next_frontier.push((nx, ny));
                    }
                }
            }

            frontier = next_frontier;
            if frontier.len() > 1 && rng.random::<f64>() < GROWTH_PRUNE_CHANCE {
                frontier.truncate(frontier.len() / 2);
            }
        }

        clusters.push(OrganicCluster {
            pixels,
            color: seed.color,
            block_type,
            max_size: seed.max_size,
        });
    }

    clusters
}

fn stamp_size<R: Rng + ?Sized>(block_type: BlockType, base: usize, rng: &mut R) -> (usize, usize) {
    let half = (base / 2).max(1);
    match block_type {
        BlockType::Large => (base, base),
        BlockType::Medium if rng.random::<f64>() < 0.6 => (base, base),
        BlockType::Medium => (base, half),
        BlockType::Small => match rng.random_range(0..3) {
            0 => (half, half),
            1 => (base, half),
            _ => (half, base),
        },
        BlockType::Detail => (1, 1),
    }
}

/// Paint clusters onto `image` as block-aligned rectangular stamps
///
/// Each cluster picks one stamp size from its block type; every pixel is
/// snapped down to that stamp grid and the whole stamp is filled. Stamps
/// crossing the image edge are clipped.
pub fn render_clusters<R: Rng + ?Sized>(
    image: &mut RgbaImage,
    clusters: &[OrganicCluster],
    palette: &[Rgb<u8>],
    base: usize,
    rng: &mut R,
) {
    let base = base.max(1);
    for cluster in clusters {
        let Some(&color) = palette.get(cluster.color) else {
            continue;
        };
        let pixel = opaque(color);
        let (stamp_width, stamp_height) = stamp_size(cluster.block_type, base, rng);

        for &(x, y) in &cluster.pixels {
            let left = (x / stamp_width) * stamp_width;
            let top = (y / stamp_height) * stamp_height;
            for py in top..top + stamp_height {
                for px in left..left + stamp_width {
                    if let Some(target) = image.get_pixel_mut_checked(px as u32, py as u32) {
                        *target = pixel;
                    }
                }
            }
        }
    }
}
