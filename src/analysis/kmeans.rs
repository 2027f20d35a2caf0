//! Dominant color extraction by k-means over RGB space

use crate::io::error::{Result, invalid_parameter};
use image::{Rgb, RgbaImage};
use rand::Rng;
use rand::seq::IndexedRandom;
use std::collections::HashSet;

/// A point or centroid in RGB space
pub type Point = [f64; 3];

/// Squared Euclidean distance between two RGB points
pub fn squared_distance(a: &Point, b: &Point) -> f64 {
    a.iter().zip(b).map(|(p, q)| (p - q) * (p - q)).sum()
}

/// Index of the centroid closest to `point`, lowest index on ties
pub fn nearest(point: &Point, centroids: &[Point]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (index, centroid) in centroids.iter().enumerate() {
        let distance = squared_distance(point, centroid);
        if distance < best_distance {
            best = index;
            best_distance = distance;
        }
    }
    best
}

// Distinct colors first, then repeats once those run out
fn initial_centroids<R: Rng + ?Sized>(points: &[Point], k: usize, rng: &mut R) -> Vec<Point> {
    let mut seen: HashSet<[u64; 3]> = HashSet::with_capacity(points.len().min(1 << 16));
    let distinct: Vec<Point> = points
        .iter()
        .filter(|point| seen.insert(point.map(f64::to_bits)))
        .copied()
        .collect();

    let mut centroids: Vec<Point> = distinct.choose_multiple(rng, k).copied().collect();
    while centroids.len() < k {
        let Some(point) = points.choose(rng) else {
            break;
        };
        centroids.push(*point);
    }
    centroids
}

/// Cluster `points` into `k` groups with a fixed iteration count
///
/// Every point is assigned to its nearest centroid, then each centroid moves
/// to the mean of its members. A centroid with no members stays where it is.
/// Returns an empty vector when there are no points.
pub fn kmeans<R: Rng + ?Sized>(
    points: &[Point],
    k: usize,
    iterations: usize,
    rng: &mut R,
) -> Vec<Point> {
    if points.is_empty() || k == 0 {
        return Vec::new();
    }

    let mut centroids = initial_centroids(points, k, rng);
    let mut sums = vec![[0.0_f64; 3]; centroids.len()];
    let mut counts = vec![0_usize; centroids.len()];

    for _ in 0..iterations {
        sums.fill([0.0; 3]);
        counts.fill(0);

        for point in points {
            let cluster = nearest(point, &centroids);
            if let (Some(sum), Some(count)) = (sums.get_mut(cluster), counts.get_mut(cluster)) {
                for (total, value) in sum.iter_mut().zip(point) {
                    *total += value;
                }
                *count += 1;
            }
        }

        let mut moved = false;
        for ((centroid, sum), &count) in centroids.iter_mut().zip(&sums).zip(&counts) {
            if count == 0 {
                continue;
            }
            let mean = sum.map(|total| total / count as f64);
            if squared_distance(&mean, centroid) > 0.0 {
                *centroid = mean;
                moved = true;
            }
        }
        if !moved {
            break;
        }
    }

    centroids
}

/// Convert an image into RGB points, ignoring alpha
pub fn image_points(image: &RgbaImage) -> Vec<Point> {
    image
        .pixels()
        .map(|pixel| {
            let [r, g, b, _] = pixel.0;
            [f64::from(r), f64::from(g), f64::from(b)]
        })
        .collect()
}

/// Truncate a centroid to an 8-bit color
pub fn to_color(centroid: &Point) -> Rgb<u8> {
    Rgb(centroid.map(|channel| channel.clamp(0.0, 255.0) as u8))
}

/// Extract `k` dominant colors from every pixel of `image`
///
/// # Errors
///
/// Returns an invalid parameter error when `k` is zero or the image is empty.
pub fn kmeans_palette<R: Rng + ?Sized>(
    image: &RgbaImage,
    k: usize,
    iterations: usize,
    rng: &mut R,
) -> Result<Vec<Rgb<u8>>> {
    if k < 1 {
        return Err(invalid_parameter("k", &k, &"must be at least 1"));
    }
    let points = image_points(image);
    if points.is_empty() {
        return Err(invalid_parameter(
            "image",
            &format!("{}x{}", image.width(), image.height()),
            &"has no pixels",
        ));
    }

    let centroids = kmeans(&points, k, iterations, rng);
    tracing::debug!(k, iterations, clusters = centroids.len(), "k-means converged");
    Ok(centroids.iter().map(to_color).collect())
}
