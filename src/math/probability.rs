//! Weighted palette selection and color ratio profiles

use crate::io::error::{CamoError, Result, invalid_parameter};
use rand::Rng;
use std::str::FromStr;

/// Pick a palette index according to a ratio vector
///
/// An empty or single-entry ratio vector always yields index 0, which recipes
/// use for flat background fills. Otherwise a uniform draw in `[0, 1)` is
/// matched against the cumulative ratio sum and the first index whose running
/// total reaches the draw is returned. Ratio vectors that are longer than the
/// palette, or that sum to less than one, are clamped to the last palette index.
pub fn select_weighted<R: Rng + ?Sized>(ratios: &[f64], palette_len: usize, rng: &mut R) -> usize {
    if ratios.len() <= 1 || palette_len == 0 {
        return 0;
    }
    cumulative_index(rng.random::<f64>(), ratios, palette_len)
}

/// Map a value in `[0, 1]` to the first index whose cumulative ratio reaches it
///
/// Values beyond the ratio total land on the last index; the result is
/// clamped below `palette_len`.
pub fn cumulative_index(value: f64, ratios: &[f64], palette_len: usize) -> usize {
    let mut cumulative = 0.0;
    let mut selected = ratios.len().saturating_sub(1);
    for (index, &ratio) in ratios.iter().enumerate() {
        cumulative += ratio;
        if cumulative >= value {
            selected = index;
            break;
        }
    }
    selected.min(palette_len.saturating_sub(1))
}

/// Pick a palette index while never returning any of `excluded`
///
/// The remaining ratios are renormalised to sum to one before delegating to
/// [`select_weighted`]. Returns 0 when every index is excluded.
pub fn select_weighted_excluding<R: Rng + ?Sized>(
    ratios: &[f64],
    excluded: &[usize],
    palette_len: usize,
    rng: &mut R,
) -> usize {
    let candidates: Vec<(usize, f64)> = ratios
        .iter()
        .copied()
        .enumerate()
        .take(palette_len)
        .filter(|(index, _)| !excluded.contains(index))
        .collect();

    let total: f64 = candidates.iter().map(|&(_, ratio)| ratio).sum();
    if candidates.is_empty() || total <= 0.0 {
        return 0;
    }

    let renormalised: Vec<f64> = candidates.iter().map(|&(_, ratio)| ratio / total).collect();
    // A lone survivor would hit the background rule in select_weighted
    let position = if renormalised.len() == 1 {
        0
    } else {
        select_weighted(&renormalised, renormalised.len(), rng)
    };

    candidates.get(position).map_or(0, |&(index, _)| index)
}

/// Equal weights for every palette entry
pub fn equal_ratios(palette_len: usize) -> Vec<f64> {
    if palette_len == 0 {
        return Vec::new();
    }
    vec![1.0 / palette_len as f64; palette_len]
}

/// Color proportions modelled on fielded digital woodland patterns
///
/// Four colors split base/secondary/accent/highlight, three colors use an
/// adapted split, anything else falls back to equal weights.
pub fn marpat_ratios(palette_len: usize) -> Vec<f64> {
    match palette_len {
        4 => vec![0.45, 0.30, 0.15, 0.10],
        3 => vec![0.50, 0.35, 0.15],
        _ => equal_ratios(palette_len),
    }
}

/// User-facing description of how palette colors are weighted
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RatioSpec {
    /// Every color equally likely
    #[default]
    Equal,
    /// Random integer weights in 1..=5, normalised
    Random,
    /// Integer weights cycled to the palette length, normalised
    Cycle(Vec<u32>),
}

impl RatioSpec {
    /// Expand into a normalised ratio vector of exactly `palette_len` entries
    pub fn resolve<R: Rng + ?Sized>(&self, palette_len: usize, rng: &mut R) -> Vec<f64> {
        let raw: Vec<f64> = match self {
            Self::Equal => return equal_ratios(palette_len),
            Self::Random => (0..palette_len)
                .map(|_| f64::from(rng.random_range(1..=5_u32)))
                .collect(),
            Self::Cycle(weights) if weights.is_empty() => return equal_ratios(palette_len),
            Self::Cycle(weights) => weights
                .iter()
                .cycle()
                .take(palette_len)
                .map(|&weight| f64::from(weight))
                .collect(),
        };

        let sum: f64 = raw.iter().sum();
        if sum <= 0.0 {
            return equal_ratios(palette_len);
        }
        raw.into_iter().map(|weight| weight / sum).collect()
    }
}

impl FromStr for RatioSpec {
    type Err = CamoError;

    fn from_str(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        match trimmed {
            "" | "equal" => return Ok(Self::Equal),
            "random" => return Ok(Self::Random),
            _ => {}
        }

        let compact = trimmed.replace(' ', "");
        let mut weights = Vec::new();
        for (position, part) in compact.split(',').enumerate() {
            if part.is_empty() {
                return Err(invalid_parameter(
                    "ratios",
                    &text,
                    &format!("empty ratio value at position {}", position + 1),
                ));
            }
            let weight: i64 = part.parse().map_err(|error| {
                invalid_parameter(
                    "ratios",
                    &text,
                    &format!(
                        "invalid ratio value '{part}' at position {}: {error}",
                        position + 1
                    ),
                )
            })?;
            if weight <= 0 {
                return Err(invalid_parameter(
                    "ratios",
                    &text,
                    &format!(
                        "ratio value must be a positive integer, got {weight} at position {}",
                        position + 1
                    ),
                ));
            }
            let weight = u32::try_from(weight)
                .map_err(|error| invalid_parameter("ratios", &text, &error))?;
            weights.push(weight);
        }

        Ok(Self::Cycle(weights))
    }
}
