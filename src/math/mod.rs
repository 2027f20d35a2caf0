//! Numeric helpers shared by every recipe

/// Block-size reconciliation against the output dimensions
pub mod divisors;
/// Coordinate-hash noise generators
pub mod noise;
/// Weighted color selection and ratio profiles
pub mod probability;
