//! Block-size reconciliation so grids tile the output exactly

use crate::io::configuration::DEFAULT_BLOCK_SIZE;

/// Greatest common divisor by Euclid's algorithm
pub const fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        let remainder = a % b;
        a = b;
        b = remainder;
    }
    a
}

/// All divisors of `value` in ascending order
pub fn divisors(value: usize) -> Vec<usize> {
    if value == 0 {
        return vec![1];
    }

    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut candidate = 1;
    while candidate * candidate <= value {
        if value % candidate == 0 {
            small.push(candidate);
            if candidate != value / candidate {
                large.push(value / candidate);
            }
        }
        candidate += 1;
    }

    small.extend(large.into_iter().rev());
    small
}

/// Choose the block size closest to `requested` that divides both dimensions
///
/// A requested size of zero is replaced by the default block size, and a zero
/// dimension leaves the request untouched since nothing can be tiled. When the
/// request already tiles the image it is kept; otherwise every divisor of
/// `gcd(width, height)` is a candidate and the one with the smallest absolute
/// difference wins, ties going to the larger divisor. The result is at least 1.
pub fn reconcile_block_size(requested: usize, width: usize, height: usize) -> usize {
    let requested = if requested == 0 {
        DEFAULT_BLOCK_SIZE
    } else {
        requested
    };

    if width == 0 || height == 0 {
        return requested;
    }

    if width % requested == 0 && height % requested == 0 {
        return requested;
    }

    divisors(gcd(width, height))
        .into_iter()
        .min_by(|&a, &b| {
            a.abs_diff(requested)
                .cmp(&b.abs_diff(requested))
                .then_with(|| b.cmp(&a))
        })
        .unwrap_or(1)
}
