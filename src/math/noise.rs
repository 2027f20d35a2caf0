//! Coordinate-hash noise sources for texture and boundary perturbation
//!
//! All functions are pure: the same coordinates always produce the same value,
//! so noise never consumes the job's random stream.

use num_traits::Float;

/// Number of octaves summed by [`fractal_noise`]
pub const FRACTAL_OCTAVES: usize = 4;

/// Base sampling frequency of the first octave in [`fractal_noise`]
pub const FRACTAL_BASE_FREQUENCY: f64 = 0.02;

/// Linear interpolation between `a` and `b`
pub fn lerp<T: Float>(a: T, b: T, t: T) -> T {
    a + t * (b - a)
}

/// Cubic Hermite fade `t²(3 − 2t)` for smooth cell interpolation
pub fn smoothstep<T: Float>(t: T) -> T {
    let two = T::one() + T::one();
    let three = two + T::one();
    t * t * (three - two * t)
}

// Integer lattice hash in [0, 2)
fn lattice_hash(x: i64, y: i64) -> f64 {
    let mut n = x.wrapping_add(y.wrapping_mul(57));
    n = n.wrapping_shl(13) ^ n;
    let mixed = n
        .wrapping_mul(
            n.wrapping_mul(n)
                .wrapping_mul(15_731)
                .wrapping_add(789_221),
        )
        .wrapping_add(1_376_312_589)
        & 0x7fff_ffff;
    mixed as f64 / 1_073_741_824.0
}

/// Sharp per-cell noise in `[-1, 1)`
///
/// Coordinates are truncated to integers and wrapped to a 256-cell period,
/// giving the hard "digital" transitions used for micro-texture.
pub fn hash_noise(x: f64, y: f64) -> f64 {
    let xi = (x as i64) & 255;
    let yi = (y as i64) & 255;
    lattice_hash(xi, yi) - 1.0
}

/// Smooth lattice noise in `(-1, 1]`
///
/// Corner values come from the lattice hash and are blended with a
/// smoothstep fade in both axes.
pub fn perlin_noise(x: f64, y: f64) -> f64 {
    let xi = (x as i64) & 255;
    let yi = (y as i64) & 255;
    let xf = x - x.trunc();
    let yf = y - y.trunc();

    let u = smoothstep(xf);
    let v = smoothstep(yf);

    let corner = |cx: i64, cy: i64| 1.0 - lattice_hash(cx, cy);
    let top = lerp(corner(xi, yi), corner(xi + 1, yi), u);
    let bottom = lerp(corner(xi, yi + 1), corner(xi + 1, yi + 1), u);
    lerp(top, bottom, v)
}

/// Octave sum of [`perlin_noise`] normalised to `[0, 1]`
///
/// Each octave halves the amplitude and doubles the frequency.
pub fn fractal_noise(x: f64, y: f64) -> f64 {
    let mut total = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = FRACTAL_BASE_FREQUENCY;
    let mut max_value = 0.0;

    for _ in 0..FRACTAL_OCTAVES {
        total += perlin_noise(x * frequency, y * frequency) * amplitude;
        max_value += amplitude;
        amplitude *= 0.5;
        frequency *= 2.0;
    }

    ((total / max_value + 1.0) / 2.0).clamp(0.0, 1.0)
}

/// Sine-hash jitter in `[-0.5, 0.5)` used to roughen shape outlines
pub fn sine_noise(x: f64, y: f64) -> f64 {
    let n = x.mul_add(12.9898, y * 78.233).sin() * 43_758.545_3;
    n - n.floor() - 0.5
}
