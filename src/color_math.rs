//! Scalar helpers shared by the simulation and the field renderer.
//!
//! Everything here is total: degenerate inputs produce non-finite results
//! rather than panics, and callers are responsible for the documented domains.

/// Linear interpolation between `a` and `b`.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Map `value` from `[src_lo, src_hi]` onto `[dst_lo, dst_hi]`.
///
/// The source range must be non-empty; `src_lo == src_hi` yields a non-finite value.
#[inline]
pub fn remap(value: f64, src_lo: f64, src_hi: f64, dst_lo: f64, dst_hi: f64) -> f64 {
    lerp(dst_lo, dst_hi, (value - src_lo) / (src_hi - src_lo))
}

/// Clamp `value` into `[lo, hi]`.
///
/// Unlike [`f64::clamp`] this never panics, and a value equal to `hi` takes
/// the `hi` branch. NaN passes through unchanged.
#[inline]
pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    if value < lo {
        lo
    } else if value >= hi {
        hi
    } else {
        value
    }
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(x0: f64, y0: f64, x1: f64, y1: f64) -> f64 {
    let dx = x1 - x0;
    let dy = y1 - y0;
    (dx * dx + dy * dy).sqrt()
}

/// Convert hue/saturation/value (all nominally in `[0, 1]`) to a packed `0xRRGGBB` colour.
///
/// The hue wraps through `floor(h * 6) mod 6`. Each channel is rounded on its
/// own, so results can sit one step away from a jointly rounded conversion.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> u32 {
    let scaled = h * 6.0;
    let sector_floor = scaled.floor();
    let f = scaled - sector_floor;

    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let (r, g, b) = match (sector_floor as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    (channel(r) << 16) | (channel(g) << 8) | channel(b)
}

/// Scale a unit channel to a byte, rounding half away from zero.
#[inline]
fn channel(value: f64) -> u32 {
    (value * 255.0).round().clamp(0.0, 255.0) as u32
}
