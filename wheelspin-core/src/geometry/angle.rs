//! Angle/index mapping
//!
//! The pointer is fixed; the wheel rotates underneath it. Segment `i`
//! occupies the arc `[i * span, (i + 1) * span)` measured from the pointer
//! when the rotation is zero, and a positive rotation moves lower indices
//! past the pointer first.

/// One full turn in radians
pub const TAU: f64 = core::f64::consts::TAU;

/// Angular width of one segment for a wheel with `n` segments
///
/// `n` is treated as at least 1.
pub fn segment_span(n: usize) -> f64 {
    TAU / n.max(1) as f64
}

/// Normalize a rotation into `[0, 2π)`
///
/// Non-finite input maps to `0.0`.
pub fn normalize(rotation: f64) -> f64 {
    if !rotation.is_finite() {
        return 0.0;
    }
    // `%` is exact; only negative remainders need shifting
    let r = rotation % TAU;
    let r = if r < 0.0 { r + TAU } else { r };
    // -tiny + TAU can round up to exactly TAU
    if r >= TAU {
        0.0
    } else {
        r
    }
}

/// Index of the segment under the pointer for a given rotation
///
/// Always in `[0, n)` and invariant under whole turns of `rotation`.
pub fn landed_index(rotation: f64, n: usize) -> usize {
    let n = n.max(1) as i64;
    let span = TAU / n as f64;
    let normalized = normalize(rotation);
    let idx = floor(-normalized / span) as i64;
    idx.rem_euclid(n) as usize
}

/// Rotation that lands on the centre of segment `index`
///
/// The candidate is the centre of `index` plus `extra_turns` whole turns;
/// when that is not past `current`, the next centre of `index` beyond
/// `current` is used instead. The result is always strictly above `current`
/// and at most one turn past `max(current, centre + extra_turns * 2π)`.
/// Aiming at the centre keeps the pointer off segment boundaries. `index`
/// is taken modulo `n`.
///
/// Rotations so large that one turn is below float resolution cannot land
/// on a chosen segment; they get a value a few ulps above
/// `current`.
pub fn target_rotation_for(index: usize, extra_turns: u32, current: f64, n: usize) -> f64 {
    let n = n.max(1);
    let span = segment_span(n);
    let index = index % n;
    let current = if current.is_finite() { current } else { 0.0 };

    let base = -((index as f64) + 0.5) * span;
    let candidate = base + (extra_turns as f64) * TAU;
    if candidate > current {
        return candidate;
    }

    // Step from the partial turn so no loop depends on the magnitude
    let partial = normalize(current);
    let whole = current - partial;
    let mut offset = base + TAU;
    if offset <= partial {
        offset += TAU;
    }
    let target = whole + offset;
    if target > current {
        return target;
    }

    let magnitude = if current < 0.0 { -current } else { current };
    current + magnitude * f64::EPSILON
}

/// `floor` without libm
///
/// Only called with magnitudes below `n`, where the `i64` cast is exact.
pub(crate) fn floor(x: f64) -> f64 {
    let truncated = x as i64 as f64;
    if truncated > x {
        truncated - 1.0
    } else {
        truncated
    }
}
