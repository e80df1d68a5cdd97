/// Round and saturate a float into the `u8` channel range.
pub(crate) fn round_to_u8(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

/// `round(base * (1 - t) + over * t)` for one 8-bit channel.
pub(crate) fn mix_channel(base: u8, over: u8, t: f64) -> u8 {
    round_to_u8(f64::from(base) * (1.0 - t) + f64::from(over) * t)
}

/// Euclidean distance between two points given as coordinate deltas.
pub(crate) fn hypot(dx: f64, dy: f64) -> f64 {
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
