use std::f64::consts::PI;

/// Tilt of the pointer, in degrees, at the far end of its swing.
pub const INDICATOR_MAX_TILT: f64 = 35.0;

/// Pointer oscillation for a wheel rotation, in `[-1, 1]`.
///
/// At rest the pointer sits at its baseline of 1. While spinning it follows one sine period
/// per revolution of the wheel.
pub fn derive_wobble(rotation: f64, is_spinning: bool) -> f64 {
    if !is_spinning || !rotation.is_finite() {
        return 1.0;
    }
    (rotation * PI / 180.0).sin()
}

/// Maps a wobble factor from `[1, -1]` onto a tilt of `[0, INDICATOR_MAX_TILT]` degrees.
pub fn indicator_tilt(wobble: f64) -> f64 {
    let wobble = wobble.clamp(-1.0, 1.0);
    (1.0 - wobble) / 2.0 * INDICATOR_MAX_TILT
}
