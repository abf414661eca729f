//! Shared primitive types used across the scoring engine.

/// A score on the 0–10 scale.
pub type Score = f64;

/// A completion percentage on the 0–100 scale.
pub type Percent = f64;

/// A service name as it appears in client records ("SEO", "Meta Ads", ...).
pub type ServiceName = String;

/// Upper bound of every `*Score`.
pub const SCORE_MAX: Score = 10.0;

/// Upper bound of every completion figure.
pub const PERCENT_MAX: Percent = 100.0;

/// Round half-up to the nearest integer.
///
/// Scores are compared bit-for-bit across runs, so the tie rule is fixed
/// here rather than left to `f64::round` (which rounds ties away from zero).
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Round to one decimal place, half-up.
pub fn round1(x: f64) -> f64 {
    round_half_up(x * 10.0) / 10.0
}

/// Clamp into `[0, SCORE_MAX]`. NaN collapses to 0.
pub fn clamp_score(x: f64) -> Score {
    if x.is_nan() {
        return 0.0;
    }
    x.clamp(0.0, SCORE_MAX)
}

/// Clamp into `[0, PERCENT_MAX]`. NaN collapses to 0.
pub fn clamp_percent(x: f64) -> Percent {
    if x.is_nan() {
        return 0.0;
    }
    x.clamp(0.0, PERCENT_MAX)
}
