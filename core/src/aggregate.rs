//! Learning, relationship and overall scores.

use crate::{
    model::{Client, LearningEntry, ScoreRecord},
    types::{clamp_score, round1, Score},
};

/// Monthly learning hours that earn a full 10.
pub const LEARNING_HOURS_TARGET: f64 = 20.0;

pub const KPI_WEIGHT: f64 = 0.5;
pub const LEARNING_WEIGHT: f64 = 0.2;
pub const RELATIONSHIP_WEIGHT: f64 = 0.3;

pub fn total_learning_hours(entries: &[LearningEntry]) -> f64 {
    entries
        .iter()
        .map(|e| if e.hours.is_finite() { e.hours } else { 0.0 })
        .sum()
}

pub fn learning_score(entries: &[LearningEntry]) -> Score {
    let hours = total_learning_hours(entries);
    round1(clamp_score(hours / LEARNING_HOURS_TARGET * 10.0))
}

/// Hours implied by a learning score. Used for display only.
pub fn hours_from_learning_score(score: Score) -> f64 {
    round1(score / 10.0 * LEARNING_HOURS_TARGET)
}

/// Mean client satisfaction. An empty list scores 0.
pub fn relationship_score(clients: &[Client]) -> Score {
    let total: f64 = clients
        .iter()
        .map(|c| c.relationship.client_satisfaction)
        .filter(|s| s.is_finite())
        .sum();
    let n = clients.len().max(1) as f64;
    round1(clamp_score(total / n))
}

pub fn overall(kpi: Score, learning: Score, relationship: Score) -> Score {
    round1(clamp_score(
        kpi * KPI_WEIGHT + learning * LEARNING_WEIGHT + relationship * RELATIONSHIP_WEIGHT,
    ))
}

/// Assemble a score record, deriving the overall score.
pub fn score_record(kpi: Score, learning: Score, relationship: Score) -> ScoreRecord {
    ScoreRecord {
        kpi_score:          kpi,
        learning_score:     learning,
        relationship_score: relationship,
        overall_score:      overall(kpi, learning, relationship),
    }
}
