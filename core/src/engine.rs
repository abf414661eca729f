//! The scoring engine — one monthly evaluation per call.
//!
//! EXECUTION ORDER (fixed):
//!   1. Resolve the employee's department (the only hard failure)
//!   2. Scope completion → department KPI
//!   3. Learning score
//!   4. Relationship score
//!   5. Overall score
//!   6. Discipline penalty, only when a submission timestamp is supplied
//!   7. Text summary
//!
//! RULES:
//!   - The engine holds configuration only; `evaluate` takes `&self`.
//!   - No step reads the wall clock. Step 6 runs only with an explicit
//!     timestamp, so identical submissions give identical evaluations.

use crate::{
    aggregate,
    config::ScoringConfig,
    discipline,
    error::ScoreResult,
    kpi,
    model::{Client, DisciplineResult, ScoreRecord, Submission},
    scope,
    summary,
    types::{round1, Percent, Score},
    weights::ServiceWeights,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub scores:           ScoreRecord,
    pub discipline:       Option<DisciplineResult>,
    /// Overall score less the discipline penalty, floored at 0.
    pub adjusted_overall: Option<Score>,
    pub summary:          String,
}

#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn weights(&self) -> &ServiceWeights {
        &self.config.service_weights
    }

    // ── Component entry points ──────────────────────────────────────────

    pub fn completion(
        &self,
        client: &Client,
        service: &str,
        month_key: Option<&str>,
    ) -> Option<Percent> {
        scope::completion(client, service, month_key)
    }

    pub fn client_scope_score(&self, client: &Client, month_key: Option<&str>) -> Score {
        scope::client_scope_score(client, self.weights(), month_key)
    }

    pub fn score(&self, submission: &Submission) -> ScoreResult<ScoreRecord> {
        let month_key = submission.context.month_key.as_deref();
        let kpi = kpi::kpi_score(&submission.employee, &submission.clients, self.weights(), month_key)?;
        let learning = aggregate::learning_score(&submission.learning);
        let relationship = aggregate::relationship_score(&submission.clients);
        Ok(aggregate::score_record(kpi, learning, relationship))
    }

    pub fn discipline(&self, submission: &Submission) -> Option<DisciplineResult> {
        let ctx = &submission.context;
        let submitted_at = ctx.submitted_at.as_deref()?;
        Some(discipline::penalty(
            ctx.month_key.as_deref(),
            Some(submitted_at),
            Some(ctx.grace_days.unwrap_or(self.config.default_grace_days)),
        ))
    }

    // ── Full evaluation ─────────────────────────────────────────────────

    pub fn evaluate(&self, submission: &Submission) -> ScoreResult<Evaluation> {
        let scores = self.score(submission)?;
        let discipline = self.discipline(submission);
        let adjusted_overall = discipline
            .as_ref()
            .map(|d| round1((scores.overall_score - d.penalty).max(0.0)));
        let summary = summary::summarize(&submission.employee, &submission.clients, &scores)?;

        log::debug!(
            "evaluate: employee='{}' month={:?} kpi={} learning={} relationship={} overall={} penalty={:?}",
            submission.employee.name,
            submission.context.month_key,
            scores.kpi_score,
            scores.learning_score,
            scores.relationship_score,
            scores.overall_score,
            discipline.as_ref().map(|d| d.penalty),
        );

        Ok(Evaluation {
            scores,
            discipline,
            adjusted_overall,
            summary,
        })
    }

    /// Evaluate a batch. One failing submission does not stop the rest.
    pub fn evaluate_all(&self, submissions: &[Submission]) -> Vec<ScoreResult<Evaluation>> {
        submissions.iter().map(|s| self.evaluate(s)).collect()
    }
}
