//! Leaderboard ranking over previously computed monthly scores.
//!
//! ranking = metric mean + 0.5 × consistency + 0.3 × improvement
//!
//!   consistency = min(1, submissions / 6)
//!   improvement = max(0, (latest overall − first overall) / 10), needs 2+
//!
//! Zero-or-less rankings are dropped. Period filters are evaluated against
//! an explicit reference month so the same input always ranks the same.

use crate::{calendar::MonthKey, model::ScoreRecord, types::Score};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

const CONSISTENCY_FULL_AT: f64 = 6.0;
const CONSISTENCY_WEIGHT: f64 = 0.5;
const IMPROVEMENT_WEIGHT: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMetric {
    #[default]
    Overall,
    Kpi,
    Learning,
    Relationship,
}

impl RankingMetric {
    fn pick(&self, s: &ScoreRecord) -> Score {
        match self {
            RankingMetric::Overall      => s.overall_score,
            RankingMetric::Kpi          => s.kpi_score,
            RankingMetric::Learning     => s.learning_score,
            RankingMetric::Relationship => s.relationship_score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    #[default]
    All,
    Monthly,
    Quarterly,
    Yearly,
}

impl Period {
    fn months_back(&self) -> Option<u32> {
        match self {
            Period::All       => None,
            Period::Monthly   => Some(1),
            Period::Quarterly => Some(3),
            Period::Yearly    => Some(12),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    Gold,
    Silver,
    Bronze,
    Rising,
    Participant,
}

impl Badge {
    pub fn award(ranking_score: Score, submissions: usize) -> Self {
        if ranking_score >= 9.0 && submissions >= 6 {
            Badge::Gold
        } else if ranking_score >= 8.0 && submissions >= 4 {
            Badge::Silver
        } else if ranking_score >= 7.0 && submissions >= 2 {
            Badge::Bronze
        } else if ranking_score >= 6.0 {
            Badge::Rising
        } else {
            Badge::Participant
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Badge::Gold        => "Gold Champion",
            Badge::Silver      => "Silver Star",
            Badge::Bronze      => "Bronze Achiever",
            Badge::Rising      => "Rising Star",
            Badge::Participant => "Active",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyScore {
    pub month_key: String,
    pub scores:    ScoreRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeHistory {
    pub name:        String,
    pub department:  String,
    pub submissions: Vec<MonthlyScore>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardQuery {
    pub metric:     RankingMetric,
    pub period:     Period,
    /// `None` ranks every department.
    pub department: Option<String>,
    /// Month the period filter counts back from. Required for any period
    /// other than `All`; without it the period filter is skipped.
    pub reference_month: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEmployee {
    pub rank:              usize,
    pub name:              String,
    pub department:        String,
    pub ranking_score:     Score,
    pub submission_count:  usize,
    pub consistency_bonus: f64,
    pub improvement_bonus: f64,
    pub badge:             Badge,
}

fn in_period(history: &EmployeeHistory, cutoff: Option<MonthKey>) -> bool {
    let Some(cutoff) = cutoff else {
        return true;
    };
    history
        .submissions
        .iter()
        .filter_map(|s| MonthKey::parse(&s.month_key))
        .any(|mk| mk >= cutoff)
}

fn improvement(submissions: &[MonthlyScore]) -> f64 {
    if submissions.len() < 2 {
        return 0.0;
    }
    let mut ordered: Vec<&MonthlyScore> = submissions.iter().collect();
    ordered.sort_by(|a, b| a.month_key.cmp(&b.month_key));
    let first = ordered.first().map(|s| s.scores.overall_score).unwrap_or(0.0);
    let latest = ordered.last().map(|s| s.scores.overall_score).unwrap_or(0.0);
    ((latest - first) / 10.0).max(0.0)
}

fn rank_one(history: &EmployeeHistory, metric: RankingMetric) -> Option<RankedEmployee> {
    let n = history.submissions.len();
    if n == 0 {
        return None;
    }
    let metric_mean = history
        .submissions
        .iter()
        .map(|s| metric.pick(&s.scores))
        .sum::<f64>()
        / n as f64;
    let consistency_bonus = (n as f64 / CONSISTENCY_FULL_AT).min(1.0);
    let improvement_bonus = improvement(&history.submissions);
    let ranking_score =
        metric_mean + consistency_bonus * CONSISTENCY_WEIGHT + improvement_bonus * IMPROVEMENT_WEIGHT;

    if ranking_score.is_nan() || ranking_score <= 0.0 {
        return None;
    }

    Some(RankedEmployee {
        rank: 0,
        name: history.name.clone(),
        department: history.department.clone(),
        ranking_score,
        submission_count: n,
        consistency_bonus,
        improvement_bonus,
        badge: Badge::award(ranking_score, n),
    })
}

/// Rank employees for the query. Ranks start at 1; ties in ranking score
/// are ordered by name.
pub fn rank(histories: &[EmployeeHistory], query: &LeaderboardQuery) -> Vec<RankedEmployee> {
    let cutoff = match (query.period.months_back(), query.reference_month.as_deref()) {
        (Some(back), Some(reference)) => match MonthKey::parse(reference) {
            Some(mk) => mk.minus_months(back),
            None => {
                log::warn!("leaderboard: unparseable reference month '{reference}', skipping period filter");
                None
            }
        },
        (Some(_), None) => {
            log::warn!("leaderboard: period {:?} without reference month, skipping period filter", query.period);
            None
        }
        (None, _) => None,
    };

    let mut ranked: Vec<RankedEmployee> = histories
        .iter()
        .filter(|h| query.department.as_deref().map_or(true, |d| h.department == d))
        .filter(|h| in_period(h, cutoff))
        .filter_map(|h| rank_one(h, query.metric))
        .collect();

    ranked.sort_by(|a, b| {
        b.ranking_score
            .partial_cmp(&a.ranking_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    for (i, entry) in ranked.iter_mut().enumerate() {
        entry.rank = i + 1;
    }
    ranked
}
