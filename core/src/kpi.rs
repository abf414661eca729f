//! Department KPI scoring.
//!
//! Each department strategy produces an activity-based base score in
//! [0, 10], then blends it with the portfolio scope score:
//!
//!   kpi = round1(base × (1 − blend) + scope × blend)
//!
//! | Department          | Base                                   | Blend |
//! |---------------------|----------------------------------------|-------|
//! | Web                 | pages 40% / on-time 40% / bugs 20%     | 0.5   |
//! | SEO                 | traffic vs 10,000                      | 0.3   |
//! | Sales               | deals vs 10                            | 0.4   |
//! | Social Media, Ads   | neutral 5.0                            | 0.5   |
//! | anything else       | flat 5.0, no blending                  | —     |

use crate::{
    error::ScoreResult,
    model::{Client, Department, Employee},
    scope,
    types::{clamp_score, round1, Score},
    weights::ServiceWeights,
};

pub const NEUTRAL_SCORE: Score = 5.0;

const WEB_PAGES_TARGET: f64 = 20.0;
const SEO_TRAFFIC_TARGET: f64 = 10_000.0;
const SALES_DEALS_TARGET: f64 = 10.0;

/// Strategy chosen for a department.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KpiStrategy {
    Web,
    Seo,
    Sales,
    /// Departments without an activity formula; scope completion dominates.
    ScopeLed,
    /// Unknown department: flat neutral score.
    Neutral,
}

impl KpiStrategy {
    pub fn for_department(dept: &Department) -> Self {
        match dept {
            Department::Web                           => KpiStrategy::Web,
            Department::Seo                           => KpiStrategy::Seo,
            Department::Sales                         => KpiStrategy::Sales,
            Department::SocialMedia | Department::Ads => KpiStrategy::ScopeLed,
            Department::Other(_)                      => KpiStrategy::Neutral,
        }
    }

    /// Fraction of the KPI taken from scope completion. `None` means the
    /// strategy does not blend.
    pub fn blend_weight(&self) -> Option<f64> {
        match self {
            KpiStrategy::Web      => Some(0.5),
            KpiStrategy::Seo      => Some(0.3),
            KpiStrategy::Sales    => Some(0.4),
            KpiStrategy::ScopeLed => Some(0.5),
            KpiStrategy::Neutral  => None,
        }
    }

    /// Activity-based base score in [0, 10].
    pub fn base_score(&self, clients: &[Client]) -> Score {
        match self {
            KpiStrategy::Web                             => web_base(clients),
            KpiStrategy::Seo                             => seo_base(clients),
            KpiStrategy::Sales                           => sales_base(clients),
            KpiStrategy::ScopeLed | KpiStrategy::Neutral => NEUTRAL_SCORE,
        }
    }
}

/// Scale `value` against `target` onto 0–10, capped and floored.
fn scaled(value: f64, target: f64) -> Score {
    clamp_score(value / target * 10.0)
}

fn client_count(clients: &[Client]) -> f64 {
    clients.len().max(1) as f64
}

pub fn web_base(clients: &[Client]) -> Score {
    let (pages, on_time, bugs) = clients.iter().fold((0.0, 0.0, 0.0), |(p, o, b), c| {
        (
            p + c.activity.web_pages_this,
            o + c.activity.web_on_time_this,
            b + c.activity.web_bugs_this,
        )
    });
    let n = client_count(clients);

    let pages_score = scaled(pages, WEB_PAGES_TARGET);
    let on_time_score = clamp_score(on_time / n * 10.0);
    let bug_score = clamp_score(10.0 - bugs / n);

    round1(pages_score * 0.4 + on_time_score * 0.4 + bug_score * 0.2)
}

pub fn seo_base(clients: &[Client]) -> Score {
    let traffic: f64 = clients.iter().map(|c| c.activity.seo_traffic_this).sum();
    round1(scaled(traffic, SEO_TRAFFIC_TARGET))
}

pub fn sales_base(clients: &[Client]) -> Score {
    let deals: f64 = clients.iter().map(|c| c.activity.sales_deals).sum();
    round1(scaled(deals, SALES_DEALS_TARGET))
}

pub fn blend(base: Score, scope_score: Score, weight: f64) -> Score {
    clamp_score(round1(base * (1.0 - weight) + scope_score * weight))
}

/// KPI score for an already-resolved department.
pub fn kpi_for_department(
    dept: &Department,
    clients: &[Client],
    weights: &ServiceWeights,
    month_key: Option<&str>,
) -> Score {
    let strategy = KpiStrategy::for_department(dept);
    let Some(weight) = strategy.blend_weight() else {
        return NEUTRAL_SCORE;
    };
    let base = strategy.base_score(clients);
    let scope_score = scope::portfolio_scope_score(clients, weights, month_key);
    let kpi = blend(base, scope_score, weight);

    log::debug!(
        "kpi: dept={dept} strategy={strategy:?} base={base} scope={scope_score} kpi={kpi}"
    );
    kpi
}

/// KPI score for an employee. Fails only when the employee record carries
/// no department.
pub fn kpi_score(
    employee: &Employee,
    clients: &[Client],
    weights: &ServiceWeights,
    month_key: Option<&str>,
) -> ScoreResult<Score> {
    let dept = employee.department()?;
    Ok(kpi_for_department(&dept, clients, weights, month_key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ActivityCounters;

    fn with_activity(activity: ActivityCounters) -> Client {
        Client::named("c").with_activity(activity)
    }

    #[test]
    fn web_base_combines_three_parts() {
        let c = with_activity(ActivityCounters {
            web_pages_this: 10.0,
            web_on_time_this: 0.9,
            web_bugs_this: 1.0,
            ..Default::default()
        });
        assert_eq!(web_base(&[c]), 7.4);
    }

    #[test]
    fn web_bug_score_never_negative() {
        let c = with_activity(ActivityCounters { web_bugs_this: 40.0, ..Default::default() });
        assert_eq!(web_base(&[c]), 0.0);
    }

    #[test]
    fn seo_and_sales_cap_at_ten() {
        let c = with_activity(ActivityCounters {
            seo_traffic_this: 50_000.0,
            sales_deals: 30.0,
            ..Default::default()
        });
        assert_eq!(seo_base(std::slice::from_ref(&c)), 10.0);
        assert_eq!(sales_base(&[c]), 10.0);
    }

    #[test]
    fn unknown_department_is_flat_neutral() {
        let kpi = kpi_for_department(
            &Department::Other("Accounts".into()),
            &[],
            &ServiceWeights::default(),
            None,
        );
        assert_eq!(kpi, 5.0);
    }

    #[test]
    fn scope_led_departments_blend_neutral_base() {
        // No applicable scope: 5.0 × 0.5 + 0 × 0.5
        let kpi = kpi_for_department(&Department::Ads, &[], &ServiceWeights::default(), None);
        assert_eq!(kpi, 2.5);
    }

    #[test]
    fn blend_weights_match_table() {
        assert_eq!(KpiStrategy::Web.blend_weight(), Some(0.5));
        assert_eq!(KpiStrategy::Seo.blend_weight(), Some(0.3));
        assert_eq!(KpiStrategy::Sales.blend_weight(), Some(0.4));
        assert_eq!(KpiStrategy::ScopeLed.blend_weight(), Some(0.5));
        assert_eq!(KpiStrategy::Neutral.blend_weight(), None);
    }
}
