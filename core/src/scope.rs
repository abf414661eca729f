//! Scope completion — how much of a client's contracted monthly volume
//! has been delivered.
//!
//! Resolution order for one (client, service) pair:
//!   1. No scope entry for the service          → None (not applicable)
//!   2. Deliverables missing or ≤ 0             → 0
//!   3. Explicit `service_progress[..].completed` → completed / target
//!   4. Otherwise                               → inferred activity / target
//!
//! `None` and `0` are different answers: aggregation drops `None` from the
//! denominator but counts `0` with full weight.

use crate::{
    calendar,
    model::{ActivityCounters, Client, Frequency, ServiceScope},
    types::{clamp_percent, clamp_score, round1, round_half_up, Percent, Score},
    weights::ServiceWeights,
};

/// The closed set of activity-inference formulas, keyed by service name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceCategory {
    SocialMedia,
    Seo,
    PaidAds,
    WebMaintenance,
    AiOutputs,
    Unrecognized,
}

impl ServiceCategory {
    pub fn of(service: &str) -> Self {
        match service {
            "Social Media"            => ServiceCategory::SocialMedia,
            "SEO" | "GBP SEO"         => ServiceCategory::Seo,
            "Google Ads" | "Meta Ads" => ServiceCategory::PaidAds,
            "Website Maintenance"     => ServiceCategory::WebMaintenance,
            "AI"                      => ServiceCategory::AiOutputs,
            _                         => ServiceCategory::Unrecognized,
        }
    }

    /// Delivered units this month, as counted for this category.
    pub fn delivered(&self, a: &ActivityCounters) -> f64 {
        match self {
            ServiceCategory::SocialMedia    => a.social_posts(),
            ServiceCategory::Seo            => a.seo_keywords_worked + a.seo_top3 + a.seo_technical_issues,
            ServiceCategory::PaidAds        => a.ads_new_ads,
            ServiceCategory::WebMaintenance => a.web_pages_this + a.web_saas_upsells,
            ServiceCategory::AiOutputs      => a.ai_outputs,
            ServiceCategory::Unrecognized   => 0.0,
        }
    }
}

/// Multiplier from per-period deliverables to a monthly volume.
pub fn frequency_factor(frequency: Frequency, month_key: Option<&str>) -> f64 {
    match frequency {
        Frequency::Daily     => f64::from(calendar::business_days_in(month_key)),
        Frequency::Weekly    => 4.0,
        Frequency::BiWeekly  => 2.0,
        Frequency::Monthly   => 1.0,
        Frequency::Quarterly => 1.0 / 3.0,
    }
}

/// Monthly target, rounded and floored at 1.
pub fn monthly_target(scope: &ServiceScope, month_key: Option<&str>) -> f64 {
    let raw = scope.deliverables * frequency_factor(scope.frequency, month_key);
    round_half_up(raw).max(1.0)
}

fn percent_of(delivered: f64, target: f64) -> Percent {
    clamp_percent(round_half_up(delivered / target * 100.0))
}

/// Completion percentage for one service of one client, or `None` when
/// the client has no scope for that service.
pub fn completion(client: &Client, service: &str, month_key: Option<&str>) -> Option<Percent> {
    let scope = client.service_scopes.get(service)?;
    if scope.deliverables.is_nan() || scope.deliverables <= 0.0 {
        return Some(0.0);
    }
    let target = monthly_target(scope, month_key);

    if let Some(completed) = explicit_completed(client, service) {
        return Some(percent_of(completed, target));
    }
    Some(inferred_completion(client, service, target))
}

/// The override step in isolation.
pub fn explicit_completed(client: &Client, service: &str) -> Option<f64> {
    client
        .service_progress
        .get(service)
        .and_then(|p| p.completed)
        .filter(|c| c.is_finite())
}

/// The inference step in isolation.
pub fn inferred_completion(client: &Client, service: &str, target: f64) -> Percent {
    let delivered = ServiceCategory::of(service).delivered(&client.activity);
    percent_of(delivered, target)
}

/// Weighted mean completion across the client's services, on the 0–100
/// scale. `None` when no service has an applicable scope.
pub fn weighted_completion(
    client: &Client,
    weights: &ServiceWeights,
    month_key: Option<&str>,
) -> Option<Percent> {
    let mut wsum = 0.0;
    let mut wcomp = 0.0;
    for service in &client.services {
        if let Some(c) = completion(client, service, month_key) {
            let w = weights.weight_of(service);
            wsum += w;
            wcomp += w * c;
        }
    }
    if wsum > 0.0 {
        Some(wcomp / wsum)
    } else {
        None
    }
}

/// Client scope score on the 0–10 scale. 0 for clients with nothing
/// applicable.
pub fn client_scope_score(client: &Client, weights: &ServiceWeights, month_key: Option<&str>) -> Score {
    weighted_completion(client, weights, month_key)
        .map(|pct| round1(clamp_score(pct / 10.0)))
        .unwrap_or(0.0)
}

/// Portfolio scope score: mean of the clients that have an applicable
/// completion, scaled to 0–10. Clients with nothing applicable are left
/// out of the mean.
pub fn portfolio_scope_score(clients: &[Client], weights: &ServiceWeights, month_key: Option<&str>) -> Score {
    let per_client: Vec<Percent> = clients
        .iter()
        .filter_map(|c| weighted_completion(c, weights, month_key))
        .collect();

    if per_client.is_empty() {
        return 0.0;
    }
    let avg = per_client.iter().sum::<f64>() / per_client.len() as f64;
    round1(clamp_score(avg / 100.0 * 10.0))
}
