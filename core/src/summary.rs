//! Plain-text report of a computed score record.

use crate::{
    aggregate::hours_from_learning_score,
    error::ScoreResult,
    model::{Client, Department, Employee, ScoreRecord},
    types::round1,
};

/// Department-specific activity total, as (label, value).
pub fn activity_total(dept: &Department, clients: &[Client]) -> Option<(&'static str, f64)> {
    let sum = |f: fn(&Client) -> f64| clients.iter().map(f).sum::<f64>();
    match dept {
        Department::Web         => Some(("Total Pages", sum(|c| c.activity.web_pages_this))),
        Department::Seo         => Some(("Total Traffic", sum(|c| c.activity.seo_traffic_this))),
        Department::Sales       => Some(("Total Deals", sum(|c| c.activity.sales_deals))),
        Department::SocialMedia => Some(("Total Posts", sum(|c| c.activity.social_posts()))),
        Department::Ads         => Some(("Total New Ads", sum(|c| c.activity.ads_new_ads))),
        Department::Other(_)    => None,
    }
}

pub fn summarize_department(dept: &Department, clients: &[Client], scores: &ScoreRecord) -> String {
    let mut lines = vec![
        format!("Department: {dept}"),
        format!("KPI Score: {}", scores.kpi_score),
    ];
    if let Some((label, total)) = activity_total(dept, clients) {
        lines.push(format!("{label}: {}", round1(total)));
    }
    lines.push(format!(
        "Learning Hours: {}",
        hours_from_learning_score(scores.learning_score)
    ));
    lines.push(format!("Relationship Score: {}", scores.relationship_score));
    lines.join("\n")
}

pub fn summarize(employee: &Employee, clients: &[Client], scores: &ScoreRecord) -> ScoreResult<String> {
    let dept = employee.department()?;
    Ok(summarize_department(&dept, clients, scores))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ActivityCounters;

    #[test]
    fn web_summary_lists_pages() {
        let clients = [Client::named("a").with_activity(ActivityCounters {
            web_pages_this: 10.0,
            ..Default::default()
        })];
        let scores = ScoreRecord {
            kpi_score: 5.3,
            learning_score: 5.6,
            relationship_score: 9.0,
            overall_score: 6.5,
        };
        let text = summarize(&Employee::new("Asha", "Web"), &clients, &scores).unwrap();
        assert_eq!(
            text,
            "Department: Web\nKPI Score: 5.3\nTotal Pages: 10\nLearning Hours: 11.2\nRelationship Score: 9"
        );
    }

    #[test]
    fn fractional_totals_print_to_one_decimal() {
        let clients = [
            Client::named("a").with_activity(ActivityCounters { sales_deals: 0.1, ..Default::default() }),
            Client::named("b").with_activity(ActivityCounters { sales_deals: 0.2, ..Default::default() }),
        ];
        let text = summarize_department(&Department::Sales, &clients, &ScoreRecord::default());
        assert!(text.contains("Total Deals: 0.3\n"), "got {text}");
    }

    #[test]
    fn unknown_department_has_no_activity_line() {
        let text = summarize_department(
            &Department::Other("HR".into()),
            &[],
            &ScoreRecord::default(),
        );
        assert_eq!(text.lines().count(), 4);
        assert!(text.starts_with("Department: HR"));
    }
}
