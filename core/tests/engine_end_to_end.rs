//! Full evaluations through ScoringEngine.

use perfscore_core::{
    model::{ActivityCounters, Frequency, ServiceScope},
    Client, Employee, LearningEntry, ScoreError, ScoringConfig, ScoringEngine, Submission,
    SubmissionContext,
};

fn web_submission() -> Submission {
    let client = Client::named("Acme Dental")
        .with_service("Website Maintenance", ServiceScope::new(8.0, Frequency::Weekly))
        .with_activity(ActivityCounters {
            web_pages_this: 10.0,
            web_on_time_this: 0.9,
            web_bugs_this: 1.0,
            ..Default::default()
        })
        .with_satisfaction(9.0);

    Submission {
        employee: Employee::new("Asha", "Web"),
        clients:  vec![client],
        learning: vec![LearningEntry::hours(6.0), LearningEntry::hours(5.2)],
        context:  SubmissionContext::for_month("2024-01"),
    }
}

/// Web: base 7.4, scope 31% → 3.1, kpi round1(3.7 + 1.55) = 5.3;
/// learning 11.2h → 5.6; relationship 9; overall 2.65 + 1.12 + 2.7 → 6.5.
#[test]
fn web_employee_scores_match_formulas() {
    let engine = ScoringEngine::new(ScoringConfig::default_test());
    let submission = web_submission();

    assert_eq!(
        engine.completion(&submission.clients[0], "Website Maintenance", None),
        Some(31.0)
    );
    assert_eq!(engine.client_scope_score(&submission.clients[0], None), 3.1);

    let eval = engine.evaluate(&submission).unwrap();
    assert_eq!(eval.scores.kpi_score, 5.3);
    assert_eq!(eval.scores.learning_score, 5.6);
    assert_eq!(eval.scores.relationship_score, 9.0);
    assert_eq!(eval.scores.overall_score, 6.5);
    assert!(eval.discipline.is_none(), "no timestamp, no discipline result");
    assert!(eval.adjusted_overall.is_none());
}

/// A timestamp adds a discipline result and an adjusted overall score.
#[test]
fn late_submission_adjusts_overall() {
    let engine = ScoringEngine::new(ScoringConfig::default_test());
    let mut submission = web_submission();
    submission.context = SubmissionContext::for_month("2024-01").submitted_at("2024-02-10T00:00:00Z");

    let eval = engine.evaluate(&submission).unwrap();
    let d = eval.discipline.expect("discipline result");
    assert_eq!(d.late_days, 7);
    assert_eq!(d.penalty, 0.5);
    assert_eq!(eval.adjusted_overall, Some(6.0));
}

/// The config's default grace applies when the submission carries none.
#[test]
fn config_grace_days_apply() {
    let config = ScoringConfig { default_grace_days: 10, ..ScoringConfig::default_test() };
    let engine = ScoringEngine::new(config);
    let mut submission = web_submission();
    submission.context = SubmissionContext::for_month("2024-01").submitted_at("2024-02-10");

    let d = engine.evaluate(&submission).unwrap().discipline.unwrap();
    assert_eq!(d.late_days, 0);

    submission.context = submission.context.grace_days(3);
    let d = engine.evaluate(&submission).unwrap().discipline.unwrap();
    assert_eq!(d.late_days, 7);
}

#[test]
fn summary_is_part_of_the_evaluation() {
    let engine = ScoringEngine::default();
    let eval = engine.evaluate(&web_submission()).unwrap();
    assert_eq!(
        eval.summary,
        "Department: Web\nKPI Score: 5.3\nTotal Pages: 10\nLearning Hours: 11.2\nRelationship Score: 9"
    );
}

/// A missing department fails only that submission in a batch.
#[test]
fn batch_isolates_failures() {
    let engine = ScoringEngine::default();
    let mut broken = web_submission();
    broken.employee.department = None;

    let results = engine.evaluate_all(&[web_submission(), broken, web_submission()]);
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(ScoreError::MissingDepartment)));
    assert!(results[2].is_ok());
}

/// All four scores stay on the 0–10 scale for an over-achieving employee.
#[test]
fn scores_capped_at_ten() {
    let engine = ScoringEngine::default();
    let mut s = web_submission();
    s.learning = vec![LearningEntry::hours(400.0)];
    s.clients[0].relationship.client_satisfaction = 50.0;
    s.clients[0].activity.web_pages_this = 1_000.0;
    s.clients[0].activity.web_on_time_this = 1.0;
    s.clients[0].activity.web_bugs_this = 0.0;

    let r = engine.evaluate(&s).unwrap().scores;
    for (name, v) in [
        ("kpi", r.kpi_score),
        ("learning", r.learning_score),
        ("relationship", r.relationship_score),
        ("overall", r.overall_score),
    ] {
        assert!((0.0..=10.0).contains(&v), "{name}={v} out of range");
    }
    assert_eq!(r.kpi_score, 10.0);
    assert_eq!(r.overall_score, 10.0);
}
