//! Canonical input and output records.
//!
//! RULE: Calculators only ever see these types. Raw JSON goes through
//! `intake` first, which normalizes union-shaped and loosely typed fields.

use crate::error::{ScoreError, ScoreResult};
use crate::types::{Score, ServiceName};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ── Employee ─────────────────────────────────────────────────────────────────

/// Department strategy selector. Labels outside the known set land in
/// `Other` and take the neutral KPI path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Department {
    Web,
    Seo,
    Sales,
    SocialMedia,
    Ads,
    Other(String),
}

impl Department {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Web"          => Department::Web,
            "SEO"          => Department::Seo,
            "Sales"        => Department::Sales,
            "Social Media" => Department::SocialMedia,
            "Ads"          => Department::Ads,
            other          => Department::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Department::Web         => "Web",
            Department::Seo         => "SEO",
            Department::Sales       => "Sales",
            Department::SocialMedia => "Social Media",
            Department::Ads         => "Ads",
            Department::Other(s)    => s,
        }
    }
}

impl From<String> for Department {
    fn from(s: String) -> Self {
        Department::from_label(&s)
    }
}

impl From<Department> for String {
    fn from(d: Department) -> Self {
        d.label().to_string()
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(default)]
    pub name:       String,
    #[serde(default)]
    pub department: Option<String>,
}

impl Employee {
    pub fn new(name: impl Into<String>, department: impl Into<String>) -> Self {
        Self {
            name:       name.into(),
            department: Some(department.into()),
        }
    }

    /// The department strategy for this employee. A record with no
    /// department at all is a caller error; an unknown label is not.
    pub fn department(&self) -> ScoreResult<Department> {
        self.department
            .as_deref()
            .map(Department::from_label)
            .ok_or(ScoreError::MissingDepartment)
    }
}

// ── Client scope ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    Daily,
    Weekly,
    BiWeekly,
    #[default]
    Monthly,
    Quarterly,
}

impl Frequency {
    /// Case-insensitive label parse. `biweekly` is accepted alongside
    /// `bi-weekly`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "daily"                  => Some(Frequency::Daily),
            "weekly"                 => Some(Frequency::Weekly),
            "bi-weekly" | "biweekly" => Some(Frequency::BiWeekly),
            "monthly"                => Some(Frequency::Monthly),
            "quarterly"              => Some(Frequency::Quarterly),
            _                        => None,
        }
    }
}

/// Contracted delivery cadence for one service.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ServiceScope {
    pub deliverables: f64,
    pub frequency:    Frequency,
}

impl ServiceScope {
    pub fn new(deliverables: f64, frequency: Frequency) -> Self {
        Self { deliverables, frequency }
    }
}

/// Explicit progress for one service. `completed` overrides any
/// activity-count inference when present.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ServiceProgress {
    pub completed: Option<f64>,
}

/// Raw monthly activity counters. Which ones matter depends on the
/// service category and the employee's department.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityCounters {
    // Web
    pub web_pages_this:        f64,
    pub web_on_time_this:      f64,
    pub web_bugs_this:         f64,
    pub web_saas_upsells:      f64,
    // SEO
    pub seo_traffic_this:      f64,
    pub seo_keywords_worked:   f64,
    pub seo_top3:              f64,
    pub seo_technical_issues:  f64,
    // Ads
    pub ads_new_ads:           f64,
    // Social media
    pub sm_graphics_photoshop: f64,
    pub sm_graphics_canva:     f64,
    pub sm_graphics_ai:        f64,
    pub sm_short_videos:       f64,
    pub sm_long_videos:        f64,
    // AI
    pub ai_outputs:            f64,
    // Sales
    pub sales_deals:           f64,
}

impl ActivityCounters {
    pub fn social_posts(&self) -> f64 {
        self.sm_graphics_photoshop
            + self.sm_graphics_canva
            + self.sm_graphics_ai
            + self.sm_short_videos
            + self.sm_long_videos
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub client_satisfaction: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub name:             String,
    pub services:         Vec<ServiceName>,
    pub service_scopes:   BTreeMap<ServiceName, ServiceScope>,
    pub service_progress: BTreeMap<ServiceName, ServiceProgress>,
    pub activity:         ActivityCounters,
    pub relationship:     Relationship,
}

impl Client {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// Subscribe to `service` with the given scope.
    pub fn with_service(mut self, service: &str, scope: ServiceScope) -> Self {
        self.services.push(service.to_string());
        self.service_scopes.insert(service.to_string(), scope);
        self
    }

    pub fn with_progress(mut self, service: &str, completed: f64) -> Self {
        self.service_progress.insert(
            service.to_string(),
            ServiceProgress { completed: Some(completed) },
        );
        self
    }

    pub fn with_activity(mut self, activity: ActivityCounters) -> Self {
        self.activity = activity;
        self
    }

    pub fn with_satisfaction(mut self, satisfaction: f64) -> Self {
        self.relationship.client_satisfaction = satisfaction;
        self
    }
}

// ── Learning / submission ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LearningEntry {
    pub hours: f64,
}

impl LearningEntry {
    pub fn hours(hours: f64) -> Self {
        Self { hours }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmissionContext {
    pub month_key:    Option<String>,
    /// ISO-8601 timestamp or bare `YYYY-MM-DD` date.
    pub submitted_at: Option<String>,
    pub grace_days:   Option<u32>,
}

impl SubmissionContext {
    pub fn for_month(month_key: impl Into<String>) -> Self {
        Self { month_key: Some(month_key.into()), ..Self::default() }
    }

    pub fn submitted_at(mut self, ts: impl Into<String>) -> Self {
        self.submitted_at = Some(ts.into());
        self
    }

    pub fn grace_days(mut self, days: u32) -> Self {
        self.grace_days = Some(days);
        self
    }
}

/// Everything one monthly evaluation needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub employee: Employee,
    pub clients:  Vec<Client>,
    pub learning: Vec<LearningEntry>,
    pub context:  SubmissionContext,
}

// ── Outputs ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    #[serde(default)]
    pub kpi_score:          Score,
    #[serde(default)]
    pub learning_score:     Score,
    #[serde(default)]
    pub relationship_score: Score,
    #[serde(default)]
    pub overall_score:      Score,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisciplineResult {
    pub due_date:     Option<DateTime<Utc>>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub late_days:    u32,
    pub penalty:      f64,
}

impl DisciplineResult {
    /// The "could not evaluate" result: no due date, no penalty.
    pub fn not_applicable(submitted_at: Option<DateTime<Utc>>) -> Self {
        Self {
            due_date: None,
            submitted_at,
            late_days: 0,
            penalty: 0.0,
        }
    }
}
