//! Front-end adapter: raw JSON submission → canonical records.
//!
//! RULE: nothing past this module sees loosely typed data.
//!   - `services` entries may be `"SEO"` or `{ "service": "SEO", ... }`.
//!   - Numeric fields accept numbers, numeric strings, booleans and null.
//!     Anything else becomes 0 with a warning.
//!   - A client record that cannot be read at all is skipped with a
//!     warning; it never aborts the other clients.

use crate::{
    error::ScoreResult,
    model::{
        ActivityCounters, Client, Employee, Frequency, LearningEntry, Relationship,
        ServiceProgress, ServiceScope, Submission, SubmissionContext,
    },
};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

// ── Coercion helpers ─────────────────────────────────────────────────────────

/// Read a loosely typed numeric value. `field` is only used for the log.
pub fn coerce_f64(value: &Value, field: &str) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => if *b { 1.0 } else { 0.0 },
        Value::Number(n) => match n.as_f64() {
            Some(x) if x.is_finite() => x,
            _ => 0.0,
        },
        Value::String(s) if s.trim().is_empty() => 0.0,
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(x) if x.is_finite() => x,
            _ => {
                log::warn!("intake: non-numeric {field}={s:?}, using 0");
                0.0
            }
        },
        other => {
            log::warn!("intake: non-numeric {field}={other}, using 0");
            0.0
        }
    }
}

/// Count-like fields: arrays count their elements, scalars coerce.
pub fn coerce_count(value: &Value, field: &str) -> f64 {
    match value {
        Value::Array(items) => items.len() as f64,
        other => coerce_f64(other, field),
    }
}

fn field<'a>(obj: &'a Map<String, Value>, key: &str) -> &'a Value {
    obj.get(key).unwrap_or(&Value::Null)
}

fn num(obj: &Map<String, Value>, key: &str) -> f64 {
    coerce_f64(field(obj, key), key)
}

fn count(obj: &Map<String, Value>, key: &str) -> f64 {
    coerce_count(field(obj, key), key)
}

fn object<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    obj.get(key).and_then(Value::as_object)
}

// ── Services ─────────────────────────────────────────────────────────────────

/// One `services` entry as it arrives.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ServiceEntry {
    Name(String),
    Detailed { service: String },
}

impl ServiceEntry {
    pub fn into_name(self) -> String {
        match self {
            ServiceEntry::Name(name) => name,
            ServiceEntry::Detailed { service } => service,
        }
    }
}

fn read_services(value: &Value, client: &str) -> Vec<String> {
    let Some(items) = value.as_array() else {
        if !value.is_null() {
            log::warn!("intake: client '{client}' services is not a list, ignoring");
        }
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match ServiceEntry::deserialize(item) {
            Ok(entry) => Some(entry.into_name()),
            Err(_) => {
                log::warn!("intake: client '{client}' has unreadable service entry {item}");
                None
            }
        })
        .collect()
}

/// `None` only for an absent or null entry. Any other non-object entry
/// still counts as a scope, with no readable deliverables.
fn read_scope(value: &Value, service: &str) -> Option<ServiceScope> {
    if value.is_null() {
        return None;
    }
    let Some(obj) = value.as_object() else {
        log::warn!("intake: service '{service}' has unreadable scope {value}, treating deliverables as 0");
        return Some(ServiceScope::new(0.0, Frequency::Monthly));
    };
    let deliverables = coerce_f64(field(obj, "deliverables"), "deliverables");
    let frequency = match obj.get("frequency").and_then(Value::as_str) {
        None => Frequency::Monthly,
        Some(raw) => Frequency::parse(raw).unwrap_or_else(|| {
            log::warn!("intake: service '{service}' has unknown frequency {raw:?}, treating as monthly");
            Frequency::Monthly
        }),
    };
    Some(ServiceScope { deliverables, frequency })
}

fn read_scopes(obj: &Map<String, Value>) -> BTreeMap<String, ServiceScope> {
    object(obj, "service_scopes")
        .map(|scopes| {
            scopes
                .iter()
                .filter_map(|(name, v)| read_scope(v, name).map(|s| (name.clone(), s)))
                .collect()
        })
        .unwrap_or_default()
}

fn read_progress(obj: &Map<String, Value>) -> BTreeMap<String, ServiceProgress> {
    object(obj, "service_progress")
        .map(|progress| {
            progress
                .iter()
                .filter_map(|(name, v)| {
                    let p = v.as_object()?;
                    // Only a real JSON number overrides inference.
                    let completed = p.get("completed").and_then(Value::as_f64);
                    Some((name.clone(), ServiceProgress { completed }))
                })
                .collect()
        })
        .unwrap_or_default()
}

fn read_activity(obj: &Map<String, Value>) -> ActivityCounters {
    ActivityCounters {
        web_pages_this:        num(obj, "web_pagesThis"),
        web_on_time_this:      num(obj, "web_onTimeThis"),
        web_bugs_this:         num(obj, "web_bugsThis"),
        web_saas_upsells:      num(obj, "web_saasUpsells"),
        seo_traffic_this:      num(obj, "seo_trafficThis"),
        seo_keywords_worked:   count(obj, "seo_keywordsWorked"),
        seo_top3:              count(obj, "seo_top3"),
        seo_technical_issues:  num(obj, "seo_technicalIssues"),
        ads_new_ads:           num(obj, "ads_newAds"),
        sm_graphics_photoshop: num(obj, "sm_graphicsPhotoshop"),
        sm_graphics_canva:     num(obj, "sm_graphicsCanva"),
        sm_graphics_ai:        num(obj, "sm_graphicsAi"),
        sm_short_videos:       num(obj, "sm_shortVideos"),
        sm_long_videos:        num(obj, "sm_longVideos"),
        ai_outputs:            num(obj, "ai_outputs"),
        sales_deals:           num(obj, "sales_deals"),
    }
}

// ── Records ──────────────────────────────────────────────────────────────────

/// Normalize one raw client. `None` when the value is not an object.
pub fn read_client(value: &Value) -> Option<Client> {
    let obj = value.as_object()?;
    let name = obj.get("name").and_then(Value::as_str).unwrap_or_default().to_string();

    let relationship = Relationship {
        client_satisfaction: object(obj, "relationship")
            .map(|r| coerce_f64(field(r, "clientSatisfaction"), "clientSatisfaction"))
            .unwrap_or(0.0),
    };

    Some(Client {
        services: read_services(field(obj, "services"), &name),
        service_scopes: read_scopes(obj),
        service_progress: read_progress(obj),
        activity: read_activity(obj),
        relationship,
        name,
    })
}

/// Normalize a client list, skipping unreadable entries.
pub fn read_clients(values: &[Value]) -> Vec<Client> {
    values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| {
            let client = read_client(v);
            if client.is_none() {
                log::warn!("intake: skipping malformed client record #{i}");
            }
            client
        })
        .collect()
}

pub fn read_learning(values: &[Value]) -> Vec<LearningEntry> {
    values
        .iter()
        .map(|v| LearningEntry {
            hours: v.get("hours").map(|h| coerce_f64(h, "hours")).unwrap_or(0.0),
        })
        .collect()
}

pub fn read_employee(value: &Value) -> Employee {
    Employee {
        name: value.get("name").and_then(Value::as_str).unwrap_or_default().to_string(),
        department: read_department(value.get("department")),
    }
}

/// Only an absent or null department counts as missing. Anything else
/// becomes a label, which may resolve to an unrecognized department.
fn read_department(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => {
            log::warn!("intake: non-string department {other}, using it as a label");
            Some(other.to_string())
        }
    }
}

fn read_grace_days(value: Option<&Value>) -> Option<u32> {
    let v = value?;
    if v.is_null() {
        return None;
    }
    let days = coerce_f64(v, "graceDays");
    if days < 0.0 {
        log::warn!("intake: negative graceDays {days}, using 0");
    }
    Some(days.max(0.0).min(f64::from(u32::MAX)) as u32)
}

impl Submission {
    /// Build a submission from an already-parsed JSON value. Every field is
    /// optional at this level; a missing department surfaces later, when a
    /// score that needs it is computed.
    pub fn from_value(value: &Value) -> Self {
        let list = |key: &str| value.get(key).and_then(Value::as_array).cloned().unwrap_or_default();
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);

        Submission {
            employee: read_employee(value.get("employee").unwrap_or(&Value::Null)),
            clients:  read_clients(&list("clients")),
            learning: read_learning(&list("learning")),
            context:  SubmissionContext {
                month_key:    text("monthKey"),
                submitted_at: text("submittedAt"),
                grace_days:   read_grace_days(value.get("graceDays")),
            },
        }
    }

    pub fn from_json(raw: &str) -> ScoreResult<Self> {
        let value: Value = serde_json::from_str(raw)?;
        Ok(Self::from_value(&value))
    }
}
