//! Reshape the loosely structured `results` payload into a [`Report`].
//!
//! Two schemas are understood. The primary one is flat and keyed by gate:
//!
//! ```json
//! { "primary_hard_gates": { "retry_logic": { "implemented": "yes", "evidence": "..." } } }
//! ```
//!
//! The older one groups practices under category buckets whose practice
//! names differ slightly from gate keys:
//!
//! ```json
//! { "security_quality_analysis": { "availability": { "set_timeouts_on_io_operations": { ... } } } }
//! ```
//!
//! The fallback schema is consulted only when the primary one yields no
//! gates; the two are never merged.

use serde_json::{Map, Value};
use tracing::warn;

use crate::catalog::{GateCatalog, GateDefinition};
use crate::report::{
    GateEvaluation, GateStatus, Report, ReportSource, Statistics, TechnologyEntry, NO_EVIDENCE,
    NO_RECOMMENDATION,
};

const PRIMARY_KEY: &str = "primary_hard_gates";
const FALLBACK_KEY: &str = "security_quality_analysis";
const TECHNOLOGY_KEY: &str = "technology_stack";
const TECHNOLOGY_KINDS: [(&str, &str); 3] = [
    ("languages", "language"),
    ("frameworks", "framework"),
    ("databases", "database"),
];

/// Normalize against the canonical catalog.
pub fn normalize(results: &Value) -> Report {
    GateCatalog::canonical().normalize(results)
}

impl GateCatalog {
    pub fn normalize(&self, results: &Value) -> Report {
        let primary = self.extract_primary(results);
        let (source, mut gates) = if !primary.is_empty() {
            (ReportSource::Primary, primary)
        } else {
            let fallback = self.extract_fallback(results);
            if fallback.is_empty() {
                (ReportSource::Empty, fallback)
            } else {
                (ReportSource::Fallback, fallback)
            }
        };
        gates.sort_by_key(|g| self.position(&g.gate_key));

        Report {
            source,
            statistics: Statistics::compute(self, &gates),
            gates,
            technologies: extract_technologies(results),
        }
    }

    fn extract_primary(&self, results: &Value) -> Vec<GateEvaluation> {
        let Some(section) = results.get(PRIMARY_KEY).and_then(Value::as_object) else {
            return Vec::new();
        };

        let mut gates = Vec::new();
        for (key, details) in section {
            let Some(def) = self.get(key) else {
                warn!(gate = %key, "dropping unknown gate from primary schema");
                continue;
            };
            let Some(details) = details.as_object() else {
                warn!(gate = %key, "dropping non-object gate entry");
                continue;
            };
            gates.push(evaluate(def, def.category.to_string(), details));
        }
        gates
    }

    fn extract_fallback(&self, results: &Value) -> Vec<GateEvaluation> {
        let Some(section) = results.get(FALLBACK_KEY).and_then(Value::as_object) else {
            return Vec::new();
        };

        let mut gates = Vec::new();
        for (bucket, practices) in section {
            if !self.knows_bucket(bucket) {
                warn!(bucket = %bucket, "dropping unknown category bucket");
                continue;
            }
            let Some(practices) = practices.as_object() else {
                warn!(bucket = %bucket, "dropping non-object category bucket");
                continue;
            };
            for (practice, details) in practices {
                let Some(def) = self.translate(bucket, practice) else {
                    warn!(bucket = %bucket, practice = %practice, "dropping unmapped practice");
                    continue;
                };
                let Some(details) = details.as_object() else {
                    warn!(bucket = %bucket, practice = %practice, "dropping non-object practice entry");
                    continue;
                };
                gates.push(evaluate(def, title_case(bucket), details));
            }
        }
        gates
    }
}

fn evaluate(def: &GateDefinition, category: String, details: &Map<String, Value>) -> GateEvaluation {
    GateEvaluation {
        gate_key: def.key.to_string(),
        display_name: def.display_name.to_string(),
        category,
        status: GateStatus::from_raw(details.get("implemented").and_then(Value::as_str)),
        evidence: text_or(details.get("evidence"), NO_EVIDENCE),
        recommendation: text_or(details.get("recommendation"), NO_RECOMMENDATION),
    }
}

/// Free text with a placeholder for absent, null or empty values.
/// Structured values are kept as compact JSON.
fn text_or(value: Option<&Value>, default: &str) -> String {
    match value {
        None | Some(Value::Null) => default.to_string(),
        Some(Value::String(s)) if s.is_empty() => default.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn optional_text(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn extract_technologies(results: &Value) -> Vec<TechnologyEntry> {
    let Some(stack) = results.get(TECHNOLOGY_KEY).and_then(Value::as_object) else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    for (section, kind) in TECHNOLOGY_KINDS {
        let Some(items) = stack.get(section).and_then(Value::as_array) else {
            continue;
        };
        for item in items.iter().filter_map(Value::as_object) {
            entries.push(TechnologyEntry {
                kind: kind.to_string(),
                name: optional_text(item.get("name")).unwrap_or_else(|| "Unknown".to_string()),
                version: optional_text(item.get("version")),
                purpose: optional_text(item.get("purpose")),
            });
        }
    }
    entries
}

/// `error_handling` → `Error Handling`.
pub fn title_case(bucket: &str) -> String {
    bucket
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
