use serde::{Deserialize, Serialize};

use crate::catalog::GateCatalog;

pub const NO_EVIDENCE: &str = "No evidence";
pub const NO_RECOMMENDATION: &str = "No recommendation";
pub const TECHNOLOGY_CATEGORY: &str = "Technology";
pub const TECHNOLOGY_RECOMMENDATION: &str = "Continue using as appropriate";

// ── Gate status ──
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateStatus {
    Implemented,
    Partial,
    Missing,
}

impl GateStatus {
    /// Interpret the service's raw `implemented` value.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("yes") => Self::Implemented,
            Some("partial") => Self::Partial,
            _ => Self::Missing,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Implemented => "implemented",
            Self::Partial => "partial",
            Self::Missing => "missing",
        }
    }
}

impl std::fmt::Display for GateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Implemented => "Implemented",
            Self::Partial => "Partial",
            Self::Missing => "Missing",
        };
        write!(f, "{s}")
    }
}

/// One scored gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateEvaluation {
    pub gate_key: String,
    pub display_name: String,
    pub category: String,
    pub status: GateStatus,
    pub evidence: String,
    pub recommendation: String,
}

/// A detected language, framework or database. Informational only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnologyEntry {
    /// Singular kind: `language`, `framework` or `database`.
    pub kind: String,
    pub name: String,
    pub version: Option<String>,
    pub purpose: Option<String>,
}

/// Which upstream schema the gate rows were read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportSource {
    Primary,
    Fallback,
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total: usize,
    pub implemented: usize,
    pub partial: usize,
    pub missing: usize,
    /// Percentage with partial gates counted as half, one decimal place.
    pub compliance: f64,
}

impl Statistics {
    /// Score `gates` against every key in `catalog`. Catalog gates with no
    /// evaluation count as missing, so the denominator is always the
    /// catalog size.
    pub fn compute(catalog: &GateCatalog, gates: &[GateEvaluation]) -> Self {
        let total = catalog.len();
        let mut implemented = 0;
        let mut partial = 0;

        for def in catalog.gates() {
            match gates.iter().find(|g| g.gate_key == def.key).map(|g| g.status) {
                Some(GateStatus::Implemented) => implemented += 1,
                Some(GateStatus::Partial) => partial += 1,
                Some(GateStatus::Missing) | None => {}
            }
        }

        Self {
            total,
            implemented,
            partial,
            missing: total - implemented - partial,
            compliance: compliance(implemented, partial, total),
        }
    }
}

fn compliance(implemented: usize, partial: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = (implemented as f64 + 0.5 * partial as f64) / total as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}

/// Normalized assessment output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub source: ReportSource,
    pub gates: Vec<GateEvaluation>,
    pub technologies: Vec<TechnologyEntry>,
    pub statistics: Statistics,
}

/// Display status of a flattened report row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    Gate(GateStatus),
    Detected,
}

impl std::fmt::Display for RowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gate(status) => write!(f, "{status}"),
            Self::Detected => write!(f, "Detected"),
        }
    }
}

/// One line of the rendered table.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub category: String,
    pub practice: String,
    pub status: RowStatus,
    pub evidence: String,
    pub recommendation: String,
}

impl ReportRow {
    pub fn is_gate(&self) -> bool {
        matches!(self.status, RowStatus::Gate(_))
    }
}

impl Report {
    /// Gate rows in catalog order, then technology rows.
    pub fn rows(&self) -> Vec<ReportRow> {
        let gates = self.gates.iter().map(|g| ReportRow {
            category: g.category.clone(),
            practice: g.display_name.clone(),
            status: RowStatus::Gate(g.status),
            evidence: g.evidence.clone(),
            recommendation: g.recommendation.clone(),
        });
        let tech = self.technologies.iter().map(|t| ReportRow {
            category: TECHNOLOGY_CATEGORY.to_string(),
            practice: format!("{}: {}", t.kind, t.name),
            status: RowStatus::Detected,
            evidence: format!(
                "Version: {}, Purpose: {}",
                t.version.as_deref().unwrap_or("N/A"),
                t.purpose.as_deref().unwrap_or("N/A"),
            ),
            recommendation: TECHNOLOGY_RECOMMENDATION.to_string(),
        });
        gates.chain(tech).collect()
    }

    pub fn gate(&self, key: &str) -> Option<&GateEvaluation> {
        self.gates.iter().find(|g| g.gate_key == key)
    }
}
