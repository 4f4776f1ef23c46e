//! The fixed hard gate catalog and the translation table used to map the
//! older, category-bucketed response schema onto canonical gate keys.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

/// Number of gates every report is scored against.
pub const EXPECTED_GATE_COUNT: usize = 15;

// ── Category ──
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateCategory {
    Auditability,
    Availability,
    ErrorHandling,
    Testing,
}

impl GateCategory {
    pub const ALL: [GateCategory; 4] = [
        Self::Auditability,
        Self::Availability,
        Self::ErrorHandling,
        Self::Testing,
    ];

    /// Bucket name used by the fallback schema.
    pub fn bucket(&self) -> &'static str {
        match self {
            Self::Auditability => "auditability",
            Self::Availability => "availability",
            Self::ErrorHandling => "error_handling",
            Self::Testing => "testing",
        }
    }
}

impl std::fmt::Display for GateCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Auditability => "Auditability",
            Self::Availability => "Availability",
            Self::ErrorHandling => "Error Handling",
            Self::Testing => "Testing",
        };
        write!(f, "{s}")
    }
}

// ── Gate ──
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateDefinition {
    pub key: &'static str,
    pub display_name: &'static str,
    pub category: GateCategory,
}

const fn gate(key: &'static str, display_name: &'static str, category: GateCategory) -> GateDefinition {
    GateDefinition { key, display_name, category }
}

/// Practice names of one fallback bucket and the gate each one maps to.
#[derive(Debug, Clone, Copy)]
pub struct BucketTranslation {
    pub category: GateCategory,
    pub practices: &'static [(&'static str, &'static str)],
}

use GateCategory::{Auditability, Availability, ErrorHandling, Testing};

const GATES: &[GateDefinition] = &[
    gate("logs_searchable_available", "Logs Are Searchable And Available", Auditability),
    gate("avoid_logging_confidential_data", "Avoid Logging Confidential Data", Auditability),
    gate("create_audit_trail_logs", "Create Audit Trail Logs", Auditability),
    gate("tracking_id_for_log_messages", "Implement Tracking ID For Log Messages", Auditability),
    gate("log_rest_api_calls", "Log REST API Calls", Auditability),
    gate("log_application_messages", "Log Application Messages", Auditability),
    gate("client_ui_errors_logged", "Client UI Errors Are Logged", Auditability),
    gate("retry_logic", "Retry Logic", Availability),
    gate("set_timeouts_io_operations", "Set Timeouts On IO Operation", Availability),
    gate("throttling_drop_request", "Throttling, Drop Request", Availability),
    gate("circuit_breakers_outgoing_requests", "Set Circuit Breakers On Outgoing Requests", Availability),
    gate("log_system_errors", "Log System Errors", ErrorHandling),
    gate("use_http_standard_error_codes", "Use HTTP Standard Error Codes", ErrorHandling),
    gate("include_client_error_tracking", "Include Client Error Tracking", ErrorHandling),
    gate("automated_regression_testing", "Automated Regression Testing", Testing),
];

// `logs_searchable_available` has no counterpart in the bucketed schema.
const TRANSLATIONS: &[BucketTranslation] = &[
    BucketTranslation {
        category: Auditability,
        practices: &[
            ("avoid_logging_confidential_data", "avoid_logging_confidential_data"),
            ("create_audit_trail_logs", "create_audit_trail_logs"),
            ("tracking_id_for_log_messages", "tracking_id_for_log_messages"),
            ("log_rest_api_calls", "log_rest_api_calls"),
            ("log_application_messages", "log_application_messages"),
            ("client_ui_errors_are_logged", "client_ui_errors_logged"),
        ],
    },
    BucketTranslation {
        category: Availability,
        practices: &[
            ("retry_logic", "retry_logic"),
            ("set_timeouts_on_io_operations", "set_timeouts_io_operations"),
            ("throttling_drop_request", "throttling_drop_request"),
            ("circuit_breakers_on_outgoing_requests", "circuit_breakers_outgoing_requests"),
        ],
    },
    BucketTranslation {
        category: ErrorHandling,
        practices: &[
            ("log_system_errors", "log_system_errors"),
            ("use_http_standard_error_codes", "use_http_standard_error_codes"),
            ("include_client_error_tracking", "include_client_error_tracking"),
        ],
    },
    BucketTranslation {
        category: Testing,
        practices: &[("automated_regression_testing", "automated_regression_testing")],
    },
];

static CANONICAL: GateCatalog = GateCatalog::new(GATES, TRANSLATIONS);

/// Gate definitions plus the fallback translation table.
#[derive(Debug, Clone, Copy)]
pub struct GateCatalog {
    gates: &'static [GateDefinition],
    translations: &'static [BucketTranslation],
}

impl GateCatalog {
    pub const fn new(
        gates: &'static [GateDefinition],
        translations: &'static [BucketTranslation],
    ) -> Self {
        Self { gates, translations }
    }

    /// The built-in 15 gate catalog.
    pub fn canonical() -> &'static GateCatalog {
        &CANONICAL
    }

    pub fn gates(&self) -> &'static [GateDefinition] {
        self.gates
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&'static GateDefinition> {
        self.gates.iter().find(|g| g.key == key)
    }

    /// Position of `key` in catalog order.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.gates.iter().position(|g| g.key == key)
    }

    /// Map a fallback `bucket.practice` pair to its canonical gate.
    pub fn translate(&self, bucket: &str, practice: &str) -> Option<&'static GateDefinition> {
        let table = self.translations.iter().find(|t| t.category.bucket() == bucket)?;
        let (_, target) = table.practices.iter().find(|(p, _)| *p == practice)?;
        self.get(target)
    }

    pub fn knows_bucket(&self, bucket: &str) -> bool {
        self.translations.iter().any(|t| t.category.bucket() == bucket)
    }

    /// Check the completeness invariants: exactly [`EXPECTED_GATE_COUNT`]
    /// unique gates, and every translation lands on a distinct known gate.
    pub fn validate(&self) -> Result<()> {
        if self.gates.len() != EXPECTED_GATE_COUNT {
            return Err(CatalogError::WrongGateCount {
                expected: EXPECTED_GATE_COUNT,
                found: self.gates.len(),
            });
        }

        let mut keys = HashSet::new();
        for gate in self.gates {
            if !keys.insert(gate.key) {
                return Err(CatalogError::DuplicateGate(gate.key.to_string()));
            }
        }

        let mut targeted = HashSet::new();
        for table in self.translations {
            for (practice, target) in table.practices {
                if !keys.contains(target) {
                    return Err(CatalogError::UnknownTarget {
                        bucket: table.category.bucket().to_string(),
                        practice: practice.to_string(),
                        target: target.to_string(),
                    });
                }
                if !targeted.insert(*target) {
                    return Err(CatalogError::AmbiguousTarget(target.to_string()));
                }
            }
        }
        Ok(())
    }
}
