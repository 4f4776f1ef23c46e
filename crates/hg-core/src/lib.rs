//! # hg-core
//!
//! Gate catalog, report model and result normalizer for hard gate
//! assessments. Pure data transformation: no I/O, no async.
//!
//! ```rust
//! use serde_json::json;
//!
//! let report = hg_core::normalize(&json!({
//!     "primary_hard_gates": {
//!         "retry_logic": { "implemented": "yes", "evidence": "resilience4j" }
//!     }
//! }));
//! assert_eq!(report.statistics.total, 15);
//! assert_eq!(report.statistics.implemented, 1);
//! ```

pub mod catalog;
pub mod error;
pub mod normalize;
pub mod report;

pub use catalog::{GateCatalog, GateCategory, GateDefinition, EXPECTED_GATE_COUNT};
pub use error::{CatalogError, Result};
pub use normalize::normalize;
pub use report::{
    GateEvaluation, GateStatus, Report, ReportRow, ReportSource, RowStatus, Statistics,
    TechnologyEntry,
};
