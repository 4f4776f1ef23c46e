use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Gate catalog must hold {expected} gates, found {found}")]
    WrongGateCount { expected: usize, found: usize },

    #[error("Duplicate gate key: {0}")]
    DuplicateGate(String),

    #[error("Translation for {bucket}.{practice} targets unknown gate: {target}")]
    UnknownTarget {
        bucket: String,
        practice: String,
        target: String,
    },

    #[error("Gate {0} is targeted by more than one fallback practice")]
    AmbiguousTarget(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
