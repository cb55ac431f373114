// ==========================================
// Breather Advisor - Engine Error Types
// ==========================================
// Only genuine failures are errors. Filter emptiness, fallbacks and
// parse degradations are modeled as explicit outcomes/statuses, not
// as error values.
// ==========================================

use thiserror::Error;

/// Engine-level error type.
#[derive(Error, Debug)]
pub enum SelectionError {
    /// Catalog empty or fully filtered away by the brand filter.
    #[error("breather catalog is empty or filtered out{0}")]
    MissingCatalog(String),

    /// Volume cannot be computed: no declared capacity and no full
    /// dimension set. The asset is not retried.
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias.
pub type SelectionResult<T> = Result<T, SelectionError>;
