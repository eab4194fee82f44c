use thiserror::Error;

/// Unified error type for the entire portfolio-engine-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// Empty portfolios, zero values and zero-quantity holdings are NOT errors:
/// they produce zeroed or neutral outputs.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Caller parameters ───────────────────────────────────────────
    #[error("Invalid projection horizon: {0} years (must be >= 0)")]
    InvalidHorizon(i32),

    #[error("Invalid contribution amount: {0} (must be a finite, non-negative number)")]
    InvalidContribution(f64),

    #[error("Invalid age range: retirement age {retirement_age} is before current age {current_age}")]
    InvalidAgeRange {
        current_age: i32,
        retirement_age: i32,
    },

    // ── Holdings ────────────────────────────────────────────────────
    #[error("Invalid holding {id}: field `{field}` is not a finite number")]
    InvalidHolding { id: String, field: String },

    // ── Configuration ───────────────────────────────────────────────
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    // ── JSON boundary ───────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
