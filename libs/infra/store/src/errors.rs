use thiserror::Error;

/// Error kinds for the block store (C4), matching `SPEC_FULL.md` §7.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("no claimable block")]
    NotAvailable,

    #[error("illegal state: {0}")]
    IllegalState(String),

    #[error("unique violation: {0}")]
    UniqueViolation(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] libsql::Error),

    #[error("internal store error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Whether this error should count toward a control loop's
    /// consecutive-failure budget (§4.5-§4.7), as opposed to being handled
    /// locally (`NotAvailable`) or propagated immediately (`Internal`).
    pub fn counts_toward_failure_budget(&self) -> bool {
        matches!(self, StoreError::StoreUnavailable(_) | StoreError::UniqueViolation(_))
    }
}
