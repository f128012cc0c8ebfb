use thiserror::Error;

/// Errors raised by the scoring pipeline
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No policies available to score")]
    EmptyCatalog,

    #[error("No suitable policies found for this profile")]
    NoEligiblePolicies,
}
