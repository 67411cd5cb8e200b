use thiserror::Error;

/// Conditions the core reports to callers. A rejected prediction answer is
/// not one of them; the history predictor falls back instead.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    #[error("Insufficient data for predictions: {0}")]
    InsufficientData(&'static str),

    #[error("Failed to generate recommendations: {0}")]
    GenerationFailed(String),

    #[error("Date out of range: {0}")]
    DateOutOfRange(String),
}

impl CoreError {
    /// Machine-readable code used in the JSON error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InsufficientData(_) => "insufficient_data",
            Self::GenerationFailed(_) => "generation_failed",
            Self::DateOutOfRange(_) => "date_out_of_range",
        }
    }
}
