use domain::DomainError;
use llm::LlmError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Model text could not be parsed as JSON; `raw` is the text as received
    #[error("Invalid JSON response from Gemini API: {reason}")]
    InvalidResponse { raw: String, reason: String },

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Validation(#[from] DomainError),
}

impl AnalysisError {
    pub fn is_quota(&self) -> bool {
        matches!(self, AnalysisError::Llm(e) if e.is_quota())
    }
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
