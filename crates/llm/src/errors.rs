use thiserror::Error;

/// Failures of a single generation call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    /// HTTP 429 from the API
    #[error("Quota API dépassé ou rate limiting. Veuillez réessayer dans quelques minutes.")]
    QuotaExceeded { body: String },

    /// Any other non-2xx status
    #[error("HTTP error! status: {status}")]
    Http { status: u16, body: String },

    /// Connection, TLS or body-decoding failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// 2xx envelope without `candidates[0].content.parts[0].text`
    #[error("Empty response from Gemini API")]
    EmptyResponse,

    #[error("GEMINI_API_KEY is not defined in environment variables")]
    MissingApiKey,

    #[error("Invalid client configuration: {0}")]
    Configuration(String),
}

impl LlmError {
    pub fn is_quota(&self) -> bool {
        matches!(self, LlmError::QuotaExceeded { .. })
    }

    pub(crate) fn from_status(status: u16, body: String) -> Self {
        if status == 429 {
            LlmError::QuotaExceeded { body }
        } else {
            LlmError::Http { status, body }
        }
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(error: reqwest::Error) -> Self {
        LlmError::Transport(error.to_string())
    }
}

pub type LlmResult<T> = Result<T, LlmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(LlmError::from_status(429, String::new()).is_quota());
        assert_eq!(
            LlmError::from_status(503, "down".into()),
            LlmError::Http {
                status: 503,
                body: "down".into()
            }
        );
        assert_eq!(
            LlmError::from_status(500, String::new()).to_string(),
            "HTTP error! status: 500"
        );
    }
}
