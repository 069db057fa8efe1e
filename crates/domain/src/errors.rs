//! Domain Errors - Business rule violations
//!
//! Contains ONLY business logic errors, not infrastructure errors

use thiserror::Error;

/// Domain-specific errors representing business rule violations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Company figures rejected before any analysis is requested
    #[error("Invalid company data: {}", .0.join("; "))]
    InvalidCompanyData(Vec<String>),

    /// Business validation: invalid user id
    #[error("Invalid user id: {0}")]
    InvalidUserId(String),

    /// Business validation: malformed email address
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// Business validation: business plan request is missing a field
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Business rule: a user may only modify their own profile
    #[error("User {actor} may not modify profile of {owner}")]
    NotProfileOwner { actor: String, owner: String },

    /// Business validation: record not found
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    /// Business rule: email already registered
    #[error("Account already exists for {0}")]
    AccountExists(String),

    /// Authentication failed
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Session token unknown or revoked
    #[error("Session expired or unknown")]
    InvalidSession,

    /// Persistence backend failure surfaced through a repository
    #[error("Storage failure: {0}")]
    Storage(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Check if error is a business validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidCompanyData(_)
                | DomainError::InvalidUserId(_)
                | DomainError::InvalidEmail(_)
                | DomainError::MissingField(_)
        )
    }

    /// Check if error is an authentication/authorization failure
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidCredentials
                | DomainError::InvalidSession
                | DomainError::NotProfileOwner { .. }
                | DomainError::AccountExists(_)
        )
    }

    /// Check if error indicates missing data
    pub fn is_not_found_error(&self) -> bool {
        matches!(self, DomainError::RecordNotFound(_))
    }

    /// Get error category for business logic
    pub fn category(&self) -> ErrorCategory {
        if self.is_validation_error() {
            ErrorCategory::Validation
        } else if self.is_auth_error() {
            ErrorCategory::Auth
        } else if self.is_not_found_error() {
            ErrorCategory::NotFound
        } else {
            ErrorCategory::Other
        }
    }
}

/// Categories of domain errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Input validation errors
    Validation,
    /// Authentication and ownership failures
    Auth,
    /// Resource not found
    NotFound,
    /// Other domain errors
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categorization() {
        let validation_error = DomainError::InvalidCompanyData(vec!["x".into()]);
        assert!(validation_error.is_validation_error());
        assert_eq!(validation_error.category(), ErrorCategory::Validation);

        let auth_error = DomainError::InvalidCredentials;
        assert_eq!(auth_error.category(), ErrorCategory::Auth);

        let not_found_error = DomainError::RecordNotFound("test-id".to_string());
        assert!(not_found_error.is_not_found_error());
        assert_eq!(not_found_error.category(), ErrorCategory::NotFound);

        assert_eq!(
            DomainError::Storage("disk".into()).category(),
            ErrorCategory::Other
        );
    }

    #[test]
    fn test_company_error_lists_every_violation() {
        let error = DomainError::InvalidCompanyData(vec![
            "L'année est requise".to_string(),
            "Le secteur d'activité est requis".to_string(),
        ]);
        let text = error.to_string();
        assert!(text.contains("L'année est requise"));
        assert!(text.contains("Le secteur d'activité est requis"));
    }
}
