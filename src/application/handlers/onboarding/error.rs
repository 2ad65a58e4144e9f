//! Errors shared by the onboarding handlers.

use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use crate::domain::onboarding::OnboardingError;
use crate::ports::SessionStoreError;

#[derive(Debug, thiserror::Error)]
pub enum OnboardingServiceError {
    #[error("Onboarding session not found: {0}")]
    NotFound(SessionId),

    #[error(transparent)]
    Onboarding(#[from] OnboardingError),

    #[error("Session store error: {0}")]
    Store(SessionStoreError),
}

impl From<SessionStoreError> for OnboardingServiceError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::NotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

impl OnboardingServiceError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound(_) => ErrorCode::SessionNotFound,
            Self::Onboarding(e) => e.code(),
            Self::Store(_) => ErrorCode::InternalError,
        }
    }
}

impl From<OnboardingServiceError> for DomainError {
    fn from(err: OnboardingServiceError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_not_found_becomes_not_found() {
        let id = SessionId::new();
        let err: OnboardingServiceError = SessionStoreError::NotFound(id).into();
        assert!(matches!(err, OnboardingServiceError::NotFound(missing) if missing == id));
        assert_eq!(err.code(), ErrorCode::SessionNotFound);
    }

    #[test]
    fn onboarding_errors_keep_their_code() {
        let err: OnboardingServiceError = OnboardingError::TurnInProgress.into();
        assert_eq!(err.code(), ErrorCode::TurnInProgress);
    }

    #[test]
    fn capacity_is_internal() {
        let err: OnboardingServiceError = SessionStoreError::CapacityExceeded(10).into();
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
