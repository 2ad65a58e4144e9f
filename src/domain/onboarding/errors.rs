//! Error types for the onboarding domain

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Session-level misuse. None of these end a session on their own.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum OnboardingError {
    #[error("Onboarding session already completed")]
    SessionCompleted,

    #[error("Utterance is empty")]
    EmptyUtterance,

    #[error("A turn is already in progress for this session")]
    TurnInProgress,

    #[error("Invalid onboarding settings: {0}")]
    InvalidSettings(ValidationError),

    #[error("Invalid phase transition: {0}")]
    InvalidTransition(ValidationError),

    #[error("Question index {0} is outside the script")]
    QuestionOutOfRange(usize),
}

impl OnboardingError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::SessionCompleted => ErrorCode::SessionCompleted,
            Self::EmptyUtterance => ErrorCode::EmptyUtterance,
            Self::TurnInProgress => ErrorCode::TurnInProgress,
            Self::InvalidSettings(_) => ErrorCode::ValidationFailed,
            Self::InvalidTransition(_) => ErrorCode::InvalidStateTransition,
            Self::QuestionOutOfRange(_) => ErrorCode::InternalError,
        }
    }
}

impl From<OnboardingError> for DomainError {
    fn from(err: OnboardingError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
