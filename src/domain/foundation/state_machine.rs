//! State machine trait for lifecycle enums.
//!
//! Provides a consistent interface for validating and performing state
//! transitions on lifecycle types such as the onboarding phase.

use super::ValidationError;

/// Trait for enums that represent state machines.
///
/// Implementors define which transitions are legal and which states are
/// terminal, and get a validated `transition_to` for free. States may carry
/// data (e.g. a question index), so the set of targets is described by a
/// predicate rather than an enumerated list.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for OnboardingPhase {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!((self, target), (OpenConversation, Completed) | ...)
///     }
///
///     fn is_terminal(&self) -> bool {
///         matches!(self, Completed)
///     }
/// }
///
/// let next = phase.transition_to(OnboardingPhase::Completed)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns true if no transition leaves this state.
    fn is_terminal(&self) -> bool;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestStatus {
        Draft,
        Active,
        Archived,
    }

    impl StateMachine for TestStatus {
        fn can_transition_to(&self, target: &Self) -> bool {
            use TestStatus::*;
            matches!((self, target), (Draft, Active) | (Active, Archived))
        }

        fn is_terminal(&self) -> bool {
            matches!(self, TestStatus::Archived)
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        let result = TestStatus::Draft.transition_to(TestStatus::Active);
        assert_eq!(result, Ok(TestStatus::Active));
    }

    #[test]
    fn transition_to_fails_for_invalid_transition() {
        let result = TestStatus::Draft.transition_to(TestStatus::Archived);
        assert!(matches!(result, Err(ValidationError::InvalidFormat { .. })));
    }

    #[test]
    fn terminal_state_is_reported() {
        assert!(TestStatus::Archived.is_terminal());
        assert!(!TestStatus::Draft.is_terminal());
    }
}
