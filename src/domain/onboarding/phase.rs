//! Onboarding phase state machine.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Where a session is in its lifecycle.
///
/// ```text
/// AwaitingScriptedAnswer(0) ─► AwaitingScriptedAnswer(i+1) ─► OpenConversation
///            │                          ▲                          │
///            │                          └──────── re-ask ──────────┤
///            └──────────────────────► Completed ◄──────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum OnboardingPhase {
    /// Waiting for the answer to the scripted question at `index`.
    AwaitingScriptedAnswer { index: usize },
    /// Script exhausted or bypassed; free-form turns.
    OpenConversation,
    Completed,
}

impl OnboardingPhase {
    pub fn initial() -> Self {
        Self::AwaitingScriptedAnswer { index: 0 }
    }

    /// The scripted question index being awaited, if any.
    pub fn awaiting_index(&self) -> Option<usize> {
        match self {
            Self::AwaitingScriptedAnswer { index } => Some(*index),
            _ => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::OpenConversation)
    }
}

impl StateMachine for OnboardingPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use OnboardingPhase::*;
        match (self, target) {
            (AwaitingScriptedAnswer { index: from }, AwaitingScriptedAnswer { index: to }) => {
                from != to
            }
            (AwaitingScriptedAnswer { .. }, OpenConversation) => true,
            (OpenConversation, AwaitingScriptedAnswer { .. }) => true,
            (AwaitingScriptedAnswer { .. } | OpenConversation, Completed) => true,
            _ => false,
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for OnboardingPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AwaitingScriptedAnswer { index } => write!(f, "awaiting_scripted_answer({index})"),
            Self::OpenConversation => f.write_str("open_conversation"),
            Self::Completed => f.write_str("completed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_first_question() {
        assert_eq!(OnboardingPhase::initial().awaiting_index(), Some(0));
    }

    #[test]
    fn scripted_can_advance_open_or_complete() {
        let phase = OnboardingPhase::AwaitingScriptedAnswer { index: 2 };
        assert!(phase.can_transition_to(&OnboardingPhase::AwaitingScriptedAnswer { index: 3 }));
        assert!(phase.can_transition_to(&OnboardingPhase::OpenConversation));
        assert!(phase.can_transition_to(&OnboardingPhase::Completed));
        assert!(!phase.can_transition_to(&phase));
    }

    #[test]
    fn open_conversation_can_reask() {
        let phase = OnboardingPhase::OpenConversation;
        assert!(phase.can_transition_to(&OnboardingPhase::AwaitingScriptedAnswer { index: 0 }));
        assert!(!phase.can_transition_to(&OnboardingPhase::OpenConversation));
    }

    #[test]
    fn completed_is_terminal() {
        let phase = OnboardingPhase::Completed;
        assert!(phase.is_terminal());
        assert!(phase.transition_to(OnboardingPhase::OpenConversation).is_err());
        assert!(phase.transition_to(OnboardingPhase::initial()).is_err());
    }

    #[test]
    fn serializes_with_phase_tag() {
        let json = serde_json::to_value(OnboardingPhase::AwaitingScriptedAnswer { index: 1 }).unwrap();
        assert_eq!(json["phase"], "awaiting_scripted_answer");
        assert_eq!(json["index"], 1);
    }
}
