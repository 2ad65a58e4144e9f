//! What the engine hands back to the presentation layer after each turn.

use serde::{Deserialize, Serialize};

use super::personality::PersonalityTraits;
use super::question::OnboardingQuestion;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AIResponse {
    /// Text to show or speak.
    pub text: String,
    /// Scripted question to ask next, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_question: Option<OnboardingQuestion>,
    pub personality_insight: PersonalityTraits,
    /// Ordered, no duplicates.
    pub suggested_interests: Vec<String>,
}
