//! Onboarding domain: the conversation engine and its analyzers.
//!
//! The analyzers (`EntityExtractor`, `PersonalityEstimator`,
//! `InterestSuggester`) are pure and synchronous. `OnboardingSession` ties
//! them to the question script, the clock and the phase state machine.

mod clock;
mod errors;
mod extractor;
mod field;
mod history;
mod interests;
mod personality;
mod phase;
mod policy;
mod profile;
mod question;
mod replies;
mod response;
mod session;

pub use clock::{
    ConversationClock, DEFAULT_TIME_LIMIT_SECS, MAX_TIME_LIMIT_SECS, MIN_TIME_LIMIT_SECS,
};
pub use errors::OnboardingError;
pub use extractor::{EntityExtractor, ExtractedEntities};
pub use field::{CollectedFields, MandatoryField};
pub use history::{ConversationHistory, HistoryEntry};
pub use interests::{InterestSuggester, DEFAULT_INTERESTS};
pub use personality::{
    CommunicationStyle, PersonalityEstimator, PersonalityTraits, TraitDimension,
};
pub use phase::OnboardingPhase;
pub use policy::OnboardingPolicy;
pub use profile::{ProfileDraft, UserProfile};
pub use question::{OnboardingQuestion, QuestionScript, ResponseModality};
pub use replies::SYSTEM_PROMPT;
pub use response::AIResponse;
pub use session::{CompletionReason, OnboardingSession, SessionSnapshot, TurnOutcome};
