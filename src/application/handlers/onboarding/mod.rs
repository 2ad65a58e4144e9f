//! Onboarding command and query handlers.
//!
//! The four handlers back the HTTP surface; `OnboardingRunner` drives a
//! single session over a voice channel for the terminal chat.

mod complete_onboarding;
mod error;
mod get_onboarding_state;
mod listen;
mod response_generator;
mod runner;
mod start_onboarding;
mod submit_utterance;

pub use complete_onboarding::{
    CompleteOnboardingCommand, CompleteOnboardingHandler, CompleteOnboardingResult,
};
pub use error::OnboardingServiceError;
pub use get_onboarding_state::{GetOnboardingStateHandler, GetOnboardingStateQuery};
pub use listen::{listen_for_utterance, MAX_RECORDING, MIN_FINAL_CHARS};
pub use response_generator::ResponseGenerator;
pub use runner::{
    OnboardingRunner, RunOutcome, RunnerError, PROFILE_READY_MESSAGE, TIME_UP_MESSAGE,
};
pub use start_onboarding::{
    StartOnboardingCommand, StartOnboardingHandler, StartOnboardingResult, DEFAULT_ABANDONED_GRACE,
};
pub use submit_utterance::{SubmitUtteranceCommand, SubmitUtteranceHandler, SubmitUtteranceResult};
