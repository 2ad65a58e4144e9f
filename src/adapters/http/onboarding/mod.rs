//! HTTP adapter for onboarding endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CompleteOnboardingRequest, CompleteOnboardingResponse, ErrorResponse,
    StartOnboardingRequest, StartOnboardingResponse, SubmitUtteranceRequest, UtteranceResponse,
};
pub use handlers::OnboardingHandlers;
pub use routes::onboarding_routes;
