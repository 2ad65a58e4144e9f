//! Local templated replies used when no text-completion provider answers.

use rand::seq::IndexedRandom;
use rand::Rng;
use std::time::Duration;

use super::extractor::ExtractedEntities;
use super::field::MandatoryField;

const ACKNOWLEDGMENTS: &[&str] = &[
    "Great!",
    "Awesome!",
    "That's interesting!",
    "I love that!",
    "Thanks for sharing!",
];

const GENERIC_REPLIES: &[&str] = &[
    "That's interesting! Tell me more about yourself.",
    "I'd love to hear more. What about where you're from?",
    "Cool! By the way, how old are you?",
    "Thanks for sharing. I don't think I caught your name?",
    "Interesting! What kinds of things do you enjoy doing for fun?",
    "I'd love to know more about your interests and hobbies.",
];

/// Instruction sent with every generation request.
pub const SYSTEM_PROMPT: &str = "You are a friendly assistant helping onboard teenagers to a social app called Sparks Fly. Keep responses conversational, age-appropriate, and helpful.";

/// Remaining time below which the prompt asks the model to wrap up.
const HURRY_THRESHOLD: Duration = Duration::from_secs(60);

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, choices: &'a [&'a str]) -> &'a str {
    choices.choose(rng).copied().unwrap_or_default()
}

/// Reply to a scripted answer.
///
/// The first question gets a personal greeting when a name is known.
pub fn scripted_acknowledgment<R: Rng + ?Sized>(
    rng: &mut R,
    question_index: usize,
    name: Option<&str>,
) -> String {
    let ack = pick(rng, ACKNOWLEDGMENTS);
    match (question_index, name) {
        (0, Some(name)) => format!("{ack} Nice to meet you, {name}!"),
        _ => format!("{ack} I'm getting to know you better."),
    }
}

/// The follow-up prompt that steers toward the first missing field.
pub fn next_prompt(missing: &[MandatoryField]) -> &'static str {
    match missing.first() {
        Some(MandatoryField::Name) => "I don't think I caught your name yet. What should I call you?",
        Some(MandatoryField::Age) => "How old are you?",
        Some(MandatoryField::Location) => "Where are you from?",
        None => "What kinds of things do you enjoy doing?",
    }
}

/// Reply to an open-conversation utterance.
///
/// Reacts to the most specific thing extracted, otherwise picks a generic line.
pub fn conversational_reply<R: Rng + ?Sized>(
    rng: &mut R,
    extracted: &ExtractedEntities,
    missing: &[MandatoryField],
) -> String {
    let prompt = next_prompt(missing);
    if let Some(name) = &extracted.name {
        format!("Great to meet you, {name}! {prompt}")
    } else if let Some(age) = extracted.age {
        format!("{age} is a great age! {prompt}")
    } else if let Some(location) = &extracted.location {
        format!("{location} sounds like a cool place! {prompt}")
    } else {
        pick(rng, GENERIC_REPLIES).to_string()
    }
}

/// Builds the user prompt for a generation request.
pub fn generation_prompt(
    question: &str,
    utterance: &str,
    missing: &[MandatoryField],
    remaining: Duration,
) -> String {
    let mut prompt = String::new();
    if question.is_empty() {
        prompt.push_str(&format!("The user said: \"{utterance}\".\n"));
    } else {
        prompt.push_str(&format!(
            "You asked: \"{question}\"\nThe user answered: \"{utterance}\".\n"
        ));
    }

    if missing.is_empty() {
        prompt.push_str("All required profile details are collected. Ask about their interests.\n");
    } else {
        let labels: Vec<&str> = missing.iter().map(|f| f.label()).collect();
        prompt.push_str(&format!(
            "Still missing from their profile: {}. Gently ask for the {}.\n",
            labels.join(", "),
            labels[0]
        ));
    }

    let secs = remaining.as_secs();
    if remaining < HURRY_THRESHOLD {
        prompt.push_str(&format!(
            "Only {secs} seconds remain, so keep it very short and wrap up soon.\n"
        ));
    } else {
        prompt.push_str(&format!("About {secs} seconds remain in onboarding.\n"));
    }

    prompt.push_str("Reply in one or two short sentences.");
    prompt
}
