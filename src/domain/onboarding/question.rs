//! The onboarding question script.
//!
//! A fixed, ordered list of questions. Order defines the default progression;
//! the first three questions each collect one mandatory field.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use super::field::MandatoryField;
use super::personality::TraitDimension;
use crate::domain::foundation::ValidationError;

/// How the user is expected to answer a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseModality {
    Text,
    Voice,
    MultipleChoice,
}

/// A single scripted question with its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingQuestion {
    pub id: String,
    pub text: String,
    pub modality: ResponseModality,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_response_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_response_time_secs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapped_trait: Option<TraitDimension>,
    /// The mandatory field this question gathers, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collects: Option<MandatoryField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_prompt: Option<String>,
    #[serde(default)]
    pub follow_up: bool,
}

impl OnboardingQuestion {
    /// Creates a voice question with no extra metadata.
    pub fn voice(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            modality: ResponseModality::Voice,
            options: None,
            min_response_length: None,
            max_response_time_secs: None,
            mapped_trait: None,
            collects: None,
            audio_prompt: None,
            follow_up: false,
        }
    }

    /// Creates a multiple-choice question.
    pub fn multiple_choice<I, S>(id: impl Into<String>, text: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            modality: ResponseModality::MultipleChoice,
            options: Some(options.into_iter().map(Into::into).collect()),
            ..Self::voice(id, text)
        }
    }

    pub fn with_min_length(mut self, chars: usize) -> Self {
        self.min_response_length = Some(chars);
        self
    }

    pub fn with_max_time(mut self, secs: u32) -> Self {
        self.max_response_time_secs = Some(secs);
        self
    }

    pub fn with_trait(mut self, dimension: TraitDimension) -> Self {
        self.mapped_trait = Some(dimension);
        self
    }

    pub fn collecting(mut self, field: MandatoryField) -> Self {
        self.collects = Some(field);
        self
    }

    pub fn with_audio_prompt(mut self, asset: impl Into<String>) -> Self {
        self.audio_prompt = Some(asset.into());
        self
    }

    pub fn with_follow_up(mut self) -> Self {
        self.follow_up = true;
        self
    }

    /// Returns true if the response is at least `min_response_length` characters.
    pub fn meets_min_length(&self, response: &str) -> bool {
        self.min_response_length
            .map_or(true, |min| response.trim().chars().count() >= min)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::empty_field("question.id"));
        }
        if self.text.trim().is_empty() {
            return Err(ValidationError::empty_field(format!("{}.text", self.id)));
        }
        let has_options = self.options.as_ref().is_some_and(|o| !o.is_empty());
        match (self.modality, has_options) {
            (ResponseModality::MultipleChoice, false) => Err(ValidationError::invalid_format(
                format!("{}.options", self.id),
                "multiple-choice questions need at least one option",
            )),
            (ResponseModality::Text | ResponseModality::Voice, _) if self.options.is_some() => {
                Err(ValidationError::invalid_format(
                    format!("{}.options", self.id),
                    "only multiple-choice questions carry options",
                ))
            }
            _ => Ok(()),
        }
    }
}

/// An ordered, validated sequence of onboarding questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionScript {
    questions: Vec<OnboardingQuestion>,
}

static STANDARD_SCRIPT: Lazy<Arc<QuestionScript>> = Lazy::new(|| {
    Arc::new(QuestionScript {
        questions: standard_questions(),
    })
});

fn standard_questions() -> Vec<OnboardingQuestion> {
    vec![
        OnboardingQuestion::voice(
            "q1",
            "Hey there! I'm excited to help you set up your profile. What's your name?",
        )
        .with_audio_prompt("intro_name.mp3")
        .with_min_length(2)
        .with_max_time(30)
        .collecting(MandatoryField::Name),
        OnboardingQuestion::voice("q2", "Nice to meet you! How old are you?")
            .with_max_time(20)
            .with_follow_up()
            .collecting(MandatoryField::Age),
        OnboardingQuestion::voice("q3", "Where are you from?")
            .with_max_time(30)
            .collecting(MandatoryField::Location),
        OnboardingQuestion::voice(
            "q4",
            "What do you like to do for fun? Tell me a bit about your interests.",
        )
        .with_min_length(10)
        .with_max_time(60)
        .with_trait(TraitDimension::Openness),
        OnboardingQuestion::voice(
            "q5",
            "If you could travel anywhere right now, where would you go and why?",
        )
        .with_min_length(15)
        .with_max_time(60)
        .with_trait(TraitDimension::Extraversion),
        OnboardingQuestion::multiple_choice(
            "q6",
            "Do you prefer quiet nights in or going out with friends?",
            [
                "Quiet nights in",
                "Going out with friends",
                "It depends on my mood",
                "A mix of both",
            ],
        )
        .with_trait(TraitDimension::Extraversion),
        OnboardingQuestion::voice("q7", "How would your friends describe your personality?")
            .with_min_length(10)
            .with_max_time(60)
            .with_trait(TraitDimension::Agreeableness),
    ]
}

impl QuestionScript {
    /// Builds a script, rejecting empty scripts, duplicate ids and malformed questions.
    pub fn new(questions: Vec<OnboardingQuestion>) -> Result<Self, ValidationError> {
        if questions.is_empty() {
            return Err(ValidationError::empty_field("questions"));
        }
        let mut seen = HashSet::new();
        for question in &questions {
            question.validate()?;
            if !seen.insert(question.id.as_str()) {
                return Err(ValidationError::invalid_format(
                    "questions",
                    format!("duplicate question id '{}'", question.id),
                ));
            }
        }
        Ok(Self { questions })
    }

    /// The seven-question script the app ships with.
    pub fn standard() -> Arc<QuestionScript> {
        Arc::clone(&STANDARD_SCRIPT)
    }

    /// The first question asked in every session.
    pub fn initial(&self) -> &OnboardingQuestion {
        &self.questions[0]
    }

    pub fn get(&self, index: usize) -> Option<&OnboardingQuestion> {
        self.questions.get(index)
    }

    /// Index of the question following `index`, if any.
    pub fn next_index(&self, index: usize) -> Option<usize> {
        let next = index + 1;
        (next < self.questions.len()).then_some(next)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.questions.iter().position(|q| q.id == id)
    }

    /// Index of the question that collects `field`.
    pub fn index_collecting(&self, field: MandatoryField) -> Option<usize> {
        self.questions.iter().position(|q| q.collects == Some(field))
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[OnboardingQuestion] {
        &self.questions
    }
}
