//! Personality insight inferred from keyword heuristics.
//!
//! Five Big-Five style scores start at 0.5 and are nudged upward whenever an
//! utterance mentions one of a trait's keywords. The communication style is
//! reclassified from scratch on every utterance.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Starting score for every trait.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Amount a trait grows when one of its keywords is mentioned.
pub const TRAIT_INCREMENT: f64 = 0.05;

/// More than this many words reads as expressive.
const EXPRESSIVE_WORD_COUNT: usize = 25;

/// Average word length above this reads as analytical.
const ANALYTICAL_AVG_WORD_LEN: f64 = 6.0;

/// The five personality dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitDimension {
    Openness,
    Conscientiousness,
    Extraversion,
    Agreeableness,
    Neuroticism,
}

impl TraitDimension {
    pub const ALL: [TraitDimension; 5] = [
        Self::Openness,
        Self::Conscientiousness,
        Self::Extraversion,
        Self::Agreeableness,
        Self::Neuroticism,
    ];

    /// Keywords that signal this trait in free text.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Openness => &[
                "new", "explore", "experience", "art", "idea", "creative", "curious",
            ],
            Self::Conscientiousness => &[
                "plan", "organize", "detail", "careful", "precise", "responsible", "thorough",
            ],
            Self::Extraversion => &[
                "people", "social", "party", "talk", "outgoing", "energetic", "group",
            ],
            Self::Agreeableness => &[
                "help", "kind", "cooperate", "friendly", "compassionate", "supportive",
            ],
            Self::Neuroticism => &["worry", "stress", "anxious", "nervous", "sensitive"],
        }
    }
}

impl fmt::Display for TraitDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Openness => "openness",
            Self::Conscientiousness => "conscientiousness",
            Self::Extraversion => "extraversion",
            Self::Agreeableness => "agreeableness",
            Self::Neuroticism => "neuroticism",
        };
        f.write_str(s)
    }
}

/// How the user tends to communicate, judged per utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommunicationStyle {
    Expressive,
    Analytical,
    Inquisitive,
    Concise,
    #[default]
    Balanced,
}

/// Snapshot of the inferred personality.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersonalityTraits {
    pub openness: f64,
    pub conscientiousness: f64,
    pub extraversion: f64,
    pub agreeableness: f64,
    pub neuroticism: f64,
    pub communication_style: CommunicationStyle,
}

impl Default for PersonalityTraits {
    fn default() -> Self {
        Self {
            openness: NEUTRAL_SCORE,
            conscientiousness: NEUTRAL_SCORE,
            extraversion: NEUTRAL_SCORE,
            agreeableness: NEUTRAL_SCORE,
            neuroticism: NEUTRAL_SCORE,
            communication_style: CommunicationStyle::default(),
        }
    }
}

impl PersonalityTraits {
    /// Returns the score for a dimension.
    pub fn score(&self, dimension: TraitDimension) -> f64 {
        match dimension {
            TraitDimension::Openness => self.openness,
            TraitDimension::Conscientiousness => self.conscientiousness,
            TraitDimension::Extraversion => self.extraversion,
            TraitDimension::Agreeableness => self.agreeableness,
            TraitDimension::Neuroticism => self.neuroticism,
        }
    }

    fn score_mut(&mut self, dimension: TraitDimension) -> &mut f64 {
        match dimension {
            TraitDimension::Openness => &mut self.openness,
            TraitDimension::Conscientiousness => &mut self.conscientiousness,
            TraitDimension::Extraversion => &mut self.extraversion,
            TraitDimension::Agreeableness => &mut self.agreeableness,
            TraitDimension::Neuroticism => &mut self.neuroticism,
        }
    }

    /// Raises a dimension by `amount`, capped at 1.0. Negative amounts are ignored.
    pub fn raise(&mut self, dimension: TraitDimension, amount: f64) {
        let score = self.score_mut(dimension);
        *score = (*score + amount.max(0.0)).min(1.0);
    }
}

/// Updates a running [`PersonalityTraits`] from user utterances.
#[derive(Debug, Clone)]
pub struct PersonalityEstimator {
    increment: f64,
}

impl Default for PersonalityEstimator {
    fn default() -> Self {
        Self {
            increment: TRAIT_INCREMENT,
        }
    }
}

impl PersonalityEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one utterance into the running traits.
    ///
    /// Each dimension grows at most once per call, no matter how many of its
    /// keywords appear. Returns the dimensions that grew.
    pub fn observe(&self, traits: &mut PersonalityTraits, utterance: &str) -> Vec<TraitDimension> {
        let lower = utterance.to_lowercase();
        let mut raised = Vec::new();

        for dimension in TraitDimension::ALL {
            if dimension.keywords().iter().any(|kw| lower.contains(kw)) {
                traits.raise(dimension, self.increment);
                raised.push(dimension);
            }
        }

        traits.communication_style = Self::classify_style(utterance);
        raised
    }

    /// Classifies the communication style of a single utterance.
    ///
    /// Word count wins over average word length, which wins over punctuation.
    pub fn classify_style(utterance: &str) -> CommunicationStyle {
        let word_count = utterance.split_whitespace().count();
        if word_count == 0 {
            return CommunicationStyle::Concise;
        }

        let avg_word_len = utterance.chars().count() as f64 / word_count as f64;

        if word_count > EXPRESSIVE_WORD_COUNT {
            CommunicationStyle::Expressive
        } else if avg_word_len > ANALYTICAL_AVG_WORD_LEN {
            CommunicationStyle::Analytical
        } else if utterance.contains('?') {
            CommunicationStyle::Inquisitive
        } else {
            CommunicationStyle::Concise
        }
    }
}
