//! Regex-based extraction of name, age and location from free text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::field::MandatoryField;

static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:my name is|i am|i'm|call me)\s+(\w+)").expect("valid name pattern")
});

static AGE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:i am|i'm|my age is)\s+(\d+)(?:\s+years old)?")
        .expect("valid age pattern")
});

static AGE_YEARS_OLD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d+)\s+years old").expect("valid age pattern")
});

static LOCATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:i live in|i'm from|i am from|from)\s+(\w+)")
        .expect("valid location pattern")
});

/// Ages outside this open interval are discarded.
const MIN_AGE_EXCLUSIVE: u8 = 0;
const MAX_AGE_EXCLUSIVE: u8 = 18;

/// Words that follow "I am"/"I'm" but are never names.
const NOT_NAMES: &[&str] = &["from", "a", "an", "the", "not", "so", "very", "really", "in", "living"];

/// Everything found in one utterance. Each field is independent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedEntities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ExtractedEntities {
    /// Every mandatory field that matched, in asking order.
    pub fn fields(&self) -> Vec<MandatoryField> {
        MandatoryField::ALL
            .into_iter()
            .filter(|f| self.has(*f))
            .collect()
    }

    pub fn has(&self, field: MandatoryField) -> bool {
        match field {
            MandatoryField::Name => self.name.is_some(),
            MandatoryField::Age => self.age.is_some(),
            MandatoryField::Location => self.location.is_some(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.location.is_none()
    }
}

/// Stateless entity extractor. Misses are silent.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityExtractor;

impl EntityExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, text: &str) -> ExtractedEntities {
        ExtractedEntities {
            name: self.extract_name(text),
            age: self.extract_age(text),
            location: self.extract_location(text),
        }
    }

    pub fn extract_name(&self, text: &str) -> Option<String> {
        NAME_PATTERN
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .find(|word| is_plausible_name(word))
            .map(capitalize)
    }

    pub fn extract_age(&self, text: &str) -> Option<u8> {
        let raw = AGE_PATTERN
            .captures(text)
            .or_else(|| AGE_YEARS_OLD_PATTERN.captures(text))
            .and_then(|caps| caps.get(1))?;
        parse_age(raw.as_str())
    }

    pub fn extract_location(&self, text: &str) -> Option<String> {
        LOCATION_PATTERN
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| capitalize(m.as_str()))
    }
}

/// Parses an age and keeps it only inside the accepted range.
pub fn parse_age(digits: &str) -> Option<u8> {
    digits
        .parse::<u8>()
        .ok()
        .filter(|age| *age > MIN_AGE_EXCLUSIVE && *age < MAX_AGE_EXCLUSIVE)
}

/// First integer in `text` that is a valid age.
pub fn first_valid_age(text: &str) -> Option<u8> {
    text.split(|c: char| !c.is_ascii_digit())
        .filter(|chunk| !chunk.is_empty())
        .find_map(parse_age)
}

fn is_plausible_name(word: &str) -> bool {
    !word.chars().all(|c| c.is_ascii_digit())
        && !NOT_NAMES.contains(&word.to_lowercase().as_str())
}

/// Lowercases a word and upper-cases its first letter.
pub fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
