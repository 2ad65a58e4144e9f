//! Profile values gathered during onboarding and the finished profile.

use serde::{Deserialize, Serialize};

use super::extractor::ExtractedEntities;
use super::field::MandatoryField;
use super::interests::InterestSuggester;
use super::personality::PersonalityTraits;
use crate::domain::foundation::{Timestamp, UserId};

pub const DEFAULT_NAME: &str = "User";
pub const DEFAULT_AGE: u8 = 16;
pub const DEFAULT_LOCATION: &str = "Unknown";
pub const DEFAULT_BIO: &str = "I'm excited to connect with new friends!";
pub const DEFAULT_PROFILE_IMAGE: &str = "/placeholder.svg";

/// Values gathered so far. Later values overwrite earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDraft {
    pub name: Option<String>,
    pub age: Option<u8>,
    pub location: Option<String>,
    /// Ordered, no duplicates.
    pub interests: Vec<String>,
}

impl ProfileDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies whatever the extractor found. Returns the fields that were set.
    pub fn apply(&mut self, entities: &ExtractedEntities) -> Vec<MandatoryField> {
        if let Some(name) = &entities.name {
            self.name = Some(name.clone());
        }
        if let Some(age) = entities.age {
            self.age = Some(age);
        }
        if let Some(location) = &entities.location {
            self.location = Some(location.clone());
        }
        entities.fields()
    }

    pub fn add_interests<I>(&mut self, interests: I)
    where
        I: IntoIterator<Item = String>,
    {
        for interest in interests {
            if !self.interests.contains(&interest) {
                self.interests.push(interest);
            }
        }
    }

    pub fn has(&self, field: MandatoryField) -> bool {
        match field {
            MandatoryField::Name => self.name.is_some(),
            MandatoryField::Age => self.age.is_some(),
            MandatoryField::Location => self.location.is_some(),
        }
    }
}

/// The finished profile handed back at completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub age: u8,
    pub location: String,
    pub bio: String,
    pub interests: Vec<String>,
    pub profile_image: String,
    pub personality: PersonalityTraits,
    pub created_at: Timestamp,
}

impl UserProfile {
    /// Builds a profile, filling anything missing with placeholder defaults.
    pub fn from_draft(draft: ProfileDraft, personality: PersonalityTraits, now: Timestamp) -> Self {
        let interests = if draft.interests.is_empty() {
            InterestSuggester::defaults()
        } else {
            draft.interests
        };

        Self {
            id: UserId::new(),
            name: draft.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
            age: draft.age.unwrap_or(DEFAULT_AGE),
            location: draft.location.unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            bio: DEFAULT_BIO.to_string(),
            interests,
            profile_image: DEFAULT_PROFILE_IMAGE.to_string(),
            personality,
            created_at: now,
        }
    }
}
