//! Keyword-category interest matching.

/// A topic tag and the keywords that trigger it.
struct InterestCategory {
    label: &'static str,
    keywords: &'static [&'static str],
}

/// Category labels appear in this order in every suggestion.
const CATEGORIES: &[InterestCategory] = &[
    InterestCategory {
        label: "music",
        keywords: &["music", "guitar", "piano", "singing", "concert", "festival"],
    },
    InterestCategory {
        label: "sports",
        keywords: &["sports", "football", "basketball", "soccer", "tennis", "running"],
    },
    InterestCategory {
        label: "art",
        keywords: &["art", "painting", "drawing", "design", "creative"],
    },
    InterestCategory {
        label: "travel",
        keywords: &["travel", "adventure", "explore", "places", "countries"],
    },
    InterestCategory {
        label: "gaming",
        keywords: &["gaming", "video games", "board games", "rpg"],
    },
    InterestCategory {
        label: "reading",
        keywords: &["reading", "books", "literature", "stories"],
    },
    InterestCategory {
        label: "movies",
        keywords: &["movies", "films", "cinema", "tv shows", "series"],
    },
    InterestCategory {
        label: "cooking",
        keywords: &["cooking", "baking", "food", "culinary"],
    },
    InterestCategory {
        label: "technology",
        keywords: &["technology", "programming", "coding", "computers"],
    },
    InterestCategory {
        label: "fashion",
        keywords: &["fashion", "clothing", "style", "design"],
    },
];

/// Suggested when nothing in the utterance matches.
pub const DEFAULT_INTERESTS: [&str; 3] = ["music", "travel", "movies"];

#[derive(Debug, Clone, Copy, Default)]
pub struct InterestSuggester;

impl InterestSuggester {
    pub fn new() -> Self {
        Self
    }

    /// Matching category labels, or the default set when none match.
    pub fn suggest(&self, utterance: &str) -> Vec<String> {
        let matched = self.matched(utterance);
        if matched.is_empty() {
            Self::defaults()
        } else {
            matched
        }
    }

    /// Only the categories the utterance actually mentions.
    pub fn matched(&self, utterance: &str) -> Vec<String> {
        let lower = utterance.to_lowercase();
        CATEGORIES
            .iter()
            .filter(|c| c.keywords.iter().any(|k| lower.contains(k)))
            .map(|c| c.label.to_string())
            .collect()
    }

    pub fn defaults() -> Vec<String> {
        DEFAULT_INTERESTS.iter().map(|s| s.to_string()).collect()
    }
}
