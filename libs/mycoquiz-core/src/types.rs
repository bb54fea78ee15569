//! Core types for the quiz.

use serde::{Deserialize, Serialize};

/// A single quiz unit: an image plus the scientific name it shows.
///
/// Cards come from outside the core (bundled data, a remote deck source or a
/// local upload) and are never mutated here, only reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub scientific_name: String,
    #[serde(default)]
    pub common_name: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub attribution: String,
    #[serde(default)]
    pub taxa_url: String,
}

impl Card {
    /// Create a card with only the scientific name set.
    pub fn new(scientific_name: impl Into<String>) -> Self {
        Self {
            scientific_name: scientific_name.into(),
            common_name: String::new(),
            image_url: String::new(),
            attribution: String::new(),
            taxa_url: String::new(),
        }
    }

    pub fn with_common_name(mut self, common_name: impl Into<String>) -> Self {
        self.common_name = common_name.into();
        self
    }

    pub fn with_taxa_url(mut self, taxa_url: impl Into<String>) -> Self {
        self.taxa_url = taxa_url.into();
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = attribution.into();
        self
    }
}

/// Where the current card attempt stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "attempts")]
pub enum AnswerState {
    /// Nothing submitted yet.
    Fresh,
    /// Wrong answers so far, still below the reveal threshold.
    Incorrect(u32),
    /// Answered correctly, or the answer was revealed after too many misses.
    Revealed,
}

impl Default for AnswerState {
    fn default() -> Self {
        Self::Fresh
    }
}

/// Result of evaluating one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOutcome {
    pub correct: bool,
    /// Message for the rendering layer. May embed `<a href=...>` markup.
    pub feedback: String,
    pub attempt_count: u32,
    pub pronunciation_unlocked: bool,
}

/// Read-only snapshot of a game session for a presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    pub deck_name: String,
    pub position: usize,
    pub deck_len: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_card: Option<Card>,
    pub hints: Vec<String>,
    pub hints_visible: bool,
    pub draft_answer: String,
    pub feedback: String,
    pub attempt_count: u32,
    pub answer_state: AnswerState,
    pub pronunciation_unlocked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_deserializes_with_missing_and_extra_fields() {
        let json = r#"{"id": "67594", "scientific_name": "Flammulina velutipes", "taxa_url": "https://www.inaturalist.org/taxa/67594"}"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.scientific_name, "Flammulina velutipes");
        assert_eq!(card.common_name, "");
        assert_eq!(card.taxa_url, "https://www.inaturalist.org/taxa/67594");
    }

    #[test]
    fn answer_state_serializes_tagged() {
        let value = serde_json::to_value(AnswerState::Incorrect(2)).unwrap();
        assert_eq!(value["state"], "incorrect");
        assert_eq!(value["attempts"], 2);
    }
}
