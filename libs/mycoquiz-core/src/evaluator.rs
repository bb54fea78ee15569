//! Answer evaluator: per-card attempt tracking.
//!
//! The session never holds deck state. The current card is passed in on every
//! `submit`, and the caller resets the session whenever that card changes.
//!
//! ```text
//! Fresh --wrong--> Incorrect(1) --wrong--> Incorrect(2) --wrong--> Revealed
//!   \________________\___________________\____correct____________/
//! ```

use crate::matching::{
    answers_match, reveal_feedback, success_feedback, MAX_ATTEMPTS, NO_CARD_FEEDBACK,
    TRY_AGAIN_FEEDBACK,
};
use crate::types::{AnswerState, Card, SubmitOutcome};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AnswerSession {
    draft: String,
    attempts: u32,
    feedback: String,
    pronunciation_unlocked: bool,
    solved: bool,
}

impl AnswerSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the typed-but-not-submitted answer.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Evaluate a guess against `card`.
    ///
    /// `answer` overrides the stored draft when given (the hint path). With no
    /// card the session is left untouched and a "no card" outcome is returned.
    pub fn submit(&mut self, card: Option<&Card>, answer: Option<&str>) -> SubmitOutcome {
        let Some(card) = card else {
            return SubmitOutcome {
                correct: false,
                feedback: NO_CARD_FEEDBACK.to_string(),
                attempt_count: self.attempts,
                pronunciation_unlocked: self.pronunciation_unlocked,
            };
        };

        let input = answer.unwrap_or(&self.draft);
        let correct = answers_match(input, &card.scientific_name);

        if correct {
            self.feedback = success_feedback(card);
            self.pronunciation_unlocked = true;
            self.solved = true;
        } else {
            self.attempts = self.attempts.saturating_add(1);
            if self.attempts >= MAX_ATTEMPTS {
                self.feedback = reveal_feedback(card);
                self.pronunciation_unlocked = true;
            } else {
                self.feedback = TRY_AGAIN_FEEDBACK.to_string();
            }
        }

        tracing::debug!(correct, attempts = self.attempts, "answer submitted");

        SubmitOutcome {
            correct,
            feedback: self.feedback.clone(),
            attempt_count: self.attempts,
            pronunciation_unlocked: self.pronunciation_unlocked,
        }
    }

    /// Back to a fresh attempt. Must run on every card or deck change.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn state(&self) -> AnswerState {
        if self.solved || self.attempts >= MAX_ATTEMPTS {
            AnswerState::Revealed
        } else if self.attempts == 0 {
            AnswerState::Fresh
        } else {
            AnswerState::Incorrect(self.attempts)
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    pub fn pronunciation_unlocked(&self) -> bool {
        self.pronunciation_unlocked
    }
}
