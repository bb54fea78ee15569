//! Game session: one deck, its hints, and the answer attempt for the current card.
//!
//! Every card or deck change resets the answer session before returning, so a
//! following `submit` always sees a fresh attempt.

use crate::deck::DeckManager;
use crate::error::{DeckError, ParseError};
use crate::evaluator::AnswerSession;
use crate::hints::HintIndex;
use crate::types::{Card, SessionView, SubmitOutcome};

const STARTER_DECK: &str = include_str!("../data/starter_deck.json");
const STARTER_DECK_NAME: &str = "Spring2024Maine";

/// Cards bundled with the crate, in file order.
pub fn starter_cards() -> Result<Vec<Card>, ParseError> {
    Ok(serde_json::from_str(STARTER_DECK)?)
}

/// Display name for a deck file: the file name without its `.csv` suffix.
pub fn deck_display_name(filename: &str) -> &str {
    filename.strip_suffix(".csv").unwrap_or(filename)
}

#[derive(Debug, Default)]
pub struct GameSession {
    deck: DeckManager,
    hints: HintIndex,
    answer: AnswerSession,
    deck_name: String,
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session whose shuffles are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            deck: DeckManager::with_seed(seed),
            ..Self::default()
        }
    }

    /// A session already holding the bundled starter deck.
    pub fn starter() -> Result<Self, ParseError> {
        let mut session = Self::new();
        let cards = starter_cards()?;
        // The bundled deck is never empty; an empty one just leaves the session idle.
        if session.load_deck(STARTER_DECK_NAME, &cards).is_err() {
            tracing::warn!("bundled starter deck is empty");
        }
        Ok(session)
    }

    /// Replace the deck with cards fetched from a deck source.
    ///
    /// On `EmptyLoad` nothing changes: deck, hints, name and answer all stay.
    pub fn load_deck(&mut self, filename: &str, cards: &[Card]) -> Result<(), DeckError> {
        self.replace_cards(cards)?;
        self.deck_name = deck_display_name(filename).to_string();
        tracing::info!(deck = %self.deck_name, cards = self.deck.len(), "deck loaded");
        Ok(())
    }

    /// Replace the deck with records parsed from a local upload.
    pub fn import_records(&mut self, filename: &str, cards: &[Card]) -> Result<(), DeckError> {
        self.replace_cards(cards)?;
        self.deck_name = deck_display_name(filename).to_string();
        tracing::info!(deck = %self.deck_name, cards = self.deck.len(), "deck imported");
        Ok(())
    }

    fn replace_cards(&mut self, cards: &[Card]) -> Result<(), DeckError> {
        self.deck.load(cards)?;
        self.hints.rebuild(self.deck.cards());
        self.hints.hide();
        self.answer.reset();
        Ok(())
    }

    pub fn next_card(&mut self) -> Option<&Card> {
        self.answer.reset();
        self.deck.advance()
    }

    /// Reshuffle the same cards and start over. Hints are not rebuilt.
    pub fn restart(&mut self) -> &[Card] {
        self.answer.reset();
        self.deck.restart()
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.answer.set_draft(text);
    }

    /// Submit the stored draft.
    pub fn submit(&mut self) -> SubmitOutcome {
        self.answer.submit(self.deck.current(), None)
    }

    /// Submit a hint as if it had been typed verbatim.
    pub fn select_hint(&mut self, hint: &str) -> SubmitOutcome {
        self.answer.set_draft(hint);
        self.answer.submit(self.deck.current(), Some(hint))
    }

    /// Submit the hint at a displayed position, if there is one.
    pub fn select_hint_at(&mut self, index: usize) -> Option<SubmitOutcome> {
        let hint = self.hints.get(index)?.to_string();
        Some(self.select_hint(&hint))
    }

    pub fn toggle_hints(&mut self) -> bool {
        self.hints.toggle_visibility()
    }

    /// Name to pronounce, once the current attempt has unlocked it.
    pub fn pronunciation_target(&self) -> Option<&str> {
        if !self.answer.pronunciation_unlocked() {
            return None;
        }
        self.deck.current().map(|card| card.scientific_name.as_str())
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.deck.current()
    }

    pub fn hints(&self) -> &[String] {
        self.hints.hints()
    }

    pub fn hints_visible(&self) -> bool {
        self.hints.is_visible()
    }

    pub fn answer(&self) -> &AnswerSession {
        &self.answer
    }

    pub fn deck_name(&self) -> &str {
        &self.deck_name
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            deck_name: self.deck_name.clone(),
            position: self.deck.position(),
            deck_len: self.deck.len(),
            current_card: self.deck.current().cloned(),
            hints: self.hints.hints().to_vec(),
            hints_visible: self.hints.is_visible(),
            draft_answer: self.answer.draft().to_string(),
            feedback: self.answer.feedback().to_string(),
            attempt_count: self.answer.attempts(),
            answer_state: self.answer.state(),
            pronunciation_unlocked: self.answer.pronunciation_unlocked(),
        }
    }
}
