//! Core of the mushroom name quiz, shared by every front end.
//!
//! Provides:
//! - Deck manager with an unbiased shuffle and cyclic iteration
//! - Hint index (distinct, sorted scientific names of the active deck)
//! - Answer evaluator with three-strike reveal and pronunciation unlock
//! - Game session tying the three together
//! - CSV parser for locally uploaded decks

pub mod deck;
pub mod error;
pub mod evaluator;
pub mod hints;
pub mod matching;
pub mod parser;
pub mod session;
pub mod types;

pub use deck::{shuffle, DeckManager};
pub use error::{DeckError, ParseError, Result};
pub use evaluator::AnswerSession;
pub use hints::{distinct_names, HintIndex};
pub use matching::{answers_match, hyperlink, normalize, MAX_ATTEMPTS};
pub use parser::parse_cards_csv;
pub use session::{deck_display_name, starter_cards, GameSession};
pub use types::{AnswerState, Card, SessionView, SubmitOutcome};
