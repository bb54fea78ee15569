//! Terminal orchestrator: turns input lines into session operations.

use std::path::Path;

use mycoquiz_core::{parse_cards_csv, DeckError, GameSession};

use crate::backend::{DeckSource, PronunciationService};
use crate::error::SourceError;
use crate::render::{render_hints, render_markup, render_view};

pub const HELP: &str = "\
Type a scientific name and press Enter to answer.
Commands:
  :next            next card
  :restart         reshuffle this deck and start over
  :hints           show or hide the list of names
  :hint N          answer with hint number N
  :decks [DIR]     list deck files on the server
  :load FILE [DIR] load a deck file from the server (quote names with spaces)
  :import PATH     load a local CSV file
  :upload PATH     store a local CSV file on the server
  :say             pronounce the name (after answering)
  :card            show the current card again
  :help            this text
  :quit            leave";

/// Server directory that uploads land in.
pub const UPLOAD_DIRECTORY: &str = "uploads";

const NO_CARDS_FOUND: &str = "No cards found.";
const SERVER_WAKING: &str = "Server is slowly waking up. Please try again in a minute.";
const SERVER_OFFLINE: &str = "Server is currently offline. Please try again in a few minutes.";
const PRONUNCIATION_FAILED: &str = "Unable to fetch pronunciation. Please try again.";
const PRONUNCIATION_LOCKED: &str = "Answer the card first (or miss it three times) to hear it.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Answer(String),
    Next,
    Restart,
    ToggleHints,
    /// One-based, as displayed.
    Hint(usize),
    Decks(Option<String>),
    Load { file: String, directory: Option<String> },
    Import(String),
    Upload(String),
    Say,
    Card,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        let Some(rest) = trimmed.strip_prefix(':') else {
            return Self::Answer(line.to_string());
        };

        let words = split_args(rest);
        let (name, args) = match words.split_first() {
            Some((name, args)) => (name.as_str(), args),
            None => ("", &[][..]),
        };

        match (name, args) {
            ("next" | "n", []) => Self::Next,
            ("restart", []) => Self::Restart,
            ("hints", []) => Self::ToggleHints,
            ("hint", [n]) => match n.parse::<usize>() {
                Ok(n) if n > 0 => Self::Hint(n),
                _ => Self::Unknown(trimmed.to_string()),
            },
            ("decks", []) => Self::Decks(None),
            ("decks", [dir]) => Self::Decks(Some(dir.clone())),
            ("load", [file]) => Self::Load {
                file: file.clone(),
                directory: None,
            },
            ("load", [file, dir]) => Self::Load {
                file: file.clone(),
                directory: Some(dir.clone()),
            },
            // Paths may contain spaces, so take everything after the command.
            ("import", [_, ..]) => Self::Import(rest_of_line(rest, name)),
            ("upload", [_, ..]) => Self::Upload(rest_of_line(rest, name)),
            ("say", []) => Self::Say,
            ("card", []) => Self::Card,
            ("help" | "h" | "?", []) => Self::Help,
            ("quit" | "q" | "exit", []) => Self::Quit,
            _ => Self::Unknown(trimmed.to_string()),
        }
    }
}

/// Split on whitespace, keeping `"double quoted"` runs together as one argument.
fn split_args(s: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut started = false;

    for c in s.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                started = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if started {
                    args.push(std::mem::take(&mut current));
                    started = false;
                }
            }
            c => {
                current.push(c);
                started = true;
            }
        }
    }
    if started {
        args.push(current);
    }
    args
}

/// Everything after the command word, without one pair of surrounding quotes.
fn rest_of_line(rest: &str, name: &str) -> String {
    let tail = rest.trim_start().strip_prefix(name).unwrap_or_default().trim();
    tail.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(tail)
        .to_string()
}

/// Whether the loop should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Quiz {
    session: GameSession,
    decks: Box<dyn DeckSource>,
    voice: Box<dyn PronunciationService>,
    default_directory: String,
}

impl Quiz {
    pub fn new(
        session: GameSession,
        decks: Box<dyn DeckSource>,
        voice: Box<dyn PronunciationService>,
        default_directory: impl Into<String>,
    ) -> Self {
        Self {
            session,
            decks,
            voice,
            default_directory: default_directory.into(),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Current deck and card, as shown before each prompt.
    pub fn screen(&self) -> String {
        render_view(&self.session.view())
    }

    /// Run one command, returning text for the user.
    pub async fn handle(&mut self, command: Command) -> (Flow, String) {
        let output = match command {
            Command::Answer(text) => {
                self.session.set_draft(text);
                render_markup(&self.session.submit().feedback)
            }
            Command::Next => {
                self.session.next_card();
                self.screen()
            }
            Command::Restart => {
                self.session.restart();
                self.screen()
            }
            Command::ToggleHints => {
                if self.session.toggle_hints() {
                    render_hints(self.session.hints())
                } else {
                    "Hints hidden.".to_string()
                }
            }
            Command::Hint(n) => match n.checked_sub(1).and_then(|i| self.session.select_hint_at(i)) {
                Some(outcome) => render_markup(&outcome.feedback),
                None => format!("There is no hint number {n}."),
            },
            Command::Decks(directory) => self.list_decks(directory).await,
            Command::Load { file, directory } => self.load(&file, directory).await,
            Command::Import(path) => self.import(Path::new(&path)).await,
            Command::Upload(path) => self.upload(Path::new(&path)).await,
            Command::Say => self.say().await,
            Command::Card => self.screen(),
            Command::Help => HELP.to_string(),
            Command::Quit => return (Flow::Quit, "Goodbye.".to_string()),
            Command::Empty => String::new(),
            Command::Unknown(text) => format!("Unknown command: {text} (try :help)"),
        };
        (Flow::Continue, output)
    }

    async fn list_decks(&self, directory: Option<String>) -> String {
        let directory = directory.unwrap_or_else(|| self.default_directory.clone());
        match self.decks.list_files(&directory).await {
            Ok(files) if files.is_empty() => format!("No deck files in {directory}."),
            Ok(files) => files
                .iter()
                .map(|f| format!("  {f}"))
                .collect::<Vec<_>>()
                .join("\n"),
            Err(e) => {
                tracing::error!(error = %e, directory = %directory, "listing decks failed");
                format!("Could not list decks: {e}")
            }
        }
    }

    async fn load(&mut self, file: &str, directory: Option<String>) -> String {
        let directory = directory.unwrap_or_else(|| self.default_directory.clone());
        let cards = match self.decks.fetch_cards(file, &directory).await {
            Ok(cards) => cards,
            Err(e) => {
                tracing::error!(error = %e, file, directory = %directory, "loading deck failed");
                return format!("Could not load {file}: {e}");
            }
        };
        let result = self.session.load_deck(file, &cards);
        self.install(result)
    }

    async fn import(&mut self, path: &Path) -> String {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) => {
                tracing::error!(error = %e, path = %path.display(), "reading upload failed");
                return format!("Could not read {}: {e}", path.display());
            }
        };
        let cards = match parse_cards_csv(&content) {
            Ok(cards) => cards,
            Err(e) => {
                tracing::error!(error = %e, path = %path.display(), "parsing upload failed");
                return format!("Could not parse {}: {e}", path.display());
            }
        };

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let result = self.session.import_records(&filename, &cards);
        self.install(result)
    }

    async fn upload(&self, path: &Path) -> String {
        match self.decks.upload_file(path, UPLOAD_DIRECTORY).await {
            Ok(filename) => format!("Uploaded {filename}. See :decks {UPLOAD_DIRECTORY}"),
            Err(e) if e.is_network() => {
                tracing::warn!(error = %e, "upload server unreachable");
                SERVER_WAKING.to_string()
            }
            Err(e) => {
                tracing::error!(error = %e, path = %path.display(), "upload failed");
                format!("Could not upload {}: {e}", path.display())
            }
        }
    }

    fn install(&self, result: Result<(), DeckError>) -> String {
        match result {
            Ok(()) => self.screen(),
            Err(DeckError::EmptyLoad) => NO_CARDS_FOUND.to_string(),
        }
    }

    async fn say(&self) -> String {
        let Some(name) = self.session.pronunciation_target() else {
            return PRONUNCIATION_LOCKED.to_string();
        };

        match self.voice.ping().await {
            Ok(true) => {}
            Ok(false) => return SERVER_OFFLINE.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "pronunciation server unreachable");
                return SERVER_OFFLINE.to_string();
            }
        }

        pronunciation_message(name, self.voice.pronounce(name).await)
    }
}

/// User-facing text for a pronunciation lookup result.
pub fn pronunciation_message(name: &str, result: Result<String, SourceError>) -> String {
    match result {
        Ok(text) => format!("{name}: {text}"),
        Err(e) if e.is_network() => SERVER_WAKING.to_string(),
        Err(e) => {
            tracing::warn!(error = %e, name, "pronunciation lookup failed");
            PRONUNCIATION_FAILED.to_string()
        }
    }
}
