//! CSV parser for locally uploaded decks.
//!
//! # Format
//! ```text
//! scientific_name,common_name,image_url,taxa_url,attribution
//! Flammulina velutipes,Velvet Foot,https://…/medium.jpg,https://www.inaturalist.org/taxa/67594,"(c) someone, all rights reserved"
//! ```
//!
//! The header names the columns, in any order. Only `scientific_name` is
//! required. Quoted fields may contain commas, newlines and doubled quotes.

use crate::error::{ParseError, Result};
use crate::types::Card;

const SCIENTIFIC_NAME: &str = "scientific_name";

/// Parse CSV content into cards.
///
/// Rows with a blank scientific name are skipped.
pub fn parse_cards_csv(content: &str) -> Result<Vec<Card>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    if content.trim().is_empty() {
        return Ok(vec![]);
    }

    let mut parser = Parser::new();
    for c in content.chars() {
        parser.process_char(c);
    }
    let mut records = parser.finalize()?.into_iter();

    let Some(header) = records.next() else {
        return Ok(vec![]);
    };
    let columns = Columns::from_header(&header)?;

    Ok(records.filter_map(|record| columns.build(&record)).collect())
}

/// Positions of the known columns within a record.
struct Columns {
    scientific_name: usize,
    common_name: Option<usize>,
    image_url: Option<usize>,
    attribution: Option<usize>,
    taxa_url: Option<usize>,
}

impl Columns {
    fn from_header(header: &[String]) -> Result<Self> {
        let find = |name: &str| {
            header
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };

        Ok(Self {
            scientific_name: find(SCIENTIFIC_NAME).ok_or(ParseError::MissingColumn {
                column: SCIENTIFIC_NAME,
            })?,
            common_name: find("common_name"),
            image_url: find("image_url"),
            attribution: find("attribution"),
            taxa_url: find("taxa_url"),
        })
    }

    fn build(&self, record: &[String]) -> Option<Card> {
        let field = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };

        let scientific_name = field(Some(self.scientific_name));
        if scientific_name.is_empty() {
            return None;
        }

        Some(Card {
            scientific_name,
            common_name: field(self.common_name),
            image_url: field(self.image_url),
            attribution: field(self.attribution),
            taxa_url: field(self.taxa_url),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    FieldStart,
    Unquoted,
    Quoted,
    /// Just read a `"` inside a quoted field: either a doubled quote or the end.
    QuoteInQuoted,
}

struct Parser {
    records: Vec<Vec<String>>,
    record: Vec<String>,
    field: String,
    state: State,
    line: usize,
    quote_line: usize,
}

impl Parser {
    fn new() -> Self {
        Self {
            records: Vec::new(),
            record: Vec::new(),
            field: String::new(),
            state: State::FieldStart,
            line: 1,
            quote_line: 1,
        }
    }

    fn process_char(&mut self, c: char) {
        match (self.state, c) {
            (State::Quoted, '"') => self.state = State::QuoteInQuoted,
            (State::Quoted, c) => {
                if c == '\n' {
                    self.line += 1;
                }
                self.field.push(c);
            }
            (State::QuoteInQuoted, '"') => {
                self.field.push('"');
                self.state = State::Quoted;
            }
            (_, ',') => self.end_field(),
            (_, '\n') => {
                self.end_record();
                self.line += 1;
            }
            (_, '\r') => {}
            (State::FieldStart, '"') => {
                self.state = State::Quoted;
                self.quote_line = self.line;
            }
            (_, c) => {
                self.field.push(c);
                self.state = State::Unquoted;
            }
        }
    }

    fn end_field(&mut self) {
        self.record.push(std::mem::take(&mut self.field));
        self.state = State::FieldStart;
    }

    fn end_record(&mut self) {
        self.end_field();
        let record = std::mem::take(&mut self.record);
        let blank = record.len() == 1 && record[0].trim().is_empty();
        if !blank {
            self.records.push(record);
        }
    }

    fn finalize(mut self) -> Result<Vec<Vec<String>>> {
        if self.state == State::Quoted {
            return Err(ParseError::UnterminatedQuote {
                line: self.quote_line,
            });
        }
        if !self.record.is_empty() || !self.field.is_empty() {
            self.end_record();
        }
        Ok(self.records)
    }
}
