//! The quote deck: quotes plus the candidates they belong to.
//!
//! Loaded once at startup, either from a configured JSON file or from the
//! deck compiled into the binary.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use tally_config::QuotesConfig;

use crate::error::QuoteError;
use crate::model::{Candidate, Quote, QuoteId};

const BUNDLED_DECK: &str = include_str!("../data/quotes.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteDeck {
    candidates: Vec<Candidate>,
    quotes: Vec<Quote>,
}

impl QuoteDeck {
    /// Build a deck, checking ids are unique and every candidate exists.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::DuplicateQuote`] or [`QuoteError::UnknownCandidate`].
    pub fn new(candidates: Vec<Candidate>, quotes: Vec<Quote>) -> Result<Self, QuoteError> {
        let deck = Self { candidates, quotes };
        deck.validate()?;
        Ok(deck)
    }

    /// Load the configured deck, or the bundled one when no path is set.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError`] if the file cannot be read, parsed, or validated.
    pub fn load(config: &QuotesConfig) -> Result<Self, QuoteError> {
        if config.has_data_path() {
            Self::from_path(&config.data_path)
        } else {
            Self::bundled()
        }
    }

    /// # Errors
    ///
    /// Returns [`QuoteError`] if the file cannot be read, parsed, or validated.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, QuoteError> {
        let path = path.as_ref();
        let body = std::fs::read_to_string(path)?;
        let deck = Self::from_json(&body)?;
        tracing::debug!(path = %path.display(), quotes = deck.quotes.len(), "loaded quote deck");
        Ok(deck)
    }

    /// # Errors
    ///
    /// Returns [`QuoteError`] if `json` is not a valid deck.
    pub fn from_json(json: &str) -> Result<Self, QuoteError> {
        let deck: Self = serde_json::from_str(json)?;
        deck.validate()?;
        Ok(deck)
    }

    /// # Errors
    ///
    /// Only fails if the compiled-in deck is malformed.
    pub fn bundled() -> Result<Self, QuoteError> {
        Self::from_json(BUNDLED_DECK)
    }

    #[must_use]
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    #[must_use]
    pub fn quote(&self, id: &QuoteId) -> Option<&Quote> {
        self.quotes.iter().find(|q| &q.id == id)
    }

    #[must_use]
    pub fn candidate(&self, id: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.id == id)
    }

    /// Distinct issues in first-seen order.
    #[must_use]
    pub fn issues(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.quotes
            .iter()
            .map(|q| q.issue.as_str())
            .filter(|issue| seen.insert(*issue))
            .collect()
    }

    /// A deck holding only quotes on the given issues (all quotes if `issues` is empty).
    #[must_use]
    pub fn filter_issues(&self, issues: &[String]) -> Self {
        if issues.is_empty() {
            return self.clone();
        }
        Self {
            candidates: self.candidates.clone(),
            quotes: self
                .quotes
                .iter()
                .filter(|q| issues.iter().any(|i| i.eq_ignore_ascii_case(&q.issue)))
                .cloned()
                .collect(),
        }
    }

    fn validate(&self) -> Result<(), QuoteError> {
        let known: HashSet<&str> = self.candidates.iter().map(|c| c.id.as_str()).collect();
        let mut ids = HashSet::new();
        for quote in &self.quotes {
            if !ids.insert(&quote.id) {
                return Err(QuoteError::DuplicateQuote(quote.id.clone()));
            }
            if !known.contains(quote.candidate_id.as_str()) {
                return Err(QuoteError::UnknownCandidate {
                    quote: quote.id.clone(),
                    candidate: quote.candidate_id.clone(),
                });
            }
        }
        Ok(())
    }
}
