//! Quote deck and ranking error types.

use thiserror::Error;

use crate::badge::Badge;
use crate::model::QuoteId;

/// A badge change that would break the one-badge-per-quote rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BadgeError {
    /// The quote already holds the other badge.
    #[error("quote {quote} already holds the {held} badge")]
    HoldsOtherBadge { quote: QuoteId, held: Badge },
}

#[derive(Debug, Error)]
pub enum QuoteError {
    /// Every card in the deck has been swiped.
    #[error("no cards left to swipe")]
    DeckExhausted,

    /// Badges can only go to quotes the user agreed with.
    #[error("quote {0} was not agreed with")]
    NotAgreed(QuoteId),

    #[error(transparent)]
    Badge(#[from] BadgeError),

    /// Two quotes in the data share an identifier.
    #[error("duplicate quote id: {0}")]
    DuplicateQuote(QuoteId),

    /// A quote names a candidate missing from the data.
    #[error("quote {quote} references unknown candidate {candidate}")]
    UnknownCandidate { quote: QuoteId, candidate: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
