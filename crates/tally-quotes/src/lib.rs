//! # tally-quotes
//!
//! State for the swipe-to-rank quote matcher.
//!
//! A [`RankingSession`] walks a [`QuoteDeck`] one card at a time. Swiping
//! right agrees with a quote and appends it to the agreed list; the user can
//! then mark up to two favourites with the exclusive diamond and gold badges.
//! [`RankingSession::results`] turns that into a per-candidate match score.

pub mod badge;
pub mod deck;
pub mod gesture;
pub mod model;
pub mod results;
pub mod session;

mod error;

pub use badge::{Badge, BadgeAssignment};
pub use deck::QuoteDeck;
pub use error::{BadgeError, QuoteError};
pub use gesture::{DragThresholds, SwipeDirection};
pub use model::{Candidate, Quote, QuoteId};
pub use results::CandidateMatch;
pub use session::{RankingPhase, RankingSession};
