//! One pass through the deck: swipe every card, then badge favourites.

use serde::Serialize;

use crate::badge::{Badge, BadgeAssignment};
use crate::deck::QuoteDeck;
use crate::error::QuoteError;
use crate::gesture::{DragThresholds, SwipeDirection};
use crate::model::{Quote, QuoteId};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingPhase {
    /// Cards remain to be swiped.
    Swiping,
    /// The deck is exhausted; only badge changes remain.
    Ranking,
}

#[derive(Debug, Clone)]
pub struct RankingSession {
    deck: QuoteDeck,
    position: usize,
    agreed: Vec<Quote>,
    badges: BadgeAssignment,
}

impl RankingSession {
    #[must_use]
    pub fn new(deck: QuoteDeck) -> Self {
        Self {
            deck,
            position: 0,
            agreed: Vec::new(),
            badges: BadgeAssignment::default(),
        }
    }

    #[must_use]
    pub const fn deck(&self) -> &QuoteDeck {
        &self.deck
    }

    /// The card on top of the deck.
    #[must_use]
    pub fn current(&self) -> Option<&Quote> {
        self.deck.quotes().get(self.position)
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.deck.quotes().len().saturating_sub(self.position)
    }

    #[must_use]
    pub fn phase(&self) -> RankingPhase {
        if self.remaining() == 0 {
            RankingPhase::Ranking
        } else {
            RankingPhase::Swiping
        }
    }

    /// Quotes agreed with, in swipe order.
    #[must_use]
    pub fn agreed(&self) -> &[Quote] {
        &self.agreed
    }

    #[must_use]
    pub const fn badges(&self) -> &BadgeAssignment {
        &self.badges
    }

    /// Decide on the current card and advance. Returns the id of the swiped quote.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::DeckExhausted`] when no card is left.
    pub fn swipe(&mut self, direction: SwipeDirection) -> Result<QuoteId, QuoteError> {
        let quote = self.current().cloned().ok_or(QuoteError::DeckExhausted)?;
        self.position += 1;
        let id = quote.id.clone();
        if direction.is_agree() {
            self.agreed.push(quote);
        }
        tracing::debug!(quote = %id, ?direction, remaining = self.remaining(), "swiped");
        Ok(id)
    }

    /// Apply a released drag. `Ok(None)` means the card snapped back.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::DeckExhausted`] when the drag commits and no card is left.
    pub fn release_drag(
        &mut self,
        thresholds: &DragThresholds,
        offset_x: f64,
        velocity_x: f64,
    ) -> Result<Option<QuoteId>, QuoteError> {
        thresholds
            .resolve(offset_x, velocity_x)
            .map(|direction| self.swipe(direction))
            .transpose()
    }

    /// Whether the badge control for `quote` should be enabled.
    #[must_use]
    pub fn can_assign(&self, quote: &QuoteId, badge: Badge) -> bool {
        self.is_agreed(quote) && self.badges.is_eligible(quote, badge)
    }

    /// Give `badge` to an agreed quote, returning the quote it was taken from.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::NotAgreed`] for a quote not in the agreed list and
    /// [`QuoteError::Badge`] if the quote already holds the other badge.
    pub fn assign_badge(&mut self, quote: &QuoteId, badge: Badge) -> Result<Option<QuoteId>, QuoteError> {
        if !self.is_agreed(quote) {
            return Err(QuoteError::NotAgreed(quote.clone()));
        }
        Ok(self.badges.assign(quote.clone(), badge)?)
    }

    /// Empty a badge slot.
    pub fn clear_badge(&mut self, badge: Badge) -> Option<QuoteId> {
        self.badges.clear(badge)
    }

    fn is_agreed(&self, quote: &QuoteId) -> bool {
        self.agreed.iter().any(|q| &q.id == quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn session() -> RankingSession {
        RankingSession::new(QuoteDeck::bundled().unwrap())
    }

    #[test]
    fn swiping_right_appends_in_order() {
        let mut s = session();
        let first = s.swipe(SwipeDirection::Right).unwrap();
        s.swipe(SwipeDirection::Left).unwrap();
        let third = s.swipe(SwipeDirection::Right).unwrap();

        let ids: Vec<&QuoteId> = s.agreed().iter().map(|q| &q.id).collect();
        assert_eq!(ids, vec![&first, &third]);
        assert_eq!(s.remaining(), 7);
        assert_eq!(s.phase(), RankingPhase::Swiping);
    }

    #[test]
    fn exhausted_deck_refuses_swipes() {
        let mut s = session();
        for _ in 0..10 {
            s.swipe(SwipeDirection::Left).unwrap();
        }
        assert_eq!(s.phase(), RankingPhase::Ranking);
        assert!(s.current().is_none());
        assert!(matches!(s.swipe(SwipeDirection::Right), Err(QuoteError::DeckExhausted)));
    }

    #[test]
    fn short_drag_snaps_back() {
        let mut s = session();
        let thresholds = DragThresholds::default();
        assert_eq!(s.release_drag(&thresholds, 30.0, 0.1).unwrap(), None);
        assert_eq!(s.remaining(), 10);
        assert!(s.release_drag(&thresholds, 140.0, 0.0).unwrap().is_some());
        assert_eq!(s.agreed().len(), 1);
    }

    #[test]
    fn badges_require_agreement() {
        let mut s = session();
        let rejected = s.swipe(SwipeDirection::Left).unwrap();
        let agreed = s.swipe(SwipeDirection::Right).unwrap();

        assert!(!s.can_assign(&rejected, Badge::Diamond));
        assert!(matches!(
            s.assign_badge(&rejected, Badge::Diamond),
            Err(QuoteError::NotAgreed(_))
        ));
        assert!(s.can_assign(&agreed, Badge::Diamond));
        assert_eq!(s.assign_badge(&agreed, Badge::Diamond).unwrap(), None);
        assert!(!s.can_assign(&agreed, Badge::Gold));
        assert!(matches!(
            s.assign_badge(&agreed, Badge::Gold),
            Err(QuoteError::Badge(_))
        ));
    }
}
