//! Diamond and gold badges.
//!
//! Each badge is held by at most one quote, and a quote holds at most one
//! badge. Assigning a badge to a new quote moves it; asking for the badge a
//! quote does not hold while it holds the other one is refused.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::BadgeError;
use crate::model::QuoteId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    Diamond,
    Gold,
}

impl Badge {
    pub const ALL: [Self; 2] = [Self::Diamond, Self::Gold];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Diamond => "diamond",
            Self::Gold => "gold",
        }
    }

    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Diamond => Self::Gold,
            Self::Gold => Self::Diamond,
        }
    }

    /// Match points a badge adds on top of the base point for agreeing.
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            Self::Diamond => 3,
            Self::Gold => 2,
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two badge slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BadgeAssignment {
    diamond: Option<QuoteId>,
    gold: Option<QuoteId>,
}

impl BadgeAssignment {
    #[must_use]
    pub const fn holder(&self, badge: Badge) -> Option<&QuoteId> {
        match badge {
            Badge::Diamond => self.diamond.as_ref(),
            Badge::Gold => self.gold.as_ref(),
        }
    }

    /// Badge currently held by `quote`, if any.
    #[must_use]
    pub fn badge_of(&self, quote: &QuoteId) -> Option<Badge> {
        Badge::ALL
            .into_iter()
            .find(|&badge| self.holder(badge) == Some(quote))
    }

    /// Whether `quote` may receive `badge`: it holds nothing, or already holds `badge`.
    ///
    /// This is what a UI should use to enable or disable a badge control.
    #[must_use]
    pub fn is_eligible(&self, quote: &QuoteId, badge: Badge) -> bool {
        self.badge_of(quote).is_none_or(|held| held == badge)
    }

    /// Give `badge` to `quote`, returning the quote it was taken from.
    ///
    /// Re-assigning a badge to its current holder changes nothing and returns `None`.
    ///
    /// # Errors
    ///
    /// Returns [`BadgeError::HoldsOtherBadge`] if `quote` holds the other badge;
    /// the slots are left untouched.
    pub fn assign(&mut self, quote: QuoteId, badge: Badge) -> Result<Option<QuoteId>, BadgeError> {
        if self.holder(badge.other()) == Some(&quote) {
            return Err(BadgeError::HoldsOtherBadge {
                quote,
                held: badge.other(),
            });
        }

        let slot = self.slot_mut(badge);
        if slot.as_ref() == Some(&quote) {
            return Ok(None);
        }
        let displaced = slot.replace(quote);
        if let Some(previous) = &displaced {
            tracing::debug!(%badge, %previous, "badge reassigned");
        }
        Ok(displaced)
    }

    /// Empty `badge`'s slot, returning its former holder.
    pub fn clear(&mut self, badge: Badge) -> Option<QuoteId> {
        self.slot_mut(badge).take()
    }

    /// Take away whatever badge `quote` holds.
    pub fn release(&mut self, quote: &QuoteId) -> Option<Badge> {
        let badge = self.badge_of(quote)?;
        self.clear(badge);
        Some(badge)
    }

    const fn slot_mut(&mut self, badge: Badge) -> &mut Option<QuoteId> {
        match badge {
            Badge::Diamond => &mut self.diamond,
            Badge::Gold => &mut self.gold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn q(id: &str) -> QuoteId {
        QuoteId::new(id)
    }

    #[test]
    fn assign_fills_empty_slot() {
        let mut badges = BadgeAssignment::default();
        assert_eq!(badges.assign(q("a"), Badge::Diamond).unwrap(), None);
        assert_eq!(badges.holder(Badge::Diamond), Some(&q("a")));
        assert_eq!(badges.badge_of(&q("a")), Some(Badge::Diamond));
    }

    #[test]
    fn assign_moves_badge_to_new_quote() {
        let mut badges = BadgeAssignment::default();
        badges.assign(q("a"), Badge::Gold).unwrap();
        let displaced = badges.assign(q("b"), Badge::Gold).unwrap();
        assert_eq!(displaced, Some(q("a")));
        assert_eq!(badges.holder(Badge::Gold), Some(&q("b")));
        assert_eq!(badges.badge_of(&q("a")), None);
    }

    #[test]
    fn assign_same_badge_twice_is_noop() {
        let mut badges = BadgeAssignment::default();
        badges.assign(q("a"), Badge::Diamond).unwrap();
        let before = badges.clone();
        assert_eq!(badges.assign(q("a"), Badge::Diamond).unwrap(), None);
        assert_eq!(badges, before);
    }

    #[test]
    fn other_badge_is_refused() {
        let mut badges = BadgeAssignment::default();
        badges.assign(q("a"), Badge::Diamond).unwrap();
        assert!(!badges.is_eligible(&q("a"), Badge::Gold));
        assert!(badges.is_eligible(&q("a"), Badge::Diamond));

        let err = badges.assign(q("a"), Badge::Gold).unwrap_err();
        assert_eq!(
            err,
            BadgeError::HoldsOtherBadge {
                quote: q("a"),
                held: Badge::Diamond
            }
        );
        assert_eq!(badges.holder(Badge::Gold), None);
    }

    #[test]
    fn release_frees_quote_for_other_badge() {
        let mut badges = BadgeAssignment::default();
        badges.assign(q("a"), Badge::Diamond).unwrap();
        assert_eq!(badges.release(&q("a")), Some(Badge::Diamond));
        assert!(badges.assign(q("a"), Badge::Gold).is_ok());
        assert_eq!(badges.release(&q("zzz")), None);
    }

    #[test]
    fn serializes_both_slots() {
        let mut badges = BadgeAssignment::default();
        badges.assign(q("a"), Badge::Gold).unwrap();
        let json = serde_json::to_value(&badges).unwrap();
        assert_eq!(json, serde_json::json!({"diamond": null, "gold": "a"}));
    }

    #[test]
    fn slots_stay_exclusive_under_arbitrary_sequences() {
        // Deterministic pseudo-random walk over (quote, badge) pairs.
        let quotes = ["a", "b", "c", "d"];
        let mut badges = BadgeAssignment::default();
        let mut state: u32 = 7;
        for _ in 0..500 {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let quote = q(quotes[(state >> 16) as usize % quotes.len()]);
            let badge = Badge::ALL[(state >> 8) as usize % 2];
            let _ = badges.assign(quote, badge);

            if let (Some(d), Some(g)) = (badges.holder(Badge::Diamond), badges.holder(Badge::Gold)) {
                assert_ne!(d, g, "one quote holds both badges");
            }
        }
    }
}
