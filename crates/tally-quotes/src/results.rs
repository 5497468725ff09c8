//! Candidate match summary for a finished (or in-progress) session.
//!
//! Each agreed quote is worth one point to its candidate; a badge adds
//! [`Badge::points`] on top.

use serde::Serialize;

use crate::badge::Badge;
use crate::session::RankingSession;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateMatch {
    pub candidate_id: String,
    pub candidate_name: String,
    pub agreed: usize,
    pub badges: Vec<Badge>,
    pub score: u32,
}

impl RankingSession {
    /// Every candidate in the deck, best match first (ties by name).
    #[must_use]
    pub fn results(&self) -> Vec<CandidateMatch> {
        let mut matches: Vec<CandidateMatch> = self
            .deck()
            .candidates()
            .iter()
            .map(|candidate| {
                let agreed: Vec<_> = self
                    .agreed()
                    .iter()
                    .filter(|q| q.candidate_id == candidate.id)
                    .collect();
                let badges: Vec<Badge> = agreed
                    .iter()
                    .filter_map(|q| self.badges().badge_of(&q.id))
                    .collect();
                let base = u32::try_from(agreed.len()).unwrap_or(u32::MAX);
                let score = badges.iter().fold(base, |acc, b| acc.saturating_add(b.points()));
                CandidateMatch {
                    candidate_id: candidate.id.clone(),
                    candidate_name: candidate.name.clone(),
                    agreed: agreed.len(),
                    badges,
                    score,
                }
            })
            .collect();
        matches.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.candidate_name.cmp(&b.candidate_name))
        });
        matches
    }
}
