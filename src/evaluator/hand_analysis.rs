use super::rank_groups::RankGroups;
use super::straight_info::StraightInfo;
use super::suit_info::SuitInfo;
use crate::cards::{Card, Rank};

/// Pre-computed analysis of 2..=7 cards.
/// Built once and shared by all category detectors.
#[derive(Debug, Clone)]
pub struct HandAnalysis {
    /// Distinct ranks, highest first.
    pub distinct: Vec<Rank>,
    pub rank_groups: RankGroups,
    pub suit_info: SuitInfo,
    pub straight_info: StraightInfo,
    /// Straight formed inside the flush suit only.
    pub flush_straight: StraightInfo,
}

impl HandAnalysis {
    pub fn new(cards: &[Card]) -> Self {
        let mut rank_counts = [0u8; 15];
        for c in cards {
            rank_counts[c.rank().value() as usize] += 1;
        }

        let mut distinct: Vec<Rank> =
            Rank::ALL.iter().copied().filter(|r| rank_counts[r.value() as usize] > 0).collect();
        distinct.reverse();

        let rank_groups = RankGroups::from_counts(&rank_counts);
        let suit_info = SuitInfo::detect(cards);
        let straight_info = StraightInfo::detect(&distinct);
        let flush_straight = StraightInfo::detect(&suit_info.flush_ranks);

        Self { distinct, rank_groups, suit_info, straight_info, flush_straight }
    }

    /// Returns the `n` highest distinct ranks.
    pub fn top(&self, n: usize) -> Vec<Rank> {
        self.distinct.iter().copied().take(n).collect()
    }
}
