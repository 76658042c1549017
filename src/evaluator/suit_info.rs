use crate::cards::{Card, Rank, Suit};

/// The flush suit of a card set and its ranks, highest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuitInfo {
    pub flush_suit: Option<Suit>,
    pub flush_ranks: Vec<Rank>,
}

impl SuitInfo {
    /// A suit holding five or more of the cards. If several would qualify the first in
    /// [`Suit::ALL`] wins; seven cards can never hold two flushes.
    pub fn detect(cards: &[Card]) -> Self {
        for suit in Suit::ALL {
            let mut ranks: Vec<Rank> =
                cards.iter().filter(|c| c.suit() == suit).map(|c| c.rank()).collect();
            if ranks.len() >= 5 {
                ranks.sort_by(|a, b| b.cmp(a));
                return Self { flush_suit: Some(suit), flush_ranks: ranks };
            }
        }
        Self { flush_suit: None, flush_ranks: Vec::new() }
    }

    pub fn is_flush(&self) -> bool {
        self.flush_suit.is_some()
    }
}
