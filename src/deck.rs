use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("deck is empty")]
    Empty,
    #[error("duplicate card in stacked deck: {0}")]
    DuplicateCard(Card),
    #[error("deck too short for a hand: need {needed} cards, have {available}")]
    TooShort { needed: usize, available: usize },
}

/// A 52-card deck consumed from one end. One deck lives for exactly one hand.
#[derive(Debug, Clone)]
pub struct Deck {
    // next card to deal is the last element
    cards: Vec<Card>,
}

impl Deck {
    /// All 52 cards in suit-major order.
    ///
    /// ```
    /// use holdem_duel::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 52);
    /// ```
    pub fn standard() -> Self {
        let cards = Suit::ALL
            .iter()
            .flat_map(|&s| Rank::ALL.iter().map(move |&r| Card::new(r, s)))
            .collect();
        Self { cards }
    }

    /// A fresh deck in uniformly random order.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_with(rng);
        deck
    }

    /// A deck that deals `draw_order` front to back. Used for replays and scripted hands.
    ///
    /// ```
    /// use holdem_duel::cards::parse_cards;
    /// use holdem_duel::deck::Deck;
    ///
    /// let mut deck = Deck::stacked(parse_cards("As Kd").unwrap()).unwrap();
    /// assert_eq!(deck.draw().unwrap().to_string(), "A♠");
    /// assert_eq!(deck.draw().unwrap().to_string(), "K♦");
    /// assert!(deck.draw().is_err());
    /// ```
    pub fn stacked(draw_order: Vec<Card>) -> Result<Self, DeckError> {
        let mut seen = HashSet::with_capacity(draw_order.len());
        for &c in &draw_order {
            if !seen.insert(c) {
                return Err(DeckError::DuplicateCard(c));
            }
        }
        let mut cards = draw_order;
        cards.reverse();
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Shuffle using a seeded RNG for reproducibility.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.cards.shuffle(&mut rng);
    }

    /// Fisher-Yates shuffle with the provided RNG.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Deal the next card.
    pub fn draw(&mut self) -> Result<Card, DeckError> {
        self.cards.pop().ok_or(DeckError::Empty)
    }

    /// Deal `n` cards, or none at all if fewer than `n` remain.
    pub fn draw_n(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        if self.cards.len() < n {
            return Err(DeckError::Empty);
        }
        (0..n).map(|_| self.draw()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_deck_is_52_unique_cards() {
        let d = Deck::standard();
        let set: HashSet<Card> = d.cards.iter().copied().collect();
        assert_eq!(d.len(), 52);
        assert_eq!(set.len(), 52);
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let mut d1 = Deck::standard();
        let mut d2 = Deck::standard();
        d1.shuffle_seeded(42);
        d2.shuffle_seeded(42);
        assert_eq!(d1.cards, d2.cards);
    }

    #[test]
    fn shuffle_keeps_every_card() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let d = Deck::shuffled(&mut rng);
        let set: HashSet<Card> = d.cards.iter().copied().collect();
        assert_eq!(set.len(), 52);
    }

    #[test]
    fn fifty_third_draw_fails() {
        let mut d = Deck::standard();
        d.shuffle_seeded(7);
        let dealt = d.draw_n(52).unwrap();
        assert_eq!(dealt.len(), 52);
        assert!(d.is_empty());
        assert_eq!(d.draw(), Err(DeckError::Empty));
    }

    #[test]
    fn draw_n_is_all_or_nothing() {
        let mut d = Deck::stacked(vec![Card::new(Rank::Two, Suit::Clubs)]).unwrap();
        assert_eq!(d.draw_n(2), Err(DeckError::Empty));
        assert_eq!(d.len(), 1);
    }

    #[test]
    fn stacked_rejects_duplicates() {
        let c = Card::new(Rank::Ace, Suit::Spades);
        assert_eq!(Deck::stacked(vec![c, c]).unwrap_err(), DeckError::DuplicateCard(c));
    }
}
