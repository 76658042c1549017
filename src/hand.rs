use crate::cards::{parse_cards, Card};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("duplicate cards in hole cards")]
    DuplicateHoleCards,
    #[error("too many board cards: {0}")]
    TooManyBoardCards(usize),
    #[error("duplicate cards on board")]
    DuplicateBoardCards,
    #[error("hole cards overlap with board")]
    Overlap,
    #[error("expected exactly two hole cards, got {0}")]
    HoleCount(usize),
    #[error("card parse error: {0}")]
    CardParse(String),
}

/// An actor's two private cards.
///
/// ```
/// use holdem_duel::hand::HoleCards;
///
/// let hole: HoleCards = "A♥ K♥".parse().unwrap();
/// assert_eq!(hole.to_string(), "A♥ K♥");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HoleCards(Card, Card);

impl HoleCards {
    pub fn try_new(a: Card, b: Card) -> Result<Self, HandError> {
        if a == b {
            return Err(HandError::DuplicateHoleCards);
        }
        Ok(Self(a, b))
    }

    pub fn from_slice(slice: &[Card]) -> Result<Self, HandError> {
        match slice {
            [a, b] => Self::try_new(*a, *b),
            _ => Err(HandError::HoleCount(slice.len())),
        }
    }

    pub fn first(&self) -> Card {
        self.0
    }

    pub fn second(&self) -> Card {
        self.1
    }

    pub fn as_array(&self) -> [Card; 2] {
        [self.0, self.1]
    }
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0, self.1)
    }
}

impl FromStr for HoleCards {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Self::from_slice(&cards)
    }
}

/// Community cards: empty preflop, then 3, 4 and 5 cards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub const MAX: usize = 5;

    pub fn try_new(cards: Vec<Card>) -> Result<Self, HandError> {
        if cards.len() > Self::MAX {
            return Err(HandError::TooManyBoardCards(cards.len()));
        }
        let set: HashSet<Card> = cards.iter().copied().collect();
        if set.len() != cards.len() {
            return Err(HandError::DuplicateBoardCards);
        }
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Add dealt cards. The dealer only ever hands out distinct cards from one deck.
    pub(crate) fn extend<I>(&mut self, cards: I) -> Result<(), HandError>
    where
        I: IntoIterator<Item = Card>,
    {
        self.cards.extend(cards);
        if self.cards.len() > Self::MAX {
            return Err(HandError::TooManyBoardCards(self.cards.len()));
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Board::try_new(cards)
    }
}

/// Check that hole cards and board are all distinct and the board has at most five cards.
///
/// ```
/// use holdem_duel::hand::{validate_hand, Board, HoleCards};
///
/// let hole: HoleCards = "As Ks".parse().unwrap();
/// let board: Board = "2c 3c 4c".parse().unwrap();
/// validate_hand(&hole, &board).unwrap();
/// ```
pub fn validate_hand(hole: &HoleCards, board: &Board) -> Result<(), HandError> {
    if board.len() > Board::MAX {
        return Err(HandError::TooManyBoardCards(board.len()));
    }
    let set: HashSet<Card> = board.as_slice().iter().copied().collect();
    if set.len() != board.len() {
        return Err(HandError::DuplicateBoardCards);
    }
    if set.contains(&hole.first()) || set.contains(&hole.second()) {
        return Err(HandError::Overlap);
    }
    if hole.first() == hole.second() {
        return Err(HandError::DuplicateHoleCards);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn hole_cards_must_be_distinct() {
        let a = Card::new(Rank::Ace, Suit::Spades);
        assert_eq!(HoleCards::try_new(a, a), Err(HandError::DuplicateHoleCards));
        assert_eq!(HoleCards::from_slice(&[a]), Err(HandError::HoleCount(1)));
    }

    #[test]
    fn board_limits_and_duplicates() {
        assert!(matches!("2c 3c 4c 5c 6c 7c".parse::<Board>(), Err(HandError::TooManyBoardCards(6))));
        assert_eq!("2c 2c".parse::<Board>(), Err(HandError::DuplicateBoardCards));
        assert_eq!(Board::default().len(), 0);
    }

    #[test]
    fn extend_past_river_fails() {
        let mut b: Board = "2c 3c 4c 5c".parse().unwrap();
        b.extend([Card::new(Rank::Six, Suit::Clubs)]).unwrap();
        assert_eq!(b.len(), 5);
        assert!(b.extend([Card::new(Rank::Seven, Suit::Clubs)]).is_err());
    }

    #[test]
    fn overlap_is_rejected() {
        let hole: HoleCards = "As Ks".parse().unwrap();
        let board: Board = "As 2d 3h".parse().unwrap();
        assert_eq!(validate_hand(&hole, &board), Err(HandError::Overlap));
    }
}
