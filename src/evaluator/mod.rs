pub(crate) mod detector;
pub(crate) mod hand_analysis;
pub(crate) mod rank_groups;
pub(crate) mod straight_info;
pub(crate) mod suit_info;

use crate::cards::{Card, Rank};
use crate::hand::{validate_hand, Board, HandError, HoleCards};
use core::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

/// Compact, comparable hand strength. Higher is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
pub struct HandValue(u64);

impl HandValue {
    /// Return the packed comparable value.
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Pack a category and up to five tiebreak ranks. Absent tiebreaks pack as 0,
    /// so comparing packed values is the lexicographic tuple comparison.
    pub fn from_parts(category: Category, tiebreaks: &[Rank]) -> Self {
        // [ category (8 bits) | t0 (6) | t1 (6) | t2 (6) | t3 (6) | t4 (6) | 18 zero bits ]
        const CAT_SHIFT: u32 = 48;
        const RANK_STRIDE: u32 = 6;
        let mut v: u64 = (category as u64) << CAT_SHIFT;
        for (i, r) in tiebreaks.iter().take(5).enumerate() {
            let offset = CAT_SHIFT - RANK_STRIDE * (i as u32 + 1);
            v |= (r.value() as u64) << offset;
        }
        HandValue(v)
    }
}

/// Poker hand category from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::HighCard,
        Category::Pair,
        Category::TwoPair,
        Category::ThreeOfAKind,
        Category::Straight,
        Category::Flush,
        Category::FullHouse,
        Category::FourOfAKind,
        Category::StraightFlush,
        Category::RoyalFlush,
    ];

    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Evaluated strength: a category plus up to five tiebreak ranks, most significant first.
/// Ordering and equality are lexicographic over `[category, tiebreaks...]` with missing entries as 0.
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub struct HandRank {
    pub category: Category,
    tiebreaks: [Rank; 5],
    len: u8,
    value: HandValue,
}

impl HandRank {
    pub(crate) fn new(category: Category, tiebreaks: &[Rank]) -> Self {
        let len = tiebreaks.len().min(5);
        let mut padded = [Rank::Two; 5];
        padded[..len].copy_from_slice(&tiebreaks[..len]);
        Self {
            category,
            tiebreaks: padded,
            len: len as u8,
            value: HandValue::from_parts(category, &tiebreaks[..len]),
        }
    }

    /// Returns the tiebreak ranks, most significant first.
    pub fn tiebreaks(&self) -> &[Rank] {
        &self.tiebreaks[..self.len as usize]
    }

    /// Returns the packed comparable value.
    pub const fn value(&self) -> HandValue {
        self.value
    }

    /// Returns `[category, tiebreak...]` as plain numbers.
    ///
    /// ```
    /// use holdem_duel::cards::parse_cards;
    /// use holdem_duel::evaluator::evaluate_cards;
    ///
    /// let rank = evaluate_cards(&parse_cards("Ah Kh Qh Jh 10h 2s 3c").unwrap()).unwrap();
    /// assert_eq!(rank.to_tuple(), vec![9]);
    /// ```
    pub fn to_tuple(&self) -> Vec<u8> {
        std::iter::once(self.category.ordinal())
            .chain(self.tiebreaks().iter().map(|r| r.value()))
            .collect()
    }
}

impl Ord for HandRank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl PartialOrd for HandRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HandRank {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for HandRank {}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.category)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),
    #[error("expected 2 to 7 cards, got {0}")]
    CardCount(usize),
    #[error("duplicate card: {0}")]
    DuplicateCard(Card),
}

/// Evaluate hole cards plus whatever part of the board is dealt.
///
/// ```
/// use holdem_duel::evaluator::{evaluate, Category};
/// use holdem_duel::hand::{Board, HoleCards};
///
/// let hole: HoleCards = "As Ah".parse().unwrap();
/// let board: Board = "Kc Qd Jh 3s 2c".parse().unwrap();
/// let rank = evaluate(&hole, &board).unwrap();
/// assert_eq!(rank.category, Category::Pair);
/// assert_eq!(rank.to_tuple(), vec![1, 14, 13, 12, 11]);
/// ```
pub fn evaluate(hole: &HoleCards, board: &Board) -> Result<HandRank, EvalError> {
    validate_hand(hole, board)?;
    let mut cards = Vec::with_capacity(2 + board.len());
    cards.extend_from_slice(&hole.as_array());
    cards.extend_from_slice(board.as_slice());
    Ok(rank_cards(&cards))
}

/// Evaluate a raw set of 2 to 7 distinct cards.
pub fn evaluate_cards(cards: &[Card]) -> Result<HandRank, EvalError> {
    if !(2..=7).contains(&cards.len()) {
        return Err(EvalError::CardCount(cards.len()));
    }
    let mut seen = HashSet::with_capacity(cards.len());
    for &c in cards {
        if !seen.insert(c) {
            return Err(EvalError::DuplicateCard(c));
        }
    }
    Ok(rank_cards(cards))
}

fn rank_cards(cards: &[Card]) -> HandRank {
    use detector::{HighCardDetector, DETECTORS};
    use hand_analysis::HandAnalysis;

    let analysis = HandAnalysis::new(cards);
    DETECTORS
        .iter()
        .find_map(|d| d.detect(&analysis))
        .unwrap_or_else(|| HighCardDetector::rank(&analysis))
}

/// Compare two hands on a shared board.
///
/// ```
/// use holdem_duel::evaluator::compare;
/// use holdem_duel::hand::{Board, HoleCards};
/// use std::cmp::Ordering;
///
/// let board: Board = "Qc Jd 9h 3s 2c".parse().unwrap();
/// let a: HoleCards = "As Ah".parse().unwrap();
/// let b: HoleCards = "Ks Kh".parse().unwrap();
/// assert_eq!(compare(&a, &b, &board).unwrap(), Ordering::Greater);
/// ```
pub fn compare(a: &HoleCards, b: &HoleCards, board: &Board) -> Result<Ordering, EvalError> {
    let ra = evaluate(a, board)?;
    let rb = evaluate(b, board)?;
    Ok(ra.cmp(&rb))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn tuple(s: &str) -> Vec<u8> {
        evaluate_cards(&parse_cards(s).unwrap()).unwrap().to_tuple()
    }

    #[test]
    fn card_count_is_checked() {
        let one = parse_cards("As").unwrap();
        assert_eq!(evaluate_cards(&one).unwrap_err(), EvalError::CardCount(1));
        let eight = parse_cards("2c 3c 4c 5c 6c 7c 8c 9c").unwrap();
        assert_eq!(evaluate_cards(&eight).unwrap_err(), EvalError::CardCount(8));
    }

    #[test]
    fn duplicates_are_rejected() {
        let dup = parse_cards("As As Kd").unwrap();
        assert!(matches!(evaluate_cards(&dup), Err(EvalError::DuplicateCard(_))));
    }

    #[test]
    fn preflop_hands_have_short_tuples() {
        assert_eq!(tuple("As Kd"), vec![0, 14, 13]);
        assert_eq!(tuple("7s 7d"), vec![1, 7]);
    }

    #[test]
    fn missing_tiebreaks_compare_as_zero() {
        let short = HandRank::new(Category::Pair, &[Rank::Seven]);
        let long = HandRank::new(Category::Pair, &[Rank::Seven, Rank::Two]);
        assert!(long > short);
    }

    #[test]
    fn packed_value_orders_category_first() {
        let best_pair = HandRank::new(Category::Pair, &[Rank::Ace, Rank::King, Rank::Queen, Rank::Jack]);
        let worst_two_pair = HandRank::new(Category::TwoPair, &[Rank::Three, Rank::Two, Rank::Four]);
        assert!(worst_two_pair > best_pair);
    }

    #[test]
    fn names_cover_all_categories() {
        assert_eq!(Category::ALL.len(), 10);
        assert_eq!(Category::RoyalFlush.name(), "Royal Flush");
        assert_eq!(Category::ThreeOfAKind.to_string(), "Three of a Kind");
        for (i, c) in Category::ALL.iter().enumerate() {
            assert_eq!(c.ordinal() as usize, i);
        }
    }
}
