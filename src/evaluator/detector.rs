use super::hand_analysis::HandAnalysis;
use crate::cards::Rank;
use crate::evaluator::{Category, HandRank};

/// Strategy pattern: each detector recognises one category and builds its rank.
pub trait CategoryDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandRank>;
}

// ============================================================================
// Detector Implementations (in priority order: highest to lowest)
// ============================================================================

/// Royal Flush: Ten through Ace in one suit
pub struct RoyalFlushDetector;

impl CategoryDetector for RoyalFlushDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandRank> {
        let ranks = &analysis.suit_info.flush_ranks;
        let royal = [Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace];
        (analysis.suit_info.is_flush() && royal.iter().all(|r| ranks.contains(r)))
            .then(|| HandRank::new(Category::RoyalFlush, &[]))
    }
}

/// Straight Flush: five consecutive ranks within the flush suit
pub struct StraightFlushDetector;

impl CategoryDetector for StraightFlushDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandRank> {
        let top = analysis.flush_straight.top_rank?;
        Some(HandRank::new(Category::StraightFlush, &[top]))
    }
}

/// Four of a Kind: four cards of one rank plus the best remaining rank
pub struct FourOfAKindDetector;

impl CategoryDetector for FourOfAKindDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandRank> {
        let quad = analysis.rank_groups.quad()?;
        let mut tiebreaks = vec![quad];
        tiebreaks.extend(analysis.rank_groups.kickers(&[quad], 1));
        Some(HandRank::new(Category::FourOfAKind, &tiebreaks))
    }
}

/// Full House: trips plus a different rank with at least two cards
pub struct FullHouseDetector;

impl CategoryDetector for FullHouseDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandRank> {
        let (trips, pair) = analysis.rank_groups.full_house()?;
        Some(HandRank::new(Category::FullHouse, &[trips, pair]))
    }
}

/// Flush: the five highest cards of the flush suit
pub struct FlushDetector;

impl CategoryDetector for FlushDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandRank> {
        analysis.suit_info.is_flush().then(|| {
            let top: Vec<Rank> = analysis.suit_info.flush_ranks.iter().copied().take(5).collect();
            HandRank::new(Category::Flush, &top)
        })
    }
}

/// Straight: five consecutive distinct ranks
pub struct StraightDetector;

impl CategoryDetector for StraightDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandRank> {
        let top = analysis.straight_info.top_rank?;
        Some(HandRank::new(Category::Straight, &[top]))
    }
}

/// Three of a Kind: trips plus two kickers
pub struct ThreeOfAKindDetector;

impl CategoryDetector for ThreeOfAKindDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandRank> {
        let trips = *analysis.rank_groups.trips().first()?;
        let mut tiebreaks = vec![trips];
        tiebreaks.extend(analysis.rank_groups.kickers(&[trips], 2));
        Some(HandRank::new(Category::ThreeOfAKind, &tiebreaks))
    }
}

/// Two Pair: the two highest pairs plus one kicker
pub struct TwoPairDetector;

impl CategoryDetector for TwoPairDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandRank> {
        let pairs = analysis.rank_groups.pairs();
        let (&high, &low) = (pairs.first()?, pairs.get(1)?);
        let mut tiebreaks = vec![high, low];
        tiebreaks.extend(analysis.rank_groups.kickers(&[high, low], 1));
        Some(HandRank::new(Category::TwoPair, &tiebreaks))
    }
}

/// One Pair: a pair plus up to three kickers
pub struct OnePairDetector;

impl CategoryDetector for OnePairDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandRank> {
        let pair = *analysis.rank_groups.pairs().first()?;
        let mut tiebreaks = vec![pair];
        tiebreaks.extend(analysis.rank_groups.kickers(&[pair], 3));
        Some(HandRank::new(Category::Pair, &tiebreaks))
    }
}

/// High Card: up to five highest ranks
pub struct HighCardDetector;

impl HighCardDetector {
    pub fn rank(analysis: &HandAnalysis) -> HandRank {
        HandRank::new(Category::HighCard, &analysis.top(5))
    }
}

impl CategoryDetector for HighCardDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandRank> {
        Some(Self::rank(analysis))
    }
}

// ============================================================================
// Static detector list (in priority order)
// ============================================================================

pub const DETECTORS: [&dyn CategoryDetector; 10] = [
    &RoyalFlushDetector,
    &StraightFlushDetector,
    &FourOfAKindDetector,
    &FullHouseDetector,
    &FlushDetector,
    &StraightDetector,
    &ThreeOfAKindDetector,
    &TwoPairDetector,
    &OnePairDetector,
    &HighCardDetector,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn analyse(s: &str) -> HandAnalysis {
        HandAnalysis::new(&parse_cards(s).unwrap())
    }

    fn first_match(s: &str) -> HandRank {
        let analysis = analyse(s);
        DETECTORS.iter().find_map(|d| d.detect(&analysis)).unwrap()
    }

    #[test]
    fn royal_needs_the_same_suit() {
        assert!(RoyalFlushDetector.detect(&analyse("Ah Kh Qh Jh 10h 2s 3c")).is_some());
        assert!(RoyalFlushDetector.detect(&analyse("Ah Kh Qh Jh 10s 2h 3h")).is_none());
    }

    #[test]
    fn steel_wheel_is_a_five_high_straight_flush() {
        let r = first_match("Ad 2d 3d 4d 5d Kc Ks");
        assert_eq!(r.to_tuple(), vec![8, 5]);
    }

    #[test]
    fn quads_kicker_may_come_from_a_pair() {
        let r = first_match("9s 9h 9d 9c Ks Kh 2c");
        assert_eq!(r.to_tuple(), vec![7, 9, 13]);
    }

    #[test]
    fn full_house_beats_flush_in_priority() {
        let r = first_match("Kh Kd Ks 5h 5c 9h 2h");
        assert_eq!(r.category, Category::FullHouse);
        assert_eq!(r.to_tuple(), vec![6, 13, 5]);
    }

    #[test]
    fn flush_uses_top_five_of_suit() {
        let r = first_match("Ah 2h 9h Jh 4h 6h Kc");
        assert_eq!(r.to_tuple(), vec![5, 14, 11, 9, 6, 4]);
    }

    #[test]
    fn two_pair_kicker_from_third_pair() {
        let r = first_match("Ac Ad Kc Kd Qs Qh 2c");
        assert_eq!(r.to_tuple(), vec![2, 14, 13, 12]);
    }

    #[test]
    fn trips_take_two_kickers() {
        let r = first_match("Js Jh Jd 9c 7s 4d 2c");
        assert_eq!(r.to_tuple(), vec![3, 11, 9, 7]);
    }

    #[test]
    fn high_card_always_matches() {
        let analysis = analyse("Ac Kd 7s 5c 3d");
        assert_eq!(HighCardDetector.detect(&analysis).map(|r| r.category), Some(Category::HighCard));
        assert!(OnePairDetector.detect(&analysis).is_none());
    }
}
