use crate::cards::Rank;

/// The best straight among a set of ranks, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StraightInfo {
    pub top_rank: Option<Rank>,
}

impl StraightInfo {
    /// Find the highest five consecutive distinct ranks. The Ace also plays low,
    /// so A-2-3-4-5 is a straight topped by the Five.
    pub fn detect(ranks: &[Rank]) -> Self {
        let mut present = [false; 15];
        for r in ranks {
            present[r.value() as usize] = true;
        }
        present[1] = present[Rank::Ace.value() as usize];

        let top_rank = (5..=14u8)
            .rev()
            .find(|&top| (top - 4..=top).all(|v| present[v as usize]))
            .and_then(Rank::from_value);
        Self { top_rank }
    }

    #[cfg(test)]
    pub fn is_straight(&self) -> bool {
        self.top_rank.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broadway() {
        let ranks = [Rank::Ace, Rank::King, Rank::Queen, Rank::Jack, Rank::Ten];
        assert_eq!(StraightInfo::detect(&ranks).top_rank, Some(Rank::Ace));
    }

    #[test]
    fn wheel_tops_at_five() {
        let ranks = [Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::King];
        assert_eq!(StraightInfo::detect(&ranks).top_rank, Some(Rank::Five));
    }

    #[test]
    fn six_high_beats_wheel_when_both_present() {
        let ranks = [Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six];
        assert_eq!(StraightInfo::detect(&ranks).top_rank, Some(Rank::Six));
    }

    #[test]
    fn highest_of_overlapping_runs() {
        let ranks = [Rank::Four, Rank::Five, Rank::Six, Rank::Seven, Rank::Eight, Rank::Nine, Rank::Ten];
        assert_eq!(StraightInfo::detect(&ranks).top_rank, Some(Rank::Ten));
    }

    #[test]
    fn gaps_and_pairs_are_not_straights() {
        let gap = [Rank::Ace, Rank::King, Rank::Queen, Rank::Jack, Rank::Nine];
        assert!(!StraightInfo::detect(&gap).is_straight());
        let paired = [Rank::Ace, Rank::Ace, Rank::King, Rank::Queen, Rank::Jack];
        assert!(!StraightInfo::detect(&paired).is_straight());
        let wrap = [Rank::Queen, Rank::King, Rank::Ace, Rank::Two, Rank::Three];
        assert!(!StraightInfo::detect(&wrap).is_straight());
    }
}
