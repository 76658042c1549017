use crate::cards::Rank;

/// Ranks grouped by how often they occur, sorted by (count desc, rank desc).
///
/// Example: AAAKKQ7 groups as [(Ace, 3), (King, 2), (Queen, 1), (Seven, 1)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankGroups {
    groups: Vec<(Rank, u8)>,
}

impl RankGroups {
    /// Build from a rank count array indexed by rank value (2..=14).
    pub fn from_counts(rank_counts: &[u8; 15]) -> Self {
        let mut groups: Vec<(Rank, u8)> = Rank::ALL
            .iter()
            .copied()
            .map(|r| (r, rank_counts[r.value() as usize]))
            .filter(|&(_, n)| n > 0)
            .collect();
        groups.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));
        Self { groups }
    }

    fn with_count(&self, count: u8) -> impl Iterator<Item = Rank> + '_ {
        self.groups.iter().filter(move |(_, n)| *n == count).map(|(r, _)| *r)
    }

    /// Returns the highest four-of-a-kind rank, if any.
    pub fn quad(&self) -> Option<Rank> {
        self.with_count(4).next()
    }

    /// Returns every three-of-a-kind rank, highest first.
    pub fn trips(&self) -> Vec<Rank> {
        self.with_count(3).collect()
    }

    /// Returns every pair rank, highest first.
    pub fn pairs(&self) -> Vec<Rank> {
        self.with_count(2).collect()
    }

    /// Returns the highest trips and the best other rank holding at least two cards.
    pub fn full_house(&self) -> Option<(Rank, Rank)> {
        let trips = self.trips();
        let top = *trips.first()?;
        let filler = trips.iter().skip(1).chain(self.pairs().iter()).copied().max()?;
        Some((top, filler))
    }

    /// Returns up to `n` distinct ranks not in `used`, highest first.
    pub fn kickers(&self, used: &[Rank], n: usize) -> Vec<Rank> {
        let mut rest: Vec<Rank> =
            self.groups.iter().map(|(r, _)| *r).filter(|r| !used.contains(r)).collect();
        rest.sort_by(|a, b| b.cmp(a));
        rest.truncate(n);
        rest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_counts(pairs: &[(u8, u8)]) -> [u8; 15] {
        let mut counts = [0u8; 15];
        for &(rank_val, count) in pairs {
            counts[rank_val as usize] = count;
        }
        counts
    }

    #[test]
    fn quad_and_kicker() {
        let groups = RankGroups::from_counts(&make_counts(&[(14, 4), (13, 2), (9, 1)]));
        assert_eq!(groups.quad(), Some(Rank::Ace));
        assert_eq!(groups.kickers(&[Rank::Ace], 1), vec![Rank::King]);
    }

    #[test]
    fn two_trips_make_a_full_house() {
        let groups = RankGroups::from_counts(&make_counts(&[(9, 3), (5, 3), (2, 1)]));
        assert_eq!(groups.full_house(), Some((Rank::Nine, Rank::Five)));
    }

    #[test]
    fn full_house_takes_best_pair() {
        let groups = RankGroups::from_counts(&make_counts(&[(4, 3), (12, 2), (7, 2)]));
        assert_eq!(groups.full_house(), Some((Rank::Four, Rank::Queen)));
    }

    #[test]
    fn three_pairs_leave_third_as_kicker_candidate() {
        let groups = RankGroups::from_counts(&make_counts(&[(14, 2), (13, 2), (10, 2), (3, 1)]));
        assert_eq!(groups.pairs(), vec![Rank::Ace, Rank::King, Rank::Ten]);
        assert_eq!(groups.kickers(&[Rank::Ace, Rank::King], 1), vec![Rank::Ten]);
    }

    #[test]
    fn kickers_truncate() {
        let groups = RankGroups::from_counts(&make_counts(&[(8, 2), (14, 1), (12, 1), (5, 1), (3, 1)]));
        assert_eq!(groups.kickers(&[Rank::Eight], 3), vec![Rank::Ace, Rank::Queen, Rank::Five]);
        assert!(groups.full_house().is_none());
    }
}
