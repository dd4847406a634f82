use crate::cards::{Card, Rank};

/// Groups ranks by their frequency in a hand, sorted by (count desc, rank desc).
///
/// Example: AAAKQ groups as [(Ace, 3), (King, 1), (Queen, 1)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankGroups {
    groups: Vec<(Rank, u8)>,
}

impl RankGroups {
    pub fn from_cards(cards: &[Card]) -> Self {
        let mut counts = [0u8; 15];
        for c in cards {
            counts[c.rank().value() as usize] += 1;
        }
        Self::from_counts(&counts)
    }

    /// Create RankGroups from a rank count array indexed by rank value (2-14).
    pub fn from_counts(rank_counts: &[u8; 15]) -> Self {
        let mut groups: Vec<(Rank, u8)> = Rank::ALL
            .iter()
            .copied()
            .filter_map(|rank| {
                let count = rank_counts[rank.value() as usize];
                (count > 0).then_some((rank, count))
            })
            .collect();

        groups.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));

        Self { groups }
    }

    /// Rank of a four-of-a-kind, if present.
    pub fn quad(&self) -> Option<Rank> {
        self.groups.iter().find(|(_, count)| *count == 4).map(|(rank, _)| *rank)
    }

    /// Rank of the highest three-of-a-kind, if present.
    pub fn trips(&self) -> Option<Rank> {
        self.groups.iter().find(|(_, count)| *count == 3).map(|(rank, _)| *rank)
    }

    /// All pair ranks, descending.
    pub fn pairs(&self) -> Vec<Rank> {
        self.groups.iter().filter(|(_, count)| *count == 2).map(|(rank, _)| *rank).collect()
    }

    /// All singleton (kicker) ranks, descending.
    pub fn kickers(&self) -> Vec<Rank> {
        self.groups.iter().filter(|(_, count)| *count == 1).map(|(rank, _)| *rank).collect()
    }

    /// Count of cards of `rank` in the hand.
    pub fn count_of(&self, rank: Rank) -> u8 {
        self.groups.iter().find(|(r, _)| *r == rank).map(|(_, c)| *c).unwrap_or(0)
    }

    #[cfg(test)]
    pub fn groups(&self) -> &[(Rank, u8)] {
        &self.groups
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
    fn quad() {
        let groups = RankGroups::from_counts(&make_counts(&[(14, 4), (13, 1)])); // AAAAK
        assert_eq!(groups.quad(), Some(Rank::Ace));
        assert_eq!(groups.trips(), None);
        assert!(groups.pairs().is_empty());
        assert_eq!(groups.kickers(), vec![Rank::King]);
    }

    #[test]
    fn full_house_groups() {
        let groups = RankGroups::from_counts(&make_counts(&[(14, 3), (13, 2)])); // AAAKK
        assert_eq!(groups.trips(), Some(Rank::Ace));
        assert_eq!(groups.pairs(), vec![Rank::King]);
        assert_eq!(groups.count_of(Rank::King), 2);
        assert_eq!(groups.count_of(Rank::Two), 0);
    }

    #[test]
    fn two_pair_sorted_high_first() {
        let groups = RankGroups::from_counts(&make_counts(&[(13, 2), (14, 2), (10, 1)])); // AAKKT
        assert_eq!(groups.pairs(), vec![Rank::Ace, Rank::King]);
        assert_eq!(groups.kickers(), vec![Rank::Ten]);
    }

    #[test]
    fn sorting_by_count_then_rank() {
        let groups = RankGroups::from_counts(&make_counts(&[(5, 1), (14, 1), (3, 2)]));
        let ranks: Vec<Rank> = groups.groups().iter().map(|(r, _)| *r).collect();
        assert_eq!(ranks, vec![Rank::Three, Rank::Ace, Rank::Five]);
    }
}
