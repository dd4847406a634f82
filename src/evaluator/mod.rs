//! Best-hand evaluation for any 2..=7 cards.
//!
//! Every five-card subset is scored with [`score_five`] and the maximum is kept.
//! With fewer than five cards the hand is ranked from its rank groups only.

pub(crate) mod combinations;
pub(crate) mod rank_groups;

use crate::cards::{Card, Rank};
use crate::hand::{validate_holdem, HandError, HoleCards};
use combinations::Combinations;
use core::cmp::Ordering;
use rank_groups::RankGroups;
use std::collections::HashSet;
use std::fmt;

/// Poker hand category from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
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
            Category::Pair => "One Pair",
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

/// A ranked hand: category, tiebreak rank values and the cards backing it.
///
/// Ordering compares the category first, then the tiebreak element-wise.
/// Two evaluations with equal category and tiebreak are equal (a tie),
/// regardless of suits.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Evaluation {
    pub category: Category,
    tiebreak: Vec<u8>,
    cards: Vec<Card>,
}

impl Evaluation {
    /// Rank values (2..=14) compared left to right within a category.
    /// Straights use 5 as the high card of the wheel.
    pub fn tiebreak(&self) -> &[u8] {
        &self.tiebreak
    }

    /// Cards backing this ranking, most significant first.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Ord for Evaluation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category.cmp(&other.category).then_with(|| self.tiebreak.cmp(&other.tiebreak))
    }
}

impl PartialOrd for Evaluation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Evaluation {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Evaluation {}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (", self.category)?;
        for (i, c) in self.cards.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{c}")?;
        }
        f.write_str(")")
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),
    #[error("not enough cards to evaluate: {0}")]
    NotEnoughCards(usize),
    #[error("too many cards to evaluate: {0}")]
    TooManyCards(usize),
    #[error("duplicate card: {0}")]
    DuplicateCard(Card),
}

/// Evaluate a player's best hand from hole cards plus 0..=5 community cards.
///
/// ```
/// use holdem_engine::cards::parse_cards;
/// use holdem_engine::evaluator::{evaluate, Category};
/// use holdem_engine::hand::HoleCards;
///
/// let hole: HoleCards = "Ah Ad".parse().unwrap();
/// let community = parse_cards("As Ac Kh").unwrap();
/// let eval = evaluate(&hole, &community).unwrap();
/// assert_eq!(eval.category, Category::FourOfAKind);
/// assert_eq!(eval.tiebreak(), &[14, 13]);
/// ```
pub fn evaluate(hole: &HoleCards, community: &[Card]) -> Result<Evaluation, EvalError> {
    validate_holdem(hole, community)?;
    let mut cards = Vec::with_capacity(2 + community.len());
    cards.extend_from_slice(&hole.as_array());
    cards.extend_from_slice(community);
    evaluate_cards(&cards)
}

/// Evaluate the best ranking available from 2..=7 distinct cards.
pub fn evaluate_cards(cards: &[Card]) -> Result<Evaluation, EvalError> {
    if cards.len() < 2 {
        return Err(EvalError::NotEnoughCards(cards.len()));
    }
    if cards.len() > 7 {
        return Err(EvalError::TooManyCards(cards.len()));
    }
    let mut seen = HashSet::with_capacity(cards.len());
    for &c in cards {
        if !seen.insert(c) {
            return Err(EvalError::DuplicateCard(c));
        }
    }
    if cards.len() < 5 {
        return Ok(classify(cards));
    }

    let mut best: Option<Evaluation> = None;
    for idx in Combinations::<5>::new(cards.len()) {
        let eval = score_five(&idx.map(|i| cards[i]));
        if best.as_ref().map_or(true, |b| eval > *b) {
            best = Some(eval);
        }
    }
    best.ok_or(EvalError::NotEnoughCards(cards.len()))
}

/// Score exactly five cards.
pub fn score_five(cards: &[Card; 5]) -> Evaluation {
    classify(cards)
}

/// Compare two hands sharing the same community cards.
///
/// ```
/// use holdem_engine::cards::parse_cards;
/// use holdem_engine::evaluator::compare_holdem;
/// use holdem_engine::hand::HoleCards;
/// use std::cmp::Ordering;
///
/// let community = parse_cards("Qc Jd 9h 3s 2c").unwrap();
/// let a: HoleCards = "As Ah".parse().unwrap();
/// let b: HoleCards = "Ks Kh".parse().unwrap();
/// assert_eq!(compare_holdem(&a, &b, &community).unwrap(), Ordering::Greater);
/// ```
pub fn compare_holdem(
    a: &HoleCards,
    b: &HoleCards,
    community: &[Card],
) -> Result<Ordering, EvalError> {
    let va = evaluate(a, community)?;
    let vb = evaluate(b, community)?;
    Ok(va.cmp(&vb))
}

fn classify(cards: &[Card]) -> Evaluation {
    let mut sorted = cards.to_vec();
    sorted.sort_by(|a, b| b.rank().cmp(&a.rank()).then(b.suit().cmp(&a.suit())));

    let groups = RankGroups::from_cards(&sorted);
    let ranks_desc: Vec<u8> = sorted.iter().map(|c| c.rank().value()).collect();
    // straights and flushes need all five cards
    let is_flush = sorted.len() == 5 && sorted.iter().all(|c| c.suit() == sorted[0].suit());
    let straight = straight_high(&ranks_desc);

    let (category, tiebreak) = rank_hand(&groups, is_flush, straight, &ranks_desc);

    let mut ordered = sorted;
    ordered.sort_by(|a, b| {
        groups
            .count_of(b.rank())
            .cmp(&groups.count_of(a.rank()))
            .then(b.rank().cmp(&a.rank()))
            .then(b.suit().cmp(&a.suit()))
    });
    if straight == Some(Rank::Five.value()) {
        // wheel: the ace plays low
        ordered.rotate_left(1);
    }

    Evaluation { category, tiebreak, cards: ordered }
}

fn rank_hand(
    groups: &RankGroups,
    is_flush: bool,
    straight: Option<u8>,
    ranks_desc: &[u8],
) -> (Category, Vec<u8>) {
    let kickers: Vec<u8> = groups.kickers().into_iter().map(Rank::value).collect();
    let with_kickers =
        |lead: &[u8]| lead.iter().chain(kickers.iter()).copied().collect::<Vec<u8>>();

    if let (true, Some(high)) = (is_flush, straight) {
        let category =
            if high == Rank::Ace.value() { Category::RoyalFlush } else { Category::StraightFlush };
        return (category, vec![high]);
    }
    if let Some(quad) = groups.quad() {
        return (Category::FourOfAKind, with_kickers(&[quad.value()]));
    }
    let pairs = groups.pairs();
    if let (Some(trips), Some(pair)) = (groups.trips(), pairs.first()) {
        return (Category::FullHouse, vec![trips.value(), pair.value()]);
    }
    if is_flush {
        return (Category::Flush, ranks_desc.to_vec());
    }
    if let Some(high) = straight {
        return (Category::Straight, vec![high]);
    }
    if let Some(trips) = groups.trips() {
        return (Category::ThreeOfAKind, with_kickers(&[trips.value()]));
    }
    if pairs.len() >= 2 {
        return (Category::TwoPair, with_kickers(&[pairs[0].value(), pairs[1].value()]));
    }
    if let Some(pair) = pairs.first() {
        return (Category::Pair, with_kickers(&[pair.value()]));
    }
    (Category::HighCard, ranks_desc.to_vec())
}

/// High card of a five-card straight given ranks sorted descending; 5 for the wheel.
fn straight_high(ranks_desc: &[u8]) -> Option<u8> {
    if ranks_desc.len() != 5 {
        return None;
    }
    if ranks_desc.windows(2).all(|w| w[0] == w[1] + 1) {
        return Some(ranks_desc[0]);
    }
    if ranks_desc == [14, 5, 4, 3, 2] {
        return Some(5);
    }
    None
}
