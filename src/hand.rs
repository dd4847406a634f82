//! A player's hole cards and the shared board.

use crate::cards::{parse_cards, Card, CardParseError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("hole cards must be two cards, got {0}")]
    HoleCount(usize),
    #[error("{0} appears twice in the hole cards")]
    DuplicateHoleCards(Card),
    #[error("the board holds at most five cards, got {0}")]
    TooManyBoardCards(usize),
    #[error("{0} appears twice on the board")]
    DuplicateBoardCards(Card),
    #[error("{0} is both a hole card and a board card")]
    Overlap(Card),
    #[error(transparent)]
    Parse(#[from] CardParseError),
}

/// First card that occurs more than once, if any.
fn first_repeat(cards: &[Card]) -> Option<Card> {
    cards.iter().enumerate().find(|(i, c)| cards[..*i].contains(c)).map(|(_, c)| *c)
}

/// Two private cards dealt to one seat.
///
/// ```
/// use holdem_engine::hand::HoleCards;
///
/// let hole: HoleCards = "As Ks".parse().unwrap();
/// assert_eq!(hole.first().to_string(), "As");
/// assert!("As As".parse::<HoleCards>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HoleCards([Card; 2]);

impl HoleCards {
    pub fn try_new(a: Card, b: Card) -> Result<Self, HandError> {
        if a == b {
            return Err(HandError::DuplicateHoleCards(a));
        }
        Ok(Self([a, b]))
    }

    pub fn from_slice(cards: &[Card]) -> Result<Self, HandError> {
        match *cards {
            [a, b] => Self::try_new(a, b),
            _ => Err(HandError::HoleCount(cards.len())),
        }
    }

    pub fn first(&self) -> Card {
        self.0[0]
    }

    pub fn second(&self) -> Card {
        self.0[1]
    }

    pub fn as_array(&self) -> [Card; 2] {
        self.0
    }

    pub fn contains(&self, card: Card) -> bool {
        self.0.contains(&card)
    }
}

impl FromStr for HoleCards {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slice(&parse_cards(s)?)
    }
}

/// Community cards: empty preflop, then three, four and five.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub const MAX: usize = 5;

    /// A board of at most five distinct cards.
    pub fn try_new(cards: Vec<Card>) -> Result<Self, HandError> {
        if cards.len() > Self::MAX {
            return Err(HandError::TooManyBoardCards(cards.len()));
        }
        if let Some(c) = first_repeat(&cards) {
            return Err(HandError::DuplicateBoardCards(c));
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

    /// Cards come straight off the deck, so no checks are repeated here.
    pub(crate) fn extend<I>(&mut self, cards: I)
    where
        I: IntoIterator<Item = Card>,
    {
        self.cards.extend(cards);
    }
}

impl FromStr for Board {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_new(parse_cards(s)?)
    }
}

/// Check that `hole` and `community` could have come from one deck:
/// no more than five community cards and no card seen twice.
///
/// ```
/// use holdem_engine::cards::parse_cards;
/// use holdem_engine::hand::{validate_holdem, HandError, HoleCards};
///
/// let hole: HoleCards = "As Ks".parse().unwrap();
/// assert!(validate_holdem(&hole, &parse_cards("2c 3c 4c").unwrap()).is_ok());
/// assert!(matches!(
///     validate_holdem(&hole, &parse_cards("2c Ks 4c").unwrap()),
///     Err(HandError::Overlap(_))
/// ));
/// ```
pub fn validate_holdem(hole: &HoleCards, community: &[Card]) -> Result<(), HandError> {
    if community.len() > Board::MAX {
        return Err(HandError::TooManyBoardCards(community.len()));
    }
    if let Some(c) = first_repeat(community) {
        return Err(HandError::DuplicateBoardCards(c));
    }
    if let Some(c) = community.iter().copied().find(|&c| hole.contains(c)) {
        return Err(HandError::Overlap(c));
    }
    if hole.first() == hole.second() {
        return Err(HandError::DuplicateHoleCards(hole.first()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hole_cards_need_two_distinct_cards() {
        let cards = parse_cards("Ah Ah Kd").unwrap();
        assert!(matches!(HoleCards::from_slice(&cards[..2]), Err(HandError::DuplicateHoleCards(_))));
        assert_eq!(HoleCards::from_slice(&cards), Err(HandError::HoleCount(3)));
        assert!(matches!("Ah Zz".parse::<HoleCards>(), Err(HandError::Parse(_))));
    }

    #[test]
    fn board_limits() {
        assert_eq!(
            "2c 3c 4c 5c 6c 7c".parse::<Board>(),
            Err(HandError::TooManyBoardCards(6))
        );
        let dup = "2c 3d 2c".parse::<Board>().unwrap_err();
        assert_eq!(dup.to_string(), "2c appears twice on the board");
        let board: Board = "2c, 3c 4c".parse().unwrap();
        assert_eq!(board.len(), 3);
        assert!(Board::default().is_empty());
    }

    #[test]
    fn overlap_names_the_card() {
        let hole: HoleCards = "As Kd".parse().unwrap();
        let community = parse_cards("2c Kd 9h").unwrap();
        let err = validate_holdem(&hole, &community).unwrap_err();
        assert_eq!(err, HandError::Overlap(community[1]));
    }
}
