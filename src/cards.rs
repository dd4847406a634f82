//! Card model: rank, suit and the short "As"/"10♥" notation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ranks valued 2 through 14, Ace high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

const RANK_CHARS: [char; 13] = ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];

impl Rank {
    pub const ALL: [Rank; 13] = {
        use Rank::*;
        [Two, Three, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace]
    };

    pub const fn value(self) -> u8 {
        self as u8
    }

    pub fn from_value(v: u8) -> Option<Rank> {
        let idx = usize::from(v.checked_sub(2)?);
        Self::ALL.get(idx).copied()
    }

    fn index(self) -> usize {
        usize::from(self.value() - 2)
    }

    fn from_char(c: char) -> Option<Rank> {
        let c = c.to_ascii_uppercase();
        RANK_CHARS.iter().position(|&r| r == c).map(|i| Self::ALL[i])
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", RANK_CHARS[self.index()])
    }
}

/// Suits carry no strength; the derived order (c < d < h < s) only makes cards sortable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

const SUIT_LETTERS: [char; 4] = ['c', 'd', 'h', 's'];
const SUIT_SYMBOLS: [char; 4] = ['♣', '♦', '♥', '♠'];

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub fn symbol(self) -> char {
        SUIT_SYMBOLS[self as usize]
    }

    fn from_char(c: char) -> Option<Suit> {
        let c = c.to_ascii_lowercase();
        SUIT_LETTERS
            .iter()
            .position(|&s| s == c)
            .or_else(|| SUIT_SYMBOLS.iter().position(|&s| s == c))
            .map(|i| Self::ALL[i])
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", SUIT_LETTERS[*self as usize])
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardParseError {
    #[error("card '{0}' is empty or has no rank")]
    Malformed(String),
    #[error("unknown rank in '{0}'")]
    Rank(String),
    #[error("unknown suit in '{0}'")]
    Suit(String),
}

/// One card. Cards sort by rank first, suit second.
///
/// ```
/// use holdem_engine::cards::{Card, Rank, Suit};
///
/// let card = Card::new(Rank::Ace, Suit::Spades);
/// assert_eq!(card.to_string(), "As");
/// assert_eq!("A♠".parse::<Card>().unwrap(), card);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub const fn rank(self) -> Rank {
        self.rank
    }

    pub const fn suit(self) -> Suit {
        self.suit
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl FromStr for Card {
    type Err = CardParseError;

    /// Rank then suit: `As`, `td`, `10h`, `Q♣`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let mut chars = t.chars();
        let suit_ch = chars.next_back().ok_or_else(|| CardParseError::Malformed(s.to_string()))?;
        let rank = match chars.as_str() {
            "" => return Err(CardParseError::Malformed(s.to_string())),
            "10" => Some(Rank::Ten),
            r => {
                let mut rc = r.chars();
                match (rc.next(), rc.next()) {
                    (Some(c), None) => Rank::from_char(c),
                    _ => None,
                }
            }
        };
        let rank = rank.ok_or_else(|| CardParseError::Rank(s.to_string()))?;
        let suit = Suit::from_char(suit_ch).ok_or_else(|| CardParseError::Suit(s.to_string()))?;
        Ok(Card::new(rank, suit))
    }
}

/// Parse cards separated by whitespace and/or commas.
///
/// ```
/// use holdem_engine::cards::{parse_cards, Card, Rank, Suit};
///
/// let cards = parse_cards("As, Kd 10♥").unwrap();
/// assert_eq!(cards[0], Card::new(Rank::Ace, Suit::Spades));
/// assert_eq!(cards[1], Card::new(Rank::King, Suit::Diamonds));
/// assert_eq!(cards[2], Card::new(Rank::Ten, Suit::Hearts));
/// ```
pub fn parse_cards(input: &str) -> Result<Vec<Card>, CardParseError> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(Card::from_str)
        .collect()
}
