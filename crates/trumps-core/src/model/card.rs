use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Field order matters: the derived ordering is (suit, rank).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// Position in the 52-card universe, grouped by suit.
    pub const fn index(self) -> usize {
        self.suit.index() * 13 + self.rank.offset()
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        let Some(suit) = Suit::from_index(index / 13) else {
            return None;
        };
        match Rank::from_value((index % 13) as u8 + 2) {
            Some(rank) => Some(Self::new(suit, rank)),
            None => None,
        }
    }

    pub const fn is_trump(self) -> bool {
        self.suit.is_trump()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.suit, self.rank)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCardError {
    #[error("card text is empty")]
    Empty,
    #[error("unknown suit letter '{0}'")]
    UnknownSuit(char),
    #[error("invalid rank '{0}' (expected 2..=14)")]
    InvalidRank(String),
}

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        let mut chars = text.chars();
        let letter = chars.next().ok_or(ParseCardError::Empty)?;
        let suit = Suit::from_letter(letter).ok_or(ParseCardError::UnknownSuit(letter))?;
        let rest = chars.as_str();
        let rank = rest
            .parse::<u8>()
            .ok()
            .and_then(Rank::from_value)
            .ok_or_else(|| ParseCardError::InvalidRank(rest.to_string()))?;
        Ok(Card::new(suit, rank))
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}

impl TryFrom<String> for Card {
    type Error = ParseCardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
