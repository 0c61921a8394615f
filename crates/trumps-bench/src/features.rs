use std::fmt;

use serde::Serialize;
use trumps_core::model::hand::Hand;
use trumps_core::model::rank::Rank;
use trumps_core::model::suit::Suit;

/// Coarse shape of a starting hand, used to bucket win rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct HandFeatures {
    pub trump_ace: u8,
    /// Trumps ranked 10 through 13.
    pub high_trumps: u8,
    /// Trumps ranked below 10.
    pub low_trumps: u8,
    pub plain_aces: u8,
    /// Length of the shortest plain suit held.
    pub shortest_plain: u8,
}

impl HandFeatures {
    pub fn classify(hand: &Hand) -> Self {
        let mut features = Self {
            trump_ace: 0,
            high_trumps: 0,
            low_trumps: 0,
            plain_aces: 0,
            shortest_plain: 0,
        };

        for card in hand.in_suit(Suit::Trump) {
            match card.rank {
                Rank::Ace => features.trump_ace = 1,
                rank if rank >= Rank::Ten => features.high_trumps += 1,
                _ => features.low_trumps += 1,
            }
        }

        features.plain_aces = Suit::PLAIN
            .iter()
            .filter(|suit| hand.contains_rank(**suit, Rank::Ace))
            .count() as u8;
        features.shortest_plain = Suit::PLAIN
            .iter()
            .map(|suit| hand.count_in(*suit))
            .min()
            .unwrap_or(0) as u8;
        features
    }

    /// `trump_ace|high_trumps|low_trumps|plain_aces|shortest_plain`.
    pub fn signature(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for HandFeatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}|{}",
            self.trump_ace, self.high_trumps, self.low_trumps, self.plain_aces, self.shortest_plain
        )
    }
}
