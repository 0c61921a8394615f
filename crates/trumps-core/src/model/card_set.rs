//! Card sets as a 52-bit bitboard, one bit per [`Card::index`].

use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;

const FULL_DECK: u64 = (1 << 52) - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct CardSet {
    bits: u64,
}

impl CardSet {
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    pub const fn full() -> Self {
        Self { bits: FULL_DECK }
    }

    pub fn from_cards<'a>(cards: impl IntoIterator<Item = &'a Card>) -> Self {
        let mut set = Self::new();
        for card in cards {
            set.insert(*card);
        }
        set
    }

    /// Inserts the card and reports whether it was newly added.
    pub fn insert(&mut self, card: Card) -> bool {
        let mask = 1u64 << card.index();
        let fresh = self.bits & mask == 0;
        self.bits |= mask;
        fresh
    }

    pub const fn contains(&self, card: Card) -> bool {
        self.bits & (1u64 << card.index()) != 0
    }

    pub fn contains_rank(&self, suit: Suit, rank: Rank) -> bool {
        self.contains(Card::new(suit, rank))
    }

    pub const fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub const fn union(self, other: CardSet) -> CardSet {
        CardSet {
            bits: self.bits | other.bits,
        }
    }

    /// Every card of the deck not in this set.
    pub const fn complement(self) -> CardSet {
        CardSet {
            bits: !self.bits & FULL_DECK,
        }
    }

    pub const fn intersects(self, other: CardSet) -> bool {
        self.bits & other.bits != 0
    }

    pub const fn is_full_deck(&self) -> bool {
        self.bits == FULL_DECK
    }

    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        (0..52).filter_map(move |index| {
            if self.bits & (1u64 << index) != 0 {
                Card::from_index(index)
            } else {
                None
            }
        })
    }
}
