use crate::error::GameError;
use crate::model::card::Card;
use crate::model::card_set::CardSet;
use crate::model::rank::Rank;
use crate::model::suit::Suit;

/// Cards held by one seat, kept sorted by (suit, rank).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn with_cards(cards: Vec<Card>) -> Self {
        let mut hand = Self { cards };
        hand.cards.sort();
        hand
    }

    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(index) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(index);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn contains_rank(&self, suit: Suit, rank: Rank) -> bool {
        self.contains(Card::new(suit, rank))
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card_set(&self) -> CardSet {
        CardSet::from_cards(&self.cards)
    }

    pub fn in_suit(&self, suit: Suit) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().copied().filter(move |card| card.suit == suit)
    }

    pub fn count_in(&self, suit: Suit) -> usize {
        self.in_suit(suit).count()
    }

    pub fn has_suit(&self, suit: Suit) -> bool {
        self.cards.iter().any(|card| card.suit == suit)
    }

    pub fn has_trump(&self) -> bool {
        self.has_suit(Suit::Trump)
    }

    pub fn plain_cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().copied().filter(|card| !card.is_trump())
    }

    pub fn lowest_in(&self, suit: Suit) -> Result<Card, GameError> {
        lowest_of(self.in_suit(suit))
    }
}

/// Lowest rank among `cards`, ignoring suit; ties keep the first card seen.
pub fn lowest_of(cards: impl IntoIterator<Item = Card>) -> Result<Card, GameError> {
    cards
        .into_iter()
        .min_by_key(|card| card.rank)
        .ok_or(GameError::EmptyCardSelection)
}
