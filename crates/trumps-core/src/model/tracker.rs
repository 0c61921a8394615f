use crate::model::card::Card;
use crate::model::card_set::CardSet;
use crate::model::rank::Rank;
use crate::model::seat::Seat;
use crate::model::suit::Suit;

/// Per-suit knowledge derived from the cards played so far this game.
///
/// `short_seats` is evidence only: a seat lands there after playing off-suit
/// on a plain-suit lead, which it may do voluntarily since following suit is
/// never enforced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuitTracker {
    highest_unplayed: [Option<Rank>; 4],
    short_seats: [[bool; 4]; 4],
}

impl SuitTracker {
    pub const fn new() -> Self {
        Self {
            highest_unplayed: [Some(Rank::HIGHEST); 4],
            short_seats: [[false; 4]; 4],
        }
    }

    /// Tracker for a position where `played` is already out of the game; no
    /// seat is marked short.
    pub fn from_played(played: &CardSet) -> Self {
        let mut tracker = Self::new();
        for suit in Suit::ALL {
            tracker.highest_unplayed[suit.index()] = Rank::ORDERED
                .iter()
                .rev()
                .copied()
                .find(|rank| !played.contains_rank(suit, *rank));
        }
        tracker
    }

    /// Greatest rank of `suit` not yet played, `None` once the suit is exhausted.
    pub fn highest_unplayed(&self, suit: Suit) -> Option<Rank> {
        self.highest_unplayed[suit.index()]
    }

    /// The card naming `highest_unplayed(suit)`, when one remains.
    pub fn top_card(&self, suit: Suit) -> Option<Card> {
        self.highest_unplayed(suit).map(|rank| Card::new(suit, rank))
    }

    pub fn is_short(&self, suit: Suit, seat: Seat) -> bool {
        self.short_seats[suit.index()][seat.index()]
    }

    pub fn any_short(&self, suit: Suit, seats: [Seat; 2]) -> bool {
        seats.iter().any(|seat| self.is_short(suit, *seat))
    }

    pub fn short_seats(&self, suit: Suit) -> impl Iterator<Item = Seat> + '_ {
        Seat::LOOP
            .iter()
            .copied()
            .filter(move |seat| self.is_short(suit, *seat))
    }

    /// Applies one play; `played` must already contain `card`.
    pub(crate) fn record_play(
        &mut self,
        seat: Seat,
        card: Card,
        lead_suit: Suit,
        played: &CardSet,
    ) {
        let slot = &mut self.highest_unplayed[card.suit.index()];
        if *slot == Some(card.rank) {
            let mut next = card.rank.lower();
            while let Some(rank) = next {
                if !played.contains_rank(card.suit, rank) {
                    break;
                }
                next = rank.lower();
            }
            *slot = next;
        }

        if !lead_suit.is_trump() && card.suit != lead_suit {
            self.short_seats[lead_suit.index()][seat.index()] = true;
        }
    }
}

impl Default for SuitTracker {
    fn default() -> Self {
        Self::new()
    }
}
