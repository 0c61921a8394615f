use crate::error::GameError;
use crate::model::card::Card;
use crate::model::card_set::CardSet;
use crate::model::deck::{DECK_SIZE, Deck};
use crate::model::hand::Hand;
use crate::model::score::ScoreBoard;
use crate::model::seat::{Seat, Team};
use crate::model::tracker::SuitTracker;
use crate::model::trick::{Play, TrickState};
use std::array;
use tracing::{Level, event};

pub const HAND_SIZE: usize = 13;

/// Everything one game owns, from the deal until a team reaches the target.
#[derive(Debug, Clone)]
pub struct GameState {
    hands: [Hand; 4],
    starting_hands: [Hand; 4],
    scores: ScoreBoard,
    played: CardSet,
    tracker: SuitTracker,
    current_trick: TrickState,
    tricks_played: u32,
}

/// Result of one resolved trick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrickOutcome {
    pub winner: Seat,
    pub winning_team: Team,
    pub plays: Vec<Play>,
}

impl GameState {
    /// Shuffles a fresh deck with `rng` and deals it; North leads first.
    pub fn new_game<R: rand::Rng + ?Sized>(rng: &mut R) -> Result<Self, GameError> {
        let deck = Deck::shuffled(rng);
        Self::deal(&deck)
    }

    /// Round-robin deal: card `i` goes to seat `i % 4`.
    pub fn deal(deck: &Deck) -> Result<Self, GameError> {
        if deck.cards().len() != DECK_SIZE {
            return Err(GameError::InvariantViolation(format!(
                "deck holds {} cards, expected {DECK_SIZE}",
                deck.cards().len()
            )));
        }

        let mut dealt: [Vec<Card>; 4] = array::from_fn(|_| Vec::with_capacity(HAND_SIZE));
        for (index, card) in deck.cards().iter().enumerate() {
            dealt[index % 4].push(*card);
        }
        let hands = dealt.map(Hand::with_cards);

        let state = Self::from_hands(hands, Seat::North);
        state.check_invariants()?;
        Ok(state)
    }

    /// Builds a game from explicit hands; cards held by nobody count as
    /// already played.
    pub fn from_hands(hands: [Hand; 4], leader: Seat) -> Self {
        let held = hands
            .iter()
            .fold(CardSet::new(), |acc, hand| acc.union(hand.card_set()));
        let played = held.complement();
        let tracker = SuitTracker::from_played(&played);

        Self {
            starting_hands: hands.clone(),
            hands,
            scores: ScoreBoard::new(),
            played,
            tracker,
            current_trick: TrickState::new(leader),
            tricks_played: 0,
        }
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat.index()]
    }

    /// Read-only snapshot of the hand each seat was dealt.
    pub fn starting_hands(&self) -> &[Hand; 4] {
        &self.starting_hands
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn played(&self) -> &CardSet {
        &self.played
    }

    pub fn tracker(&self) -> &SuitTracker {
        &self.tracker
    }

    pub fn current_trick(&self) -> &TrickState {
        &self.current_trick
    }

    pub fn leader(&self) -> Seat {
        self.current_trick.leader()
    }

    pub fn tricks_played(&self) -> u32 {
        self.tricks_played
    }

    pub fn winner(&self, win_score: u32) -> Option<Team> {
        self.scores.leader_at(win_score)
    }

    /// Opens the trick with `card` from the current leader.
    pub fn lead(&mut self, seat: Seat, card: Card) -> Result<(), GameError> {
        self.current_trick.check_turn(seat, true)?;
        self.take_from_hand(seat, card)?;
        self.current_trick.open(card);
        self.record_play(seat, card);
        Ok(())
    }

    /// Adds a follow to the open trick. Once the fourth card lands the trick
    /// is scored and the outcome returned.
    pub fn follow(&mut self, seat: Seat, card: Card) -> Result<Option<TrickOutcome>, GameError> {
        self.current_trick.check_turn(seat, false)?;
        self.take_from_hand(seat, card)?;
        self.current_trick.follow(seat, card);
        self.record_play(seat, card);

        if self.current_trick.is_complete() {
            Ok(Some(self.resolve_trick()))
        } else {
            Ok(None)
        }
    }

    /// Disjointness of the hands and hands ∪ played == full deck.
    pub fn check_invariants(&self) -> Result<(), GameError> {
        let mut seen = self.played;
        for seat in Seat::LOOP {
            let hand = self.hand(seat).card_set();
            if hand.len() != self.hand(seat).len() {
                return Err(GameError::InvariantViolation(format!(
                    "{seat} holds duplicate cards"
                )));
            }
            if seen.intersects(hand) {
                return Err(GameError::InvariantViolation(format!(
                    "{seat} holds a card that is already played or held elsewhere"
                )));
            }
            seen = seen.union(hand);
        }
        if !seen.is_full_deck() {
            return Err(GameError::InvariantViolation(format!(
                "hands and played cards cover {} of {DECK_SIZE} cards",
                seen.len()
            )));
        }
        Ok(())
    }

    fn take_from_hand(&mut self, seat: Seat, card: Card) -> Result<(), GameError> {
        if self.hands[seat.index()].remove(card) {
            Ok(())
        } else {
            Err(GameError::CardNotInHand { seat, card })
        }
    }

    fn record_play(&mut self, seat: Seat, card: Card) {
        self.played.insert(card);
        if let Some(lead_suit) = self.current_trick.lead_suit() {
            self.tracker.record_play(seat, card, lead_suit, &self.played);
        }
    }

    fn resolve_trick(&mut self) -> TrickOutcome {
        let winner = self.current_trick.current_winner();
        let winning_team = winner.team();
        self.scores.credit_trick(winning_team);
        self.tricks_played += 1;

        let finished = std::mem::replace(&mut self.current_trick, TrickState::new(winner));
        event!(
            target: "trumps_core::trick",
            Level::DEBUG,
            trick = self.tricks_played,
            leader = %finished.leader(),
            winner = %winner,
            cut = finished.is_cut(),
            score = ?self.scores.totals(),
        );

        TrickOutcome {
            winner,
            winning_team,
            plays: finished.plays().to_vec(),
        }
    }
}
