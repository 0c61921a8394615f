use crate::error::GameError;
use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::seat::Seat;
use crate::model::suit::Suit;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Play {
    pub seat: Seat,
    pub card: Card,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrickPhase {
    AwaitingLead,
    InTrick,
    Resolved,
}

/// Running state of a single trick: who leads, what was led, who is winning.
#[derive(Debug, Clone)]
pub struct TrickState {
    leader: Seat,
    lead_suit: Option<Suit>,
    highest_rank: Option<Rank>,
    cut: bool,
    current_winner: Seat,
    plays: Vec<Play>,
}

impl TrickState {
    pub fn new(leader: Seat) -> Self {
        Self {
            leader,
            lead_suit: None,
            highest_rank: None,
            cut: false,
            current_winner: leader,
            plays: Vec::with_capacity(4),
        }
    }

    pub fn leader(&self) -> Seat {
        self.leader
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.lead_suit
    }

    /// Rank of the card currently winning the trick.
    pub fn highest_rank(&self) -> Option<Rank> {
        self.highest_rank
    }

    pub fn is_cut(&self) -> bool {
        self.cut
    }

    pub fn current_winner(&self) -> Seat {
        self.current_winner
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn phase(&self) -> TrickPhase {
        match self.plays.len() {
            0 => TrickPhase::AwaitingLead,
            4 => TrickPhase::Resolved,
            _ => TrickPhase::InTrick,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase() == TrickPhase::Resolved
    }

    /// Seat due to play next, `None` once all four have played.
    pub fn next_seat(&self) -> Option<Seat> {
        if self.is_complete() {
            None
        } else {
            Some(self.leader.advance(self.plays.len()))
        }
    }

    /// Checks that `seat` may play `as_lead` (or follow) right now.
    pub(crate) fn check_turn(&self, seat: Seat, as_lead: bool) -> Result<(), GameError> {
        match (self.phase(), as_lead) {
            (TrickPhase::Resolved, _) => return Err(GameError::TrickComplete),
            (TrickPhase::AwaitingLead, false) => return Err(GameError::NoLeadPlayed),
            (TrickPhase::InTrick, true) => return Err(GameError::LeadAlreadyPlayed),
            _ => {}
        }
        let expected = self.leader.advance(self.plays.len());
        if expected != seat {
            return Err(GameError::OutOfTurn {
                expected,
                actual: seat,
            });
        }
        Ok(())
    }

    pub(crate) fn open(&mut self, card: Card) {
        self.lead_suit = Some(card.suit);
        self.highest_rank = Some(card.rank);
        self.cut = false;
        self.current_winner = self.leader;
        self.plays.push(Play {
            seat: self.leader,
            card,
        });
    }

    /// Records a follow and applies the winner-update rule. Returns whether the
    /// seat took the lead.
    pub(crate) fn follow(&mut self, seat: Seat, card: Card) -> bool {
        self.plays.push(Play { seat, card });
        let (Some(lead_suit), Some(highest)) = (self.lead_suit, self.highest_rank) else {
            return false;
        };

        let takes_lead = if !self.cut && card.suit == lead_suit && card.rank > highest {
            true
        } else if !self.cut && card.is_trump() && !lead_suit.is_trump() {
            // The first trump on a plain lead wins outright, whatever its rank.
            self.cut = true;
            true
        } else {
            self.cut && card.is_trump() && card.rank > highest
        };

        if takes_lead {
            self.highest_rank = Some(card.rank);
            self.current_winner = seat;
        }
        takes_lead
    }
}
