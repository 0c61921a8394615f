use super::state::{GameState, HAND_SIZE, TrickOutcome};
use crate::error::GameError;
use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::score::ScoreBoard;
use crate::model::seat::{Seat, Team};
use crate::model::suit::Suit;
use crate::model::tracker::SuitTracker;
use crate::model::trick::TrickState;

pub const DEFAULT_WIN_SCORE: u32 = 7;
/// Highest target some team is certain to reach within one deal.
pub const MAX_WIN_SCORE: u32 = (HAND_SIZE as u32).div_ceil(2);

/// Everything a seat may look at when choosing a card.
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext<'a> {
    pub seat: Seat,
    /// Position within the trick, 0 for the leader through 3 for the last seat.
    pub turn_index: usize,
    pub hand: &'a Hand,
    pub tracker: &'a SuitTracker,
    pub trick: &'a TrickState,
}

impl DecisionContext<'_> {
    pub fn is_leading(&self) -> bool {
        self.turn_index == 0
    }

    pub fn is_last(&self) -> bool {
        self.turn_index == 3
    }

    pub fn partner_winning(&self) -> bool {
        self.trick.current_winner() == self.seat.partner()
    }

    /// Neither opponent has been seen playing off-suit on a `suit` lead.
    pub fn opponents_follow(&self, suit: Suit) -> bool {
        !self.tracker.any_short(suit, self.seat.opponents())
    }
}

/// Picks the card a seat plays. Implementations must return a card from
/// `ctx.hand`; anything else aborts the game with `CardNotInHand`.
pub trait SeatStrategy {
    fn choose_card(&mut self, ctx: &DecisionContext<'_>) -> Result<Card, GameError>;
}

impl<F> SeatStrategy for F
where
    F: FnMut(&DecisionContext<'_>) -> Result<Card, GameError>,
{
    fn choose_card(&mut self, ctx: &DecisionContext<'_>) -> Result<Card, GameError> {
        self(ctx)
    }
}

/// Final state of a finished game, kept for reporting.
#[derive(Debug, Clone)]
pub struct GameOutcome {
    pub winning_team: Team,
    pub scores: ScoreBoard,
    pub tricks_played: u32,
    pub starting_hands: [Hand; 4],
}

/// Runs one whole trick, asking `strategy` for each seat's card in turn order.
pub fn play_trick<S>(state: &mut GameState, strategy: &mut S) -> Result<TrickOutcome, GameError>
where
    S: SeatStrategy + ?Sized,
{
    let leader = state.leader();
    for turn_index in 0..4 {
        let seat = leader.advance(turn_index);
        let card = {
            let ctx = DecisionContext {
                seat,
                turn_index,
                hand: state.hand(seat),
                tracker: state.tracker(),
                trick: state.current_trick(),
            };
            strategy.choose_card(&ctx)?
        };

        if turn_index == 0 {
            state.lead(seat, card)?;
        } else if let Some(outcome) = state.follow(seat, card)? {
            return Ok(outcome);
        }
    }
    Err(GameError::InvariantViolation(
        "trick did not resolve after four plays".to_string(),
    ))
}

/// Plays tricks until a team reaches `win_score`, stopping at the first trick
/// that gets there. Targets above [`MAX_WIN_SCORE`] can leave both teams short
/// when the hands run out, which is reported as an invariant violation.
pub fn play_game<S>(
    state: &mut GameState,
    strategy: &mut S,
    win_score: u32,
) -> Result<GameOutcome, GameError>
where
    S: SeatStrategy + ?Sized,
{
    loop {
        if let Some(winning_team) = state.winner(win_score) {
            return Ok(GameOutcome {
                winning_team,
                scores: *state.scores(),
                tricks_played: state.tricks_played(),
                starting_hands: state.starting_hands().clone(),
            });
        }
        if Seat::LOOP.iter().any(|seat| state.hand(*seat).is_empty()) {
            return Err(GameError::InvariantViolation(format!(
                "hands ran out at {:?} before a team reached {win_score}",
                state.scores().totals()
            )));
        }
        play_trick(state, strategy)?;
        state.check_invariants()?;
    }
}
