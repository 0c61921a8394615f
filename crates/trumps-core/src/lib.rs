#![deny(warnings)]
pub mod error;
pub mod game;
pub mod model;

pub use error::GameError;
pub use game::engine::{
    DEFAULT_WIN_SCORE, DecisionContext, GameOutcome, MAX_WIN_SCORE, SeatStrategy, play_game,
    play_trick,
};
pub use game::state::{GameState, TrickOutcome};
