use crate::model::seat::Team;
use serde::{Deserialize, Serialize};

/// Tricks won per team in the current game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBoard {
    tricks: [u32; 2],
}

impl ScoreBoard {
    pub const fn new() -> Self {
        Self { tricks: [0; 2] }
    }

    pub fn credit_trick(&mut self, team: Team) {
        self.tricks[team.index()] += 1;
    }

    pub fn tricks(&self, team: Team) -> u32 {
        self.tricks[team.index()]
    }

    pub fn totals(&self) -> [u32; 2] {
        self.tricks
    }

    /// First team at or above `target`, if any.
    pub fn leader_at(&self, target: u32) -> Option<Team> {
        Team::BOTH
            .iter()
            .copied()
            .find(|team| self.tricks(*team) >= target)
    }
}
