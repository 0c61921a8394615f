//! Parallel game execution with results returned in game order.
//!
//! The runner owns the master RNG and hands each worker only a game index
//! and a seed, so the same master seed yields the same records whatever the
//! pool size.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::ThreadPool;
use rayon::prelude::*;
use trumps_bot::RuleBasedPolicy;
use trumps_core::GameError;
use trumps_core::game::engine::play_game;
use trumps_core::game::state::GameState;

use super::{GameRecord, RunnerError};
use crate::features::HandFeatures;

/// One game to play: its position in the run and its private seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameUnit {
    pub game_index: usize,
    pub seed: u64,
}

/// Plays a single seeded game to `win_score`.
pub fn play_unit(
    unit: GameUnit,
    policy: RuleBasedPolicy,
    win_score: u32,
) -> Result<GameRecord, RunnerError> {
    let fail = |source: GameError| RunnerError::Game {
        game_index: unit.game_index,
        seed: unit.seed,
        source,
    };

    let mut rng = StdRng::seed_from_u64(unit.seed);
    let mut state = GameState::new_game(&mut rng).map_err(fail)?;
    let mut policy = policy;
    let outcome = play_game(&mut state, &mut policy, win_score).map_err(fail)?;

    Ok(GameRecord {
        game_index: unit.game_index,
        seed: unit.seed,
        winning_team: outcome.winning_team,
        score: outcome.scores.totals(),
        tricks: outcome.tricks_played,
        signatures: outcome
            .starting_hands
            .each_ref()
            .map(|hand| HandFeatures::classify(hand).signature()),
    })
}

/// Plays every unit on `pool`. The first failing game aborts the batch.
pub fn play_batch(
    pool: &ThreadPool,
    units: Vec<GameUnit>,
    policy: RuleBasedPolicy,
    win_score: u32,
) -> Result<Vec<GameRecord>, RunnerError> {
    let mut records = pool.install(|| {
        units
            .into_par_iter()
            .map(|unit| play_unit(unit, policy, win_score))
            .collect::<Result<Vec<_>, _>>()
    })?;
    records.sort_by_key(|record| record.game_index);
    Ok(records)
}
