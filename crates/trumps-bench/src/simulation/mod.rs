mod batch;

pub use batch::{GameUnit, play_batch, play_unit};

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};
use trumps_bot::{PolicyOptions, RuleBasedPolicy};
use trumps_core::GameError;
use trumps_core::model::seat::Team;

use crate::analytics::{AnalyticsError, SimulationSummary};
use crate::config::{ResolvedOutputs, SimulationConfig};

const BATCH_GAMES: usize = 1_024;

/// One finished game; also the JSONL row layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    pub game_index: usize,
    pub seed: u64,
    pub winning_team: Team,
    pub score: [u32; 2],
    pub tricks: u32,
    /// Starting-hand feature signature per seat, North first.
    pub signatures: [String; 4],
}

/// Primary entry point for running a batch of simulated games.
pub struct SimulationRunner {
    config: SimulationConfig,
    outputs: ResolvedOutputs,
    policy: RuleBasedPolicy,
    pool: ThreadPool,
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub games_played: usize,
    pub rows_written: usize,
    pub jsonl_path: Option<PathBuf>,
    pub summary_path: PathBuf,
    pub summary: SimulationSummary,
}

impl SimulationRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: SimulationConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.games.threads)
            .build()?;
        let options = PolicyOptions::from_env();
        let decision_details = options.decision_details() || config.logging.decision_details;
        let options = options.with_decision_details(decision_details);

        Ok(Self {
            config,
            outputs,
            policy: RuleBasedPolicy::new(options),
            pool,
        })
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Play every configured game, streaming JSONL rows in game order.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.summary_md.parent())?;
        let mut writer = match self.outputs.jsonl.as_ref() {
            Some(path) => {
                ensure_parent(path.parent())?;
                Some(BufWriter::new(File::create(path)?))
            }
            None => None,
        };

        let games = &self.config.games;
        let mut master = StdRng::seed_from_u64(games.master_seed());
        let mut summary = SimulationSummary::new();
        let mut rows_written = 0usize;
        let mut next_index = 0usize;

        while next_index < games.count {
            let len = BATCH_GAMES.min(games.count - next_index);
            let units: Vec<GameUnit> = (next_index..next_index + len)
                .map(|game_index| GameUnit {
                    game_index,
                    seed: master.next_u64(),
                })
                .collect();

            let records = play_batch(&self.pool, units, self.policy, games.win_score)?;
            let mut batch = SimulationSummary::new();
            for record in &records {
                batch.record_game(record);
                if let Some(writer) = writer.as_mut() {
                    serde_json::to_writer(&mut *writer, record)?;
                    writer.write_all(b"\n")?;
                    rows_written += 1;
                }
            }
            summary.merge(&batch);
            next_index += len;

            event!(
                target: "trumps_bench::run",
                Level::INFO,
                run_id = %self.config.run_id,
                completed = next_index,
                total = games.count,
                north_south_wins = summary.team_wins[Team::NorthSouth.index()],
            );
        }

        if let Some(writer) = writer.as_mut() {
            writer.flush()?;
        }
        summary.write_markdown(
            &self.outputs.summary_md,
            &self.config.run_id,
            games.win_score,
        )?;

        Ok(RunSummary {
            games_played: games.count,
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            summary,
        })
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize game row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("game {game_index} (seed {seed}) failed: {source}")]
    Game {
        game_index: usize,
        seed: u64,
        #[source]
        source: GameError,
    },
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
}
