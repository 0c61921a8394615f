use std::path::PathBuf;

use clap::Parser;

use trumps_bench::config::{ResolvedOutputs, SimulationConfig};
use trumps_bench::logging::init_logging;
use trumps_bench::simulation::SimulationRunner;
use trumps_core::model::seat::Team;

/// Batch simulator for four-player trump trick-taking games.
#[derive(Debug, Parser)]
#[command(
    name = "trumps-bench",
    author,
    version,
    about = "Deterministic trump trick-taking simulator"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/sim.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of games to play.
    #[arg(long, value_name = "GAMES")]
    games: Option<usize>,

    /// Override the master RNG seed.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the number of tricks that wins a game.
    #[arg(long, value_name = "TRICKS")]
    win_score: Option<u32>,

    /// Override the worker thread count (0 uses every core).
    #[arg(long, value_name = "COUNT")]
    threads: Option<usize>,

    /// Exit after validating the configuration (no games are played).
    #[arg(long)]
    validate_only: bool,

    /// Log every policy decision regardless of config.
    #[arg(long)]
    log_decisions: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = SimulationConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(games) = cli.games {
        config.games.count = games;
    }

    if let Some(seed) = cli.seed {
        config.games.seed = Some(seed);
    }

    if let Some(win_score) = cli.win_score {
        config.games.win_score = win_score;
    }

    if let Some(threads) = cli.threads {
        config.games.threads = threads;
    }

    if cli.log_decisions {
        config.logging.decision_details = true;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let games = config.games.count;
    let win_score = config.games.win_score;

    println!(
        "Loaded configuration '{run_id}' ({games} game{}, first to {win_score}, seed {})",
        if games == 1 { "" } else { "s" },
        config.games.master_seed()
    );

    if cli.validate_only {
        println!("Validation-only mode: simulation skipped.");
        return Ok(());
    }

    let logging_guard = init_logging(&config.logging, &outputs)?;
    let runner = SimulationRunner::new(config, outputs)?;

    let result = runner.run()?;
    let team = Team::NorthSouth;
    let (low, high) = result.summary.confidence_interval(team)?;
    println!(
        "Simulation complete for '{run_id}': {} games on {} threads",
        result.games_played,
        runner.threads()
    );
    println!(
        "{team} win rate {:.4} (95% CI [{low:.4}, {high:.4}])",
        result.summary.win_rate(team)
    );
    println!("Summary table: {}", result.summary_path.display());
    if let Some(path) = result.jsonl_path.as_ref() {
        println!("Game log: {} ({} rows)", path.display(), result.rows_written);
    }
    if let Some(guard) = logging_guard.as_ref() {
        println!("Trace log: {}", guard.trace_path.display());
    }

    Ok(())
}
