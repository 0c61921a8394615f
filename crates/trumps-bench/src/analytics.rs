use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use thiserror::Error;
use trumps_core::model::seat::{Seat, Team};

use crate::simulation::GameRecord;

const CONFIDENCE_LEVEL: f64 = 0.95;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("statistics unavailable: {0}")]
    Stats(String),
}

/// Wins and losses recorded against one feature signature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WinLoss {
    pub wins: u64,
    pub losses: u64,
}

impl WinLoss {
    pub fn games(&self) -> u64 {
        self.wins + self.losses
    }

    pub fn win_rate(&self) -> f64 {
        ratio(self.wins, self.games())
    }
}

/// Starting-hand signature -> outcome counts, one entry per seat per game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeatureTally {
    buckets: BTreeMap<String, WinLoss>,
}

impl FeatureTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, signature: &str, won: bool) {
        let entry = self.buckets.entry(signature.to_string()).or_default();
        if won {
            entry.wins += 1;
        } else {
            entry.losses += 1;
        }
    }

    pub fn merge(&mut self, other: &FeatureTally) {
        for (signature, counts) in &other.buckets {
            let entry = self.buckets.entry(signature.clone()).or_default();
            entry.wins += counts.wins;
            entry.losses += counts.losses;
        }
    }

    pub fn get(&self, signature: &str) -> Option<WinLoss> {
        self.buckets.get(signature).copied()
    }

    /// Most-sampled signatures first; equal counts fall back to signature order.
    pub fn by_sample_count(&self) -> Vec<(&str, WinLoss)> {
        let mut rows: Vec<(&str, WinLoss)> = self
            .buckets
            .iter()
            .map(|(signature, counts)| (signature.as_str(), *counts))
            .collect();
        rows.sort_by(|a, b| b.1.games().cmp(&a.1.games()).then_with(|| a.0.cmp(b.0)));
        rows
    }
}

/// Aggregate results for a run. Built per batch and merged in game order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub games: u64,
    pub team_wins: [u64; 2],
    pub tricks_played: u64,
    pub features: FeatureTally,
}

impl SimulationSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_game(&mut self, record: &GameRecord) {
        self.games += 1;
        self.team_wins[record.winning_team.index()] += 1;
        self.tricks_played += u64::from(record.tricks);
        for seat in Seat::LOOP {
            let won = seat.team() == record.winning_team;
            self.features.record(&record.signatures[seat.index()], won);
        }
    }

    pub fn merge(&mut self, other: &SimulationSummary) {
        self.games += other.games;
        self.team_wins[0] += other.team_wins[0];
        self.team_wins[1] += other.team_wins[1];
        self.tricks_played += other.tricks_played;
        self.features.merge(&other.features);
    }

    pub fn win_rate(&self, team: Team) -> f64 {
        ratio(self.team_wins[team.index()], self.games)
    }

    pub fn average_tricks(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.tricks_played as f64 / self.games as f64
        }
    }

    /// Normal-approximation interval for a team's win rate.
    pub fn confidence_interval(&self, team: Team) -> Result<(f64, f64), AnalyticsError> {
        if self.games == 0 {
            return Ok((0.0, 0.0));
        }
        let p = self.win_rate(team);
        let z = standard_normal()?.inverse_cdf(0.5 + CONFIDENCE_LEVEL / 2.0);
        let margin = z * (p * (1.0 - p) / self.games as f64).sqrt();
        Ok(((p - margin).max(0.0), (p + margin).min(1.0)))
    }

    /// Two-sided p-value for the hypothesis that both teams win equally often.
    pub fn p_value_vs_even(&self, team: Team) -> Result<f64, AnalyticsError> {
        if self.games == 0 {
            return Ok(1.0);
        }
        let std_error = (0.25 / self.games as f64).sqrt();
        let z = (self.win_rate(team) - 0.5).abs() / std_error;
        let p = 2.0 * (1.0 - standard_normal()?.cdf(z));
        Ok(p.clamp(0.0, 1.0))
    }

    pub fn render_markdown(&self, run_id: &str, win_score: u32) -> Result<String, AnalyticsError> {
        let team = Team::NorthSouth;
        let (ci_low, ci_high) = self.confidence_interval(team)?;
        let p_value = self.p_value_vs_even(team)?;

        let mut rows = String::new();
        rows.push_str(&format!("# Simulation Summary: {run_id}\n\n"));
        rows.push_str(&format!(
            "Games: {}, first to {win_score} tricks, {:.2} tricks per game\n\n",
            self.games,
            self.average_tricks()
        ));
        rows.push_str("| Team | Wins | Win % |\n");
        rows.push_str("|------|------|-------|\n");
        for team in Team::BOTH {
            rows.push_str(&format!(
                "| {team} | {wins} | {rate:.2}% |\n",
                wins = self.team_wins[team.index()],
                rate = self.win_rate(team) * 100.0,
            ));
        }
        rows.push_str(&format!(
            "\n{team} win rate 95% CI: [{:.4}, {:.4}], p-value vs even: {p_value:.4}\n\n",
            ci_low, ci_high
        ));

        rows.push_str("## Starting-hand features\n\n");
        rows.push_str(concat!(
            "Signature: trump ace | trumps 10-13 | trumps below 10 | ",
            "plain aces | shortest plain suit\n\n",
        ));
        rows.push_str("| Signature | Seats | Wins | Losses | Win % |\n");
        rows.push_str("|-----------|-------|------|--------|-------|\n");
        for (signature, counts) in self.features.by_sample_count() {
            rows.push_str(&format!(
                "| {signature} | {games} | {wins} | {losses} | {rate:.1}% |\n",
                games = counts.games(),
                wins = counts.wins,
                losses = counts.losses,
                rate = counts.win_rate() * 100.0,
            ));
        }
        Ok(rows)
    }

    pub fn write_markdown(
        &self,
        path: impl AsRef<Path>,
        run_id: &str,
        win_score: u32,
    ) -> Result<(), AnalyticsError> {
        let rows = self.render_markdown(run_id, win_score)?;
        fs::write(path.as_ref(), rows).map_err(|e| AnalyticsError::Io {
            context: "writing summary markdown",
            source: e,
        })
    }
}

fn standard_normal() -> Result<Normal, AnalyticsError> {
    Normal::new(0.0, 1.0).map_err(|e| AnalyticsError::Stats(e.to_string()))
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
