use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::Level;
use trumps_core::{DEFAULT_WIN_SCORE, MAX_WIN_SCORE};

const RUN_ID_PLACEHOLDER: &str = "{run_id}";

/// A simulation run as described by `bench/sim.yaml`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SimulationConfig {
    pub run_id: String,
    pub games: GamesConfig,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Reads, parses and validates a YAML run description.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(source) => return Err(ConfigError::Read { source, path }),
        };
        let mut config: SimulationConfig = match serde_yaml::from_str(&text) {
            Ok(config) => config,
            Err(source) => return Err(ConfigError::Parse { source, path }),
        };
        if let Err(source) = config.validate() {
            return Err(ConfigError::Invalid { path, source });
        }
        Ok(config)
    }

    /// Checks every field and fills blank defaults. Call again after applying
    /// command-line overrides.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        check_run_id(&self.run_id)?;
        self.games.validate()?;
        self.outputs.validate(&self.run_id)?;
        self.logging.fill_defaults();
        Ok(())
    }

    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: self
                .outputs
                .jsonl
                .as_deref()
                .map(|template| expand_run_id(template, &self.run_id)),
            summary_md: expand_run_id(&self.outputs.summary_md, &self.run_id),
        }
    }
}

/// How many games to play and under which rules.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GamesConfig {
    pub count: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_win_score")]
    pub win_score: u32,
    /// Worker threads; 0 uses every available core.
    #[serde(default)]
    pub threads: usize,
}

impl GamesConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.count == 0 {
            return Err(invalid("games.count", "at least one game is required"));
        }
        if !(1..=MAX_WIN_SCORE).contains(&self.win_score) {
            return Err(invalid(
                "games.win_score",
                format!("win score must be between 1 and {MAX_WIN_SCORE}"),
            ));
        }
        Ok(())
    }

    /// Master seed for the run; a missing seed means 0.
    pub fn master_seed(&self) -> u64 {
        self.seed.unwrap_or_default()
    }
}

fn default_win_score() -> u32 {
    DEFAULT_WIN_SCORE
}

/// Report destinations. Both accept a `{run_id}` placeholder.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    #[serde(default)]
    pub jsonl: Option<String>,
    pub summary_md: String,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        let summary = ("outputs.summary_md", self.summary_md.as_str());
        let jsonl = self.jsonl.as_deref().map(|path| ("outputs.jsonl", path));
        for (field, template) in std::iter::once(summary).chain(jsonl) {
            if template.trim().is_empty() {
                return Err(invalid(field, "output path is blank"));
            }
            if expand_run_id(template, run_id).file_name().is_none() {
                return Err(invalid(field, "output path does not name a file"));
            }
        }
        Ok(())
    }
}

/// Structured trace output. Off unless `enable_structured` is set.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub enable_structured: bool,
    pub tracing_level: String,
    /// Emit one event per policy decision.
    pub decision_details: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: DEFAULT_TRACING_LEVEL.to_string(),
            decision_details: false,
        }
    }
}

const DEFAULT_TRACING_LEVEL: &str = "info";

impl LoggingConfig {
    fn fill_defaults(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = DEFAULT_TRACING_LEVEL.to_string();
        }
    }

    /// Parsed `tracing_level`, or `None` when the name is not recognised.
    pub fn level(&self) -> Option<Level> {
        let name = self.tracing_level.trim();
        if name.eq_ignore_ascii_case("warning") {
            return Some(Level::WARN);
        }
        name.parse().ok()
    }
}

fn check_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.is_empty() {
        return Err(invalid("run_id", "run_id is required"));
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-');
    if let Some(bad) = run_id.chars().find(|c| !allowed(*c)) {
        return Err(invalid(
            "run_id",
            format!("run_id contains {bad:?}; use letters, digits, '.', '_' or '-'"),
        ));
    }
    Ok(())
}

fn expand_run_id(template: &str, run_id: &str) -> PathBuf {
    PathBuf::from(template.replace(RUN_ID_PLACEHOLDER, run_id))
}

fn invalid(field: &str, message: impl Into<String>) -> ValidationError {
    ValidationError::InvalidField {
        field: field.to_string(),
        message: message.into(),
    }
}

/// Output paths after `{run_id}` substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: Option<PathBuf>,
    pub summary_md: PathBuf,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("malformed YAML in {}: {source}", path.display())]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("{}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },
}

impl ConfigError {
    /// The configuration file the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::Invalid { path, .. } => path,
        }
    }
}

/// A rejected field, named by its YAML path (`games.count`).
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE_RUN: &str = r#"
run_id: "nightly_1k"
games:
  count: 1000
  seed: 77
outputs:
  jsonl: "bench/out/{run_id}/games.jsonl"
  summary_md: "bench/out/{run_id}/summary.md"
logging:
  enable_structured: true
  tracing_level: ""
"#;

    fn parse(yaml: &str) -> SimulationConfig {
        serde_yaml::from_str(yaml).expect("parse yaml")
    }

    fn rejected_field(yaml: &str) -> String {
        let mut cfg = parse(yaml);
        match cfg.validate().expect_err("should fail") {
            ValidationError::InvalidField { field, .. } => field,
        }
    }

    #[test]
    fn parses_run_description_with_defaults() {
        let mut cfg = parse(SAMPLE_RUN);
        cfg.validate().expect("valid");

        assert_eq!(cfg.games.win_score, DEFAULT_WIN_SCORE);
        assert_eq!(cfg.games.threads, 0);
        assert_eq!(cfg.games.master_seed(), 77);
        assert_eq!(cfg.logging.tracing_level, "info");
        assert_eq!(cfg.logging.level(), Some(Level::INFO));
        assert!(!cfg.logging.decision_details);

        let outputs = cfg.resolved_outputs();
        assert_eq!(
            outputs.jsonl,
            Some(PathBuf::from("bench/out/nightly_1k/games.jsonl"))
        );
        assert_eq!(
            outputs.summary_md,
            PathBuf::from("bench/out/nightly_1k/summary.md")
        );
    }

    #[test]
    fn jsonl_output_is_optional() {
        let yaml = SAMPLE_RUN.replace("  jsonl: \"bench/out/{run_id}/games.jsonl\"\n", "");
        let mut cfg = parse(&yaml);
        cfg.validate().expect("valid");
        assert_eq!(cfg.resolved_outputs().jsonl, None);
    }

    #[test]
    fn missing_seed_defaults_to_zero() {
        let yaml = SAMPLE_RUN.replace("  seed: 77\n", "");
        let cfg = parse(&yaml);
        assert_eq!(cfg.games.seed, None);
        assert_eq!(cfg.games.master_seed(), 0);
    }

    #[test]
    fn rejects_zero_games() {
        let yaml = SAMPLE_RUN.replace("count: 1000", "count: 0");
        assert_eq!(rejected_field(&yaml), "games.count");
    }

    fn with_win_score(score: u32) -> String {
        SAMPLE_RUN.replace("  seed: 77\n", &format!("  seed: 77\n  win_score: {score}\n"))
    }

    #[test]
    fn rejects_out_of_range_win_score() {
        for score in [0, MAX_WIN_SCORE + 1, 13] {
            assert_eq!(rejected_field(&with_win_score(score)), "games.win_score");
        }
    }

    #[test]
    fn accepts_every_win_score_a_deal_can_reach() {
        assert_eq!(MAX_WIN_SCORE, 7);
        for score in 1..=MAX_WIN_SCORE {
            let mut cfg = parse(&with_win_score(score));
            cfg.validate().expect("valid");
            assert_eq!(cfg.games.win_score, score);
        }
    }

    #[test]
    fn run_id_with_spaces_is_rejected() {
        let yaml = SAMPLE_RUN.replace("nightly_1k", "nightly 1k");
        assert_eq!(rejected_field(&yaml), "run_id");
    }

    #[test]
    fn rejects_blank_summary_path() {
        let yaml = SAMPLE_RUN.replace("\"bench/out/{run_id}/summary.md\"", "\"  \"");
        assert_eq!(rejected_field(&yaml), "outputs.summary_md");
    }

    #[test]
    fn unknown_tracing_level_has_no_level() {
        let yaml = SAMPLE_RUN.replace("tracing_level: \"\"", "tracing_level: \"loud\"");
        let mut cfg = parse(&yaml);
        cfg.validate().expect("valid");
        assert_eq!(cfg.logging.level(), None);
    }

    #[test]
    fn from_path_reports_the_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(SAMPLE_RUN.replace("count: 1000", "count: 0").as_bytes())
            .expect("write");
        let err = SimulationConfig::from_path(file.path()).expect_err("invalid");
        assert!(matches!(err, ConfigError::Invalid { .. }));
        assert_eq!(err.path(), file.path());

        let missing = file.path().with_extension("missing");
        let err = SimulationConfig::from_path(&missing).expect_err("missing");
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
