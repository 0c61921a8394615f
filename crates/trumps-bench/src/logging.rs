use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::{NonBlockingBuilder, WorkerGuard};
use tracing_subscriber::EnvFilter;

use crate::config::{LoggingConfig, ResolvedOutputs};

const TRACE_FILE_NAME: &str = "trace.jsonl";

/// Holds the trace writer open. Events still queued are flushed on drop.
pub struct LoggingGuard {
    _worker: WorkerGuard,
    pub trace_path: PathBuf,
}

/// Routes `tracing` events to `trace.jsonl` beside the summary table, one JSON
/// object per line. `RUST_LOG` overrides the configured level.
pub fn init_logging(
    logging: &LoggingConfig,
    outputs: &ResolvedOutputs,
) -> Result<Option<LoggingGuard>> {
    if !logging.enable_structured {
        return Ok(None);
    }

    let trace_path = trace_path_for(&outputs.summary_md);
    if let Some(dir) = trace_path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating trace directory {}", dir.display()))?;
    }
    let file = File::create(&trace_path)
        .with_context(|| format!("creating trace file {}", trace_path.display()))?;

    // Decision events can burst far past the channel size; block instead of dropping.
    let (writer, worker) = NonBlockingBuilder::default().lossy(false).finish(file);

    let default_level = logging.level().unwrap_or(Level::INFO);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_str()));

    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_target(true)
        .with_current_span(false)
        .with_writer(writer)
        .finish();

    // Another subscriber may already own the global slot (tests, embedders).
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::warn!(path = %trace_path.display(), "global subscriber already set");
    }

    Ok(Some(LoggingGuard {
        _worker: worker,
        trace_path,
    }))
}

fn trace_path_for(summary_md: &Path) -> PathBuf {
    summary_md.with_file_name(TRACE_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::{init_logging, trace_path_for};
    use crate::config::{LoggingConfig, ResolvedOutputs};
    use std::path::{Path, PathBuf};

    #[test]
    fn trace_file_sits_beside_the_summary() {
        assert_eq!(
            trace_path_for(Path::new("bench/out/run/summary.md")),
            PathBuf::from("bench/out/run/trace.jsonl")
        );
        assert_eq!(trace_path_for(Path::new("summary.md")), PathBuf::from("trace.jsonl"));
    }

    #[test]
    fn disabled_logging_installs_nothing() {
        let dir = tempfile::tempdir().expect("temp dir");
        let outputs = ResolvedOutputs {
            jsonl: None,
            summary_md: dir.path().join("summary.md"),
        };
        let guard = init_logging(&LoggingConfig::default(), &outputs).expect("init");
        assert!(guard.is_none());
        assert!(!dir.path().join("trace.jsonl").exists());
    }
}
