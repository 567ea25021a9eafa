use std::fs::{self, File};
use std::path::Path;
use std::sync::Mutex;

use color_eyre::eyre::{Result, eyre};

/// Where `main` writes span-close events when the feature is on.
pub const DEFAULT_SPAN_LOG: &str = "target/perf/sysmon_spans.jsonl";

/// Install a global JSON subscriber that records one line per closed span.
pub fn init_tracing_json(output_path: &Path) -> Result<()> {
    use tracing_subscriber::fmt::format::FmtSpan;

    ensure_parent_dir(output_path)?;
    let file = File::create(output_path)?;

    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .json()
        .with_span_events(FmtSpan::CLOSE)
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(Mutex::new(file))
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| eyre!("failed to set tracing subscriber: {e}"))?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent)?;
            Ok(())
        }
        _ => Ok(()),
    }
}
