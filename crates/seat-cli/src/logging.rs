//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! Console output goes to stderr at the configured level. When a log file is
//! set, the same events are also appended there at debug level or finer, so a
//! run leaves a full trace behind even when the console stays quiet.
//!
//! # Log Levels
//!
//! - `error`: Clashes, failed slots
//! - `warn`: Deficiencies, skipped input rows, unknown subjects
//! - `info`: Slot progress, allocation counts, written reports
//! - `debug`: Per-room placements and fill order
//! - `trace`: Not used

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

const WORKSPACE_TARGETS: [&str; 5] = [
    "seat_cli",
    "seat_core",
    "seat_ingest",
    "seat_model",
    "seat_output",
];

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Console level for the workspace crates.
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` override the console level.
    pub use_env_filter: bool,
    /// Whether to include timestamps in console output.
    pub with_timestamps: bool,
    /// Whether to include target (module path) in log output.
    pub with_target: bool,
    /// Whether to use ANSI colors on the console.
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Optional log file; events are appended in addition to stderr.
    pub log_file: Option<PathBuf>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON format for machine parsing.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::INFO,
            use_env_filter: true,
            with_timestamps: false,
            with_target: false,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn with_level_filter(mut self, level_filter: LevelFilter) -> Self {
        self.level_filter = level_filter;
        self
    }

    #[must_use]
    pub fn with_timestamps(mut self, enable: bool) -> Self {
        self.with_timestamps = enable;
        self
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    /// Level used for the log file: the console level, but never coarser than debug.
    pub fn file_level_filter(&self) -> LevelFilter {
        self.level_filter.max(LevelFilter::DEBUG)
    }
}

/// Initialize the global tracing subscriber with the given configuration.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a global subscriber
/// is already installed.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    let mut layers: Vec<BoxedLayer> = vec![fmt_layer(
        config,
        io::stderr,
        config.with_ansi,
        config.with_timestamps,
        build_env_filter(config.level_filter, config.use_env_filter),
    )];
    if let Some(path) = &config.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        layers.push(fmt_layer(
            config,
            SharedFileWriter::new(file),
            false,
            true,
            build_env_filter(config.file_level_filter(), false),
        ));
    }
    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(io::Error::other)
}

fn fmt_layer<W>(
    config: &LogConfig,
    writer: W,
    ansi: bool,
    timestamps: bool,
    filter: EnvFilter,
) -> BoxedLayer
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let base = fmt::layer()
        .with_writer(writer)
        .with_target(config.with_target);
    match (config.format, timestamps) {
        (LogFormat::Json, _) => base.json().with_filter(filter).boxed(),
        (LogFormat::Compact, true) => base.compact().with_ansi(ansi).with_filter(filter).boxed(),
        (LogFormat::Compact, false) => base
            .compact()
            .with_ansi(ansi)
            .without_time()
            .with_filter(filter)
            .boxed(),
        (LogFormat::Pretty, true) => base.with_ansi(ansi).with_filter(filter).boxed(),
        (LogFormat::Pretty, false) => base
            .with_ansi(ansi)
            .without_time()
            .with_filter(filter)
            .boxed(),
    }
}

#[derive(Clone)]
struct SharedFileWriter {
    file: Arc<Mutex<File>>,
}

impl SharedFileWriter {
    fn new(file: File) -> Self {
        Self {
            file: Arc::new(Mutex::new(file)),
        }
    }
}

struct SharedFileGuard {
    file: Arc<Mutex<File>>,
}

impl Write for SharedFileGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        guard.flush()
    }
}

impl<'a> MakeWriter<'a> for SharedFileWriter {
    type Writer = SharedFileGuard;

    fn make_writer(&'a self) -> Self::Writer {
        SharedFileGuard {
            file: Arc::clone(&self.file),
        }
    }
}

/// Directives for the workspace crates at `level`; external crates stay at warn.
pub fn default_directives(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    let mut directives = vec!["warn".to_string()];
    directives.extend(
        WORKSPACE_TARGETS
            .iter()
            .map(|target| format!("{target}={level}")),
    );
    directives.join(",")
}

fn build_env_filter(level: LevelFilter, use_env: bool) -> EnvFilter {
    if use_env && let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(default_directives(level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_cover_workspace_crates() {
        let directives = default_directives(LevelFilter::DEBUG);
        assert!(directives.starts_with("warn,"));
        for target in WORKSPACE_TARGETS {
            assert!(directives.contains(&format!("{target}=debug")), "{target}");
        }
    }

    #[test]
    fn file_level_is_at_least_debug() {
        let quiet = LogConfig::default().with_level_filter(LevelFilter::WARN);
        assert_eq!(quiet.file_level_filter(), LevelFilter::DEBUG);

        let chatty = LogConfig::default().with_level_filter(LevelFilter::TRACE);
        assert_eq!(chatty.file_level_filter(), LevelFilter::TRACE);
    }

    #[test]
    fn builders_set_fields() {
        let config = LogConfig::default()
            .with_format(LogFormat::Json)
            .with_timestamps(true)
            .with_ansi(false)
            .with_log_file(Some(PathBuf::from("seating.log")));
        assert_eq!(config.format, LogFormat::Json);
        assert!(config.with_timestamps);
        assert!(!config.with_ansi);
        assert_eq!(config.log_file.as_deref(), Some(std::path::Path::new("seating.log")));
    }
}
