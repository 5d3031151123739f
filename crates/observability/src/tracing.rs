//! Tracing subscriber initialization.

use core::str::FromStr;

use tracing_subscriber::EnvFilter;

/// Environment variable selecting the log format.
pub const LOG_FORMAT_ENV: &str = "PHARMADEMAND_LOG_FORMAT";

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line, for collection.
    #[default]
    Json,
    /// Human-readable multi-line output, for a terminal.
    Pretty,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log format {0:?} (expected json or pretty)")]
pub struct UnknownLogFormat(pub String);

impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            other => Err(UnknownLogFormat(other.to_string())),
        }
    }
}

/// Format and filter used when the environment does not choose them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogDefaults {
    pub format: LogFormat,
    /// Directive used when `RUST_LOG` is unset.
    pub filter: &'static str,
}

impl LogDefaults {
    /// A terminal gets readable output limited to warnings, so per-command
    /// events stay out of the shell; anything else gets JSON at `info`.
    pub fn for_stderr(is_terminal: bool) -> Self {
        if is_terminal {
            Self {
                format: LogFormat::Pretty,
                filter: "warn",
            }
        } else {
            Self {
                format: LogFormat::Json,
                filter: "info",
            }
        }
    }
}

/// Install the global subscriber. Later calls are no-ops.
///
/// Logs go to stderr so they never interleave with the intake shell's output.
pub fn init(format: LogFormat, default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = match format {
        LogFormat::Json => builder
            .json()
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
}
