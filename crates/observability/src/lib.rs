//! Tracing/logging setup shared by the binaries.

/// Tracing configuration (filters, formatters).
pub mod tracing;

pub use self::tracing::{LogDefaults, LogFormat, UnknownLogFormat};

use std::io::IsTerminal;

/// Initialize process-wide logging from the environment.
///
/// `RUST_LOG` selects the filter and `PHARMADEMAND_LOG_FORMAT` selects `json`
/// or `pretty`. When unset, both follow [`LogDefaults::for_stderr`]: pretty
/// at `warn` on a terminal, JSON at `info` otherwise. Safe to call multiple
/// times; subsequent calls are no-ops.
pub fn init() {
    let defaults = LogDefaults::for_stderr(std::io::stderr().is_terminal());
    let format = std::env::var(tracing::LOG_FORMAT_ENV)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(defaults.format);
    tracing::init(format, defaults.filter);
}
