//! Process logger bootstrap for the command-line front end.
//!
//! The library itself only talks to the `log` facade; nothing is printed
//! unless a binary calls [`init_logging`].

use flexi_logger::{Logger, LoggerHandle};
use log::debug;

/// `debug` in debug builds, `info` in release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

/// Normalizes a user-supplied level name.
pub fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" => Ok("off"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error|off"
        )),
    }
}

/// Starts logging to stderr.
///
/// An explicit `level` wins; otherwise `RUST_LOG` is honoured and
/// `fallback` is used when it is unset. The returned handle must be kept
/// alive for the lifetime of the process.
pub fn init_logging(level: Option<&str>, fallback: &str) -> Result<LoggerHandle, String> {
    let fallback = normalize_level(fallback)?;
    let logger = match level {
        Some(level) => Logger::try_with_str(normalize_level(level)?),
        None => Logger::try_with_env_or_str(fallback),
    }
    .map_err(|err| format!("invalid log specification: {err}"))?;

    let handle = logger
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    debug!(
        "event=app_start version={} platform={}",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    );
    Ok(handle)
}
