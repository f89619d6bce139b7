//! Stderr logging for hosts and the CLI.
//!
//! Records from the `compass_overlay*` crates pass at the configured level;
//! everything else is capped at `warn`. Lines carry the elapsed time and the
//! module path without the crate prefix:
//!
//! ```text
//! [  0.012s DEBUG session::controller] interaction idle -> panning_grid
//! ```

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use log::Level;

#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt::format::FmtSpan, util::SubscriberInitExt, EnvFilter};

const OWN_TARGET: &str = "compass_overlay";

/// Environment variable read by [`level_from_env`].
pub const LOG_ENV: &str = "COMPASS_OVERLAY_LOG";

struct OverlayLogger {
    own: LevelFilter,
    epoch: Instant,
}

impl OverlayLogger {
    fn cap_for(&self, target: &str) -> LevelFilter {
        if target.starts_with(OWN_TARGET) {
            self.own
        } else {
            self.own.min(LevelFilter::Warn)
        }
    }
}

fn short_target(target: &str) -> &str {
    match target.strip_prefix(OWN_TARGET) {
        Some(rest) => {
            let rest = rest.trim_start_matches(['_', ':']);
            if rest.is_empty() {
                target
            } else {
                rest
            }
        }
        None => target,
    }
}

impl Log for OverlayLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.cap_for(metadata.target())
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let secs = self.epoch.elapsed().as_secs_f64();
        let mut err = std::io::stderr().lock();
        let _ = writeln!(
            err,
            "[{secs:7.3}s {:>5} {}] {}",
            record.level(),
            short_target(record.target()),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<OverlayLogger> = OnceLock::new();

/// Install the stderr logger. Only the first call has an effect.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    let logger = LOGGER.get_or_init(|| OverlayLogger {
        own: level,
        epoch: Instant::now(),
    });
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Level named by [`LOG_ENV`] (`error` .. `trace`, `off`), if set and valid.
pub fn level_from_env() -> Option<LevelFilter> {
    std::env::var(LOG_ENV).ok()?.trim().parse().ok()
}

/// Level for a `-v` count: 0 is `warn`, each step adds one.
pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install a `tracing` subscriber. `RUST_LOG` wins; otherwise overlay crates
/// log at `default` and everything else at `warn`.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool, default: Level) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let own = default.as_str().to_ascii_lowercase();
        EnvFilter::new(format!(
            "warn,{OWN_TARGET}_core={own},{OWN_TARGET}_render={own},{OWN_TARGET}_session={own},{OWN_TARGET}={own}"
        ))
    });
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    let _ = if json {
        builder.json().flatten_event(true).finish().try_init()
    } else {
        builder.compact().finish().try_init()
    };
}
