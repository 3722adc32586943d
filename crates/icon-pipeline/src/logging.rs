//! Tracing subscriber setup for the binary
//!
//! Library code only emits `tracing` events; installing a subscriber is the
//! binary's job. Events go to stderr so stdout stays free for the summary.

use tracing_subscriber::EnvFilter;

/// Log line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Default filter directive for a verbosity flag
#[must_use]
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "icon_pipeline=debug,icon_asset=debug,info"
    } else {
        "info"
    }
}

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over the verbosity flag. Calling this twice
/// is harmless; the second call is ignored.
pub fn init(verbose: bool, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_raises_crate_level() {
        assert_eq!(default_directive(false), "info");
        assert!(default_directive(true).contains("icon_pipeline=debug"));
    }

    #[test]
    fn init_twice_is_harmless() {
        init(false, LogFormat::Text);
        init(true, LogFormat::Json);
    }
}
