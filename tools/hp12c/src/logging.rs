//! Console logging for the hp12c front end
//!
//! Logs go to stderr so that batch output on stdout stays machine readable.
//! `RUST_LOG` wins over the `--verbose` default.

use colored::{ColoredString, Colorize};
use tracing::Level;
use tracing_subscriber::{
    fmt::{format::Writer, FmtContext, FormatEvent, FormatFields},
    registry::LookupSpan,
    EnvFilter,
};

/// `[INFO]`, `[WARN]`, ... coloured by severity
fn level_label(level: Level) -> ColoredString {
    let label = format!("[{}]", level);
    match level {
        Level::TRACE => label.magenta(),
        Level::DEBUG => label.blue(),
        Level::INFO => label.green(),
        Level::WARN => label.yellow(),
        Level::ERROR => label.red(),
    }
}

/// Last segment of an event target: `hp12c_engine::calculator` -> `calculator`
fn component(target: &str) -> &str {
    target.rsplit("::").next().unwrap_or(target)
}

/// Event formatter: `[LEVEL] component: message key=value`
///
/// Batch runs prefix a UTC timestamp; the keypad leaves it out so log lines
/// stay short between display lines.
///
/// Example output: `[INFO] calculator: STO register=3 value=42`
struct KeypadFormat {
    timestamps: bool,
}

impl<S, N> FormatEvent<S, N> for KeypadFormat
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        if self.timestamps {
            write!(writer, "{} ", chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ"))?;
        }

        let metadata = event.metadata();
        let label = level_label(*metadata.level());
        if writer.has_ansi_escapes() {
            write!(writer, "{} ", label)?;
        } else {
            write!(writer, "{} ", label.clear())?;
        }
        write!(writer, "{}: ", component(metadata.target()))?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Default filter when `RUST_LOG` is unset
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Install the global subscriber
///
/// `json` switches to one JSON object per event for log shippers.
pub fn init(verbose: bool, json: bool, ansi: bool, timestamps: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    // A subscriber may already be installed (tests); keep the first one
    if json {
        let _ = builder.json().with_target(false).try_init();
    } else {
        let _ = builder.with_ansi(ansi).event_format(KeypadFormat { timestamps }).try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_label() {
        assert_eq!(level_label(Level::INFO).clear().to_string(), "[INFO]");
        assert_eq!(level_label(Level::WARN).clear().to_string(), "[WARN]");
    }

    #[test]
    fn test_component() {
        assert_eq!(component("hp12c_engine::calculator"), "calculator");
        assert_eq!(component("hp12c"), "hp12c");
    }

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(true), "debug");
        assert_eq!(default_directive(false), "info");
    }
}
