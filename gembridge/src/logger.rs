//! Stderr logging for the CLI.

use std::{fmt::Write, io::IsTerminal, str::FromStr, sync::Once};

use jiff::{Zoned, tz::TimeZone};
use logforth::{append::Stderr, filter::EnvFilter, layout::Layout};

static INIT: Once = Once::new();

/// Timestamps in UTC, levels colored when stderr is a terminal.
#[derive(Debug)]
struct UtcLayout {
    no_color: bool,
}

impl UtcLayout {
    fn new() -> Self {
        Self {
            no_color: !std::io::stderr().is_terminal(),
        }
    }
}

impl Layout for UtcLayout {
    fn format(
        &self,
        record: &log::Record<'_>,
        _diagnostics: &[Box<dyn logforth::diagnostic::Diagnostic>],
    ) -> anyhow::Result<Vec<u8>> {
        let mut output = String::new();

        let now = Zoned::now().with_time_zone(TimeZone::UTC);
        write!(output, "{} ", now.strftime("%Y-%m-%dT%H:%M:%S%.6fZ"))?;

        let level = record.level();

        if self.no_color {
            write!(output, "{level:>5}  ")?;
        } else {
            let color = match level {
                log::Level::Error => 31,
                log::Level::Warn => 33,
                log::Level::Info => 32,
                log::Level::Debug => 34,
                log::Level::Trace => 35,
            };

            write!(output, "\x1b[{color}m{level:>5}\x1b[0m  ")?;
        }

        write!(output, "{}", record.args())?;

        Ok(output.into_bytes())
    }
}

/// Installs the logger. `log_filter` is an env-filter string like `info` or `gemini=debug`.
pub fn init(log_filter: &str) -> anyhow::Result<()> {
    let filter =
        EnvFilter::from_str(log_filter).map_err(|e| anyhow::anyhow!("Invalid log filter '{log_filter}': {e}"))?;

    INIT.call_once(move || {
        logforth::builder()
            .dispatch(move |d| d.filter(filter).append(Stderr::default().with_layout(UtcLayout::new())))
            .apply();
    });

    Ok(())
}
