//! Process-wide logger setup.
//!
//! Logs go to the systemd user journal (`journalctl --user -t docket -f`) when
//! it is reachable and to stderr otherwise. Docket's own targets log at info,
//! or debug while [`crate::debug_logging`] is on; everything else at warn.

use log::{LevelFilter, Log, Metadata, Record};

const OWN_TARGET: &str = "docket";

/// The most verbose level let through for `target`.
pub fn max_level_for(target: &str, debug: bool) -> LevelFilter {
    if target.starts_with(OWN_TARGET) {
        if debug { LevelFilter::Debug } else { LevelFilter::Info }
    } else {
        LevelFilter::Warn
    }
}

struct Filtered<L> {
    inner: L,
}

impl<L: Log> Log for Filtered<L> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= max_level_for(metadata.target(), crate::debug_logging())
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.inner.log(record);
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

/// Install the journal logger under `identifier`, falling back to stderr.
pub fn init(identifier: &str, debug: bool) -> Result<(), log::SetLoggerError> {
    crate::set_debug_logging(debug);

    match systemd_journal_logger::JournalLog::new() {
        Ok(journal) => {
            let journal = journal.with_syslog_identifier(identifier.to_string());
            install(Filtered { inner: journal })
        }
        Err(e) => {
            eprintln!("journal unavailable ({}), logging to stderr", e);
            init_stderr(debug)
        }
    }
}

/// Install the stderr logger only. Used by command-line tools.
pub fn init_stderr(debug: bool) -> Result<(), log::SetLoggerError> {
    crate::set_debug_logging(debug);

    let logger = env_logger::Builder::new()
        .filter_level(LevelFilter::Debug)
        .format_timestamp_secs()
        .build();
    install(Filtered { inner: logger })
}

fn install<L: Log + 'static>(logger: Filtered<L>) -> Result<(), log::SetLoggerError> {
    log::set_boxed_logger(Box::new(logger))?;
    // Global max must be Debug so docket debug logs can pass through when toggled
    log::set_max_level(LevelFilter::Debug);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn own_targets_follow_the_toggle() {
        assert_eq!(max_level_for("docket::store::gateway", false), LevelFilter::Info);
        assert_eq!(max_level_for("docket::store::gateway", true), LevelFilter::Debug);
        assert_eq!(max_level_for("docket_check", true), LevelFilter::Debug);
    }

    #[test]
    fn dependencies_stay_at_warn() {
        assert_eq!(max_level_for("reqwest::connect", true), LevelFilter::Warn);
        assert_eq!(max_level_for("cosmic", false), LevelFilter::Warn);
    }
}
