use stderrlog::{LogLevelNum, Timestamp};

/// Logging setup arg group.
#[derive(clap::Args, Debug)]
pub struct LogArgs {
    /// Silence log messages.
    #[clap(short, long)]
    pub quiet: bool,

    /// Raise log verbosity (-v warn, -vv info, -vvv debug, -vvvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Timestamp log lines (-t seconds, -tt milliseconds).
    #[arg(short, long, action = clap::ArgAction::Count)]
    ts: u8,
}

/// Map a verbosity count to a log level; 0 is off.
fn log_level(verbosity: u8) -> LogLevelNum {
    match verbosity {
        0 => LogLevelNum::Off,
        1 => LogLevelNum::Error,
        2 => LogLevelNum::Warn,
        3 => LogLevelNum::Info,
        4 => LogLevelNum::Debug,
        _ => LogLevelNum::Trace,
    }
}

fn timestamp(ts: u8) -> Timestamp {
    match ts {
        0 => Timestamp::Off,
        1 => Timestamp::Second,
        _ => Timestamp::Millisecond,
    }
}

impl LogArgs {
    /// The effective verbosity; `-v` flags count up from error level.
    pub fn verbosity(
        &self,
        default: u8,
    ) -> u8 {
        if self.quiet {
            0
        } else if self.verbose > 0 {
            self.verbose.saturating_add(1)
        } else {
            default
        }
    }

    /// Install the stderr logger.
    pub fn setup_logging(
        &self,
        default: u8,
    ) -> Result<(), Box<dyn std::error::Error>> {
        stderrlog::new()
            .quiet(self.quiet)
            .verbosity(log_level(self.verbosity(default)))
            .timestamp(timestamp(self.ts))
            .init()?;

        Ok(())
    }
}
