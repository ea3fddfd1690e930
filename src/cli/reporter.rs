/// Reports the progress of a run to the console
///
/// A run is reported as nested boundaries: specifications contain scenarios,
/// scenarios contain steps, and concepts may announce groups of steps. Log
/// messages emitted along the way always reach the message sink, but how they
/// reach the screen depends on verbosity.
///
/// In the buffered modes the step text stays hidden; each step is shown as a
/// single glyph and the log lines collected during a scenario are printed when
/// it ends. In verbose mode everything streams live and the running step is
/// redrawn in place until it resolves to PASS or FAIL.
use anyhow::Result;
use std::fmt;

mod common;
mod console;
mod sink;
mod surface;

#[cfg(test)]
mod testing;

pub use self::console::ConsoleReporter;

/// Sets the noise level for a reporter
#[derive(Clone, Copy, Debug, PartialOrd, PartialEq)]
pub enum Verbosity {
    Quiet,
    Default,
    Verbose,
}

impl Verbosity {
    /// Whether messages are streamed live rather than buffered for later
    pub fn streams(&self) -> bool {
        *self >= Verbosity::Verbose
    }
}

impl std::str::FromStr for Verbosity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" => Ok(Verbosity::Quiet),
            "default" | "normal" => Ok(Verbosity::Default),
            "verbose" => Ok(Verbosity::Verbose),
            other => Err(anyhow::anyhow!("Unknown verbosity: {}", other)),
        }
    }
}

/// Everything a driver can tell a reporter about a run.
///
/// Callers must respect the nesting of boundaries: a step is only started
/// inside a scenario, a scenario only inside a specification, and every
/// started step is ended before the next one starts.
pub trait Reporter {
    fn critical(&mut self, args: fmt::Arguments<'_>) -> Result<()>;
    fn error(&mut self, args: fmt::Arguments<'_>) -> Result<()>;
    fn warning(&mut self, args: fmt::Arguments<'_>) -> Result<()>;
    fn info(&mut self, args: fmt::Arguments<'_>) -> Result<()>;
    fn debug(&mut self, args: fmt::Arguments<'_>) -> Result<()>;

    fn spec_start(&mut self, heading: &str) -> Result<()>;
    fn spec_end(&mut self) -> Result<()>;
    fn scenario_start(&mut self, heading: &str) -> Result<()>;
    fn scenario_end(&mut self, failed: bool) -> Result<()>;
    fn step_start(&mut self, text: &str) -> Result<()>;
    fn step_end(&mut self, failed: bool) -> Result<()>;
    fn concept_start(&mut self, text: &str) -> Result<()>;

    /// Raw output produced while a step runs, such as a child process's stdout
    fn output(&mut self, text: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streams() {
        assert!(!Verbosity::Quiet.streams());
        assert!(!Verbosity::Default.streams());
        assert!(Verbosity::Verbose.streams());
    }

    #[test]
    fn test_parse_verbosity() {
        assert_eq!("quiet".parse::<Verbosity>().unwrap(), Verbosity::Quiet);
        assert_eq!("Normal".parse::<Verbosity>().unwrap(), Verbosity::Default);
        assert_eq!(" verbose ".parse::<Verbosity>().unwrap(), Verbosity::Verbose);
        assert!("loud".parse::<Verbosity>().is_err());
    }
}
