//! Provides parsing and validation of command line arguments into
//! the options needed to replay a run

use anyhow::{anyhow, Context, Result};
use clap::{Arg, Command};

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

mod reporter;

pub use reporter::{ConsoleReporter, Reporter, Verbosity};

const VERBOSITY_ENV: &str = "STEPREPORT_VERBOSITY";

pub struct CLI {
    matches: clap::ArgMatches,
}

impl CLI {
    pub fn init() -> Result<CLI> {
        let matches = get_cli_definition().get_matches();
        let cli = CLI { matches };

        Ok(cli)
    }

    #[cfg(test)]
    fn from_args(args: &[&str]) -> Result<CLI> {
        let matches = get_cli_definition().try_get_matches_from(args)?;
        Ok(CLI { matches })
    }

    pub fn get_verbosity_level(&self) -> Result<Verbosity> {
        let verbose = self.matches.get_flag("verbose");
        let quiet = self.matches.get_flag("quiet");

        if verbose && quiet {
            return Err(anyhow!("Only one of --verbose or --quiet can be used at a time"));
        }

        if verbose {
            Ok(Verbosity::Verbose)
        } else if quiet {
            Ok(Verbosity::Quiet)
        } else {
            match std::env::var(VERBOSITY_ENV) {
                Ok(v) => v.parse().with_context(|| format!("Invalid {}", VERBOSITY_ENV)),
                Err(_) => Ok(Verbosity::Default),
            }
        }
    }

    pub fn get_reporter(&self) -> Result<ConsoleReporter> {
        Ok(ConsoleReporter::stdout(self.get_verbosity_level()?))
    }

    fn get_events_path(&self) -> Option<PathBuf> {
        match self.matches.get_one::<String>("events") {
            Some(p) if p != "-" => Some(PathBuf::from(p)),
            _ => None,
        }
    }

    /// Opens the recorded events, reading stdin when no file was given
    pub fn get_events(&self) -> Result<Box<dyn BufRead>> {
        match self.get_events_path() {
            Some(path) => {
                let file = File::open(&path)
                    .with_context(|| format!("Could not open {}", path.display()))?;
                Ok(Box::new(BufReader::new(file)))
            }
            None => Ok(Box::new(BufReader::new(io::stdin()))),
        }
    }
}

fn get_cli_definition() -> Command {
    Command::new("stepreport")
        .version("0.1")
        .about("Replays a recorded test run through the console reporter")
        .arg(
            Arg::new("events")
                .help("JSON lines file of run events, or - for stdin")
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .help("Stream every message and redraw steps in place")
                .action(clap::ArgAction::SetTrue)
                .short('v')
                .long("verbose"),
        )
        .arg(
            Arg::new("quiet")
                .help("Only show step symbols and scenario logs")
                .action(clap::ArgAction::SetTrue)
                .short('q')
                .long("quiet"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_flags() {
        let cli = CLI::from_args(&["stepreport", "-v", "run.jsonl"]).unwrap();
        assert_eq!(cli.get_verbosity_level().unwrap(), Verbosity::Verbose);

        let cli = CLI::from_args(&["stepreport", "--quiet"]).unwrap();
        assert_eq!(cli.get_verbosity_level().unwrap(), Verbosity::Quiet);
    }

    #[test]
    fn test_conflicting_flags() {
        let cli = CLI::from_args(&["stepreport", "-v", "-q"]).unwrap();
        assert!(cli.get_verbosity_level().is_err());
    }

    #[test]
    fn test_events_path() {
        let cli = CLI::from_args(&["stepreport", "run.jsonl"]).unwrap();
        assert_eq!(cli.get_events_path(), Some(PathBuf::from("run.jsonl")));

        let cli = CLI::from_args(&["stepreport", "-"]).unwrap();
        assert_eq!(cli.get_events_path(), None);

        let cli = CLI::from_args(&["stepreport"]).unwrap();
        assert_eq!(cli.get_events_path(), None);
    }

    #[test]
    fn test_missing_events_file() {
        let cli = CLI::from_args(&["stepreport", "/nonexistent/run.jsonl"]).unwrap();
        assert!(cli.get_events().is_err());
    }
}
