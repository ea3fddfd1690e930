/// Lifecycle events of a recorded run, and the replay of those events
/// through a reporter.
///
/// Runs are recorded as JSON lines, one event per line, tagged by `event`:
///
/// ```text
/// {"event": "spec_start", "heading": "Checkout"}
/// {"event": "scenario_start", "heading": "Pay by card"}
/// {"event": "step_start", "text": "Enter card details"}
/// {"event": "debug", "message": "filled 4 fields"}
/// {"event": "step_end", "failed": false}
/// ```

use crate::cli::Reporter;
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fmt::{self, Display};
use std::io::BufRead;
use tracing::instrument;

/// Events that can be reported during a run
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    SpecStart { heading: String },
    SpecEnd,
    ScenarioStart { heading: String },
    ScenarioEnd { failed: bool },
    StepStart { text: String },
    StepEnd { failed: bool },
    ConceptStart { text: String },
    Critical { message: String },
    Error { message: String },
    Warning { message: String },
    Info { message: String },
    Debug { message: String },
    Output { text: String },
}

/// How deep into the spec > scenario > step nesting a run currently is
#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Idle,
    Spec,
    Scenario,
    Step,
}

impl Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Phase::*;
        write!(f, "{}", match self {
            Idle => "outside of a specification",
            Spec => "in a specification",
            Scenario => "in a scenario",
            Step => "in a step",
        })
    }
}

/// Tracks the nesting of boundary events and rejects those that arrive out of
/// order. Messages, raw output and concepts are accepted anywhere.
#[derive(Debug)]
pub struct Sequencer {
    phase: Phase,
}

impl Sequencer {
    pub fn new() -> Self {
        Self { phase: Phase::Idle }
    }

    pub fn advance(&mut self, e: &Event) -> Result<()> {
        use Phase::*;
        let next = match (self.phase, e) {
            (Idle, Event::SpecStart { .. }) => Spec,
            (Spec, Event::SpecEnd) => Idle,
            (Spec, Event::ScenarioStart { .. }) => Scenario,
            (Scenario, Event::ScenarioEnd { .. }) => Spec,
            (Scenario, Event::StepStart { .. }) => Step,
            (Step, Event::StepEnd { .. }) => Scenario,
            (
                phase,
                Event::SpecStart { .. }
                | Event::SpecEnd
                | Event::ScenarioStart { .. }
                | Event::ScenarioEnd { .. }
                | Event::StepStart { .. }
                | Event::StepEnd { .. },
            ) => return Err(anyhow!("Unexpected {:?} {}", e, phase)),
            (phase, _) => phase,
        };
        self.phase = next;
        Ok(())
    }

    /// Whether every started boundary has been ended
    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Idle
    }
}

pub fn dispatch(reporter: &mut dyn Reporter, e: Event) -> Result<()> {
    match e {
        Event::SpecStart { heading } => reporter.spec_start(&heading),
        Event::SpecEnd => reporter.spec_end(),
        Event::ScenarioStart { heading } => reporter.scenario_start(&heading),
        Event::ScenarioEnd { failed } => reporter.scenario_end(failed),
        Event::StepStart { text } => reporter.step_start(&text),
        Event::StepEnd { failed } => reporter.step_end(failed),
        Event::ConceptStart { text } => reporter.concept_start(&text),
        Event::Critical { message } => reporter.critical(format_args!("{}", message)),
        Event::Error { message } => reporter.error(format_args!("{}", message)),
        Event::Warning { message } => reporter.warning(format_args!("{}", message)),
        Event::Info { message } => reporter.info(format_args!("{}", message)),
        Event::Debug { message } => reporter.debug(format_args!("{}", message)),
        Event::Output { text } => reporter.output(&text),
    }
}

/// Reads JSON lines from `input` and feeds them to `reporter` in order.
/// Returns whether any step or scenario failed.
#[instrument(skip_all)]
pub fn replay<R: BufRead>(input: R, reporter: &mut dyn Reporter) -> Result<bool> {
    let mut seq = Sequencer::new();
    let mut failed = false;

    for (idx, line) in input.lines().enumerate() {
        let line = line.context("Failed to read events")?;
        if line.trim().is_empty() {
            continue;
        }

        let e: Event = serde_json::from_str(&line)
            .with_context(|| format!("Invalid event on line {}", idx + 1))?;
        seq.advance(&e).with_context(|| format!("Out of order event on line {}", idx + 1))?;

        if let Event::StepEnd { failed: true } | Event::ScenarioEnd { failed: true } = e {
            failed = true;
        }
        dispatch(reporter, e)?;
    }

    if !seq.is_complete() {
        tracing::warn!("Event stream ended {}", seq.phase);
    }

    Ok(failed)
}
