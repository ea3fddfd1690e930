//! Renders a run to the console, either as a compact summary or as a live
//! stream with the running step redrawn in place
use super::common::*;
use super::sink::{Level, MessageSink, TracingSink};
use super::surface::{RenderSurface, TermSurface};
use super::{Reporter, Verbosity as V};

use anyhow::Result;
use std::fmt;
use std::io::{self, Write};

#[derive(Clone, Copy, Debug, PartialEq)]
enum State {
    Idle,
    Step,
}

/// Holds the output of the current step (or, in the buffered modes, the
/// current scenario) until it can be finalized.
///
/// `heading` and `body` are only ever emptied together, by `reset`.
pub struct ConsoleReporter<S = TermSurface, K = TracingSink, W = io::Stdout> {
    v: V,
    surface: S,
    sink: K,
    out: W,
    heading: String,
    body: String,
    state: State,
}

impl ConsoleReporter {
    pub fn stdout(v: V) -> Self {
        Self::new(v, TermSurface::stdout(), TracingSink, io::stdout())
    }
}

impl<S: RenderSurface, K: MessageSink, W: Write> ConsoleReporter<S, K, W> {
    pub fn new(v: V, surface: S, sink: K, out: W) -> Self {
        Self {
            v,
            surface,
            sink,
            out,
            heading: String::new(),
            body: String::new(),
            state: State::Idle,
        }
    }

    /// Drops everything buffered for the current block and lets the surface
    /// keep what it last drew. Safe to call with nothing buffered.
    pub fn reset(&mut self) -> Result<()> {
        self.heading.clear();
        self.body.clear();
        self.state = State::Idle;
        self.surface.reset()?;
        Ok(())
    }

    /// Keeps anything streamed since the last step on screen for good, so
    /// later output isn't written into the middle of a live block
    fn settle(&mut self) -> Result<()> {
        if self.v.streams() && self.state == State::Idle {
            self.reset()
        } else {
            Ok(())
        }
    }

    fn leveled(&mut self, level: Level, args: fmt::Arguments<'_>) -> Result<()> {
        let msg = fmt::format(args);
        self.sink.log(level, &msg);
        self.body.push_str(&msg);
        self.body.push('\n');
        if self.v.streams() {
            self.surface.append(&format!("{}\n", msg));
            self.surface.redraw()?;
        }
        Ok(())
    }

    fn print(&mut self, text: &str) -> Result<()> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;
        Ok(())
    }

    fn println(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", text)?;
        self.out.flush()?;
        Ok(())
    }
}

impl<S: RenderSurface, K: MessageSink, W: Write> Reporter for ConsoleReporter<S, K, W> {
    fn critical(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        self.leveled(Level::Critical, args)
    }

    fn error(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        self.leveled(Level::Error, args)
    }

    fn warning(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        self.leveled(Level::Warning, args)
    }

    fn info(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        self.leveled(Level::Info, args)
    }

    fn debug(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        self.leveled(Level::Debug, args)
    }

    fn spec_start(&mut self, heading: &str) -> Result<()> {
        let msg = format_spec(heading);
        self.sink.log(Level::Info, &msg);
        self.settle()?;
        self.println("")?;
        self.println(&msg)?;
        self.println("")
    }

    fn spec_end(&mut self) -> Result<()> {
        self.settle()
    }

    fn scenario_start(&mut self, heading: &str) -> Result<()> {
        let msg = format_scenario(heading);
        self.sink.log(Level::Info, &msg);

        let indented = indent(&msg, SCENARIO_INDENTATION);
        if self.v.streams() {
            self.settle()?;
            self.println(&indented)
        } else {
            // Step symbols are printed on the same line, after the heading
            self.heading.push_str(&indented);
            self.heading.push_str(&spaces(4));
            let heading = self.heading.clone();
            self.print(&heading)
        }
    }

    fn scenario_end(&mut self, _failed: bool) -> Result<()> {
        if self.v.streams() {
            return self.settle();
        }
        self.println("")?;
        let body = std::mem::take(&mut self.body);
        self.print(&body)?;
        self.reset()
    }

    fn step_start(&mut self, text: &str) -> Result<()> {
        debug_assert!(self.state == State::Idle, "step started before the previous one ended");
        self.sink.log(Level::Debug, text);
        self.state = State::Step;

        if self.v.streams() {
            self.heading.push_str(&indent(text, STEP_INDENTATION));
            self.heading.push('\n');
            self.surface.append(&self.heading);
            self.surface.redraw()?;
        }
        Ok(())
    }

    fn step_end(&mut self, failed: bool) -> Result<()> {
        debug_assert!(self.state == State::Step, "step ended without being started");

        if self.v.streams() {
            self.surface.clear()?;
            let block = format!(
                "{}{}{}",
                self.heading.trim_end_matches('\n'),
                step_label(failed),
                self.body,
            );
            self.surface.append(&block);
            self.surface.redraw()?;
            self.reset()
        } else {
            self.state = State::Idle;
            self.print(&step_symbol(failed))
        }
    }

    fn concept_start(&mut self, text: &str) -> Result<()> {
        self.sink.log(Level::Debug, text);
        if self.v.streams() {
            self.surface.reset()?;
            self.println(&indent(text, STEP_INDENTATION))?;
        }
        Ok(())
    }

    fn output(&mut self, text: &str) -> Result<()> {
        self.write_all(text.as_bytes())?;
        Ok(())
    }
}

/// Raw output is shaped into tab-indented lines and treated like any other
/// buffered or streamed message, except that it never reaches the sink.
impl<S: RenderSurface, K: MessageSink, W: Write> Write for ConsoleReporter<S, K, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(block) = tab_block(&String::from_utf8_lossy(buf)) {
            self.body.push_str(&block);
            if self.v.streams() {
                self.surface.append(&block);
                if let Err(err) = self.surface.redraw() {
                    tracing::warn!("Could not redraw output: {}", err);
                }
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
