//! In-memory stand-ins for the terminal and the message sink
use super::sink::{Level, MessageSink};
use super::surface::RenderSurface;
use std::io;

#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceOp {
    Append(String),
    Redraw,
    Clear,
    Reset,
}

/// Records every call and the content of each redraw
#[derive(Default)]
pub struct MemorySurface {
    pub ops: Vec<SurfaceOp>,
    pub frames: Vec<String>,
    pub fail_redraw: bool,
    content: String,
}

impl MemorySurface {
    pub fn last_frame(&self) -> &str {
        self.frames.last().map(String::as_str).unwrap_or("")
    }
}

impl RenderSurface for MemorySurface {
    fn append(&mut self, text: &str) {
        self.ops.push(SurfaceOp::Append(text.to_string()));
        self.content.push_str(text);
    }

    fn redraw(&mut self) -> io::Result<()> {
        self.ops.push(SurfaceOp::Redraw);
        if self.fail_redraw {
            return Err(io::Error::new(io::ErrorKind::Interrupted, "redraw interrupted"));
        }
        self.frames.push(self.content.clone());
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.ops.push(SurfaceOp::Clear);
        self.content.clear();
        Ok(())
    }

    fn reset(&mut self) -> io::Result<()> {
        self.ops.push(SurfaceOp::Reset);
        self.content.clear();
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub messages: Vec<(Level, String)>,
}

impl MessageSink for RecordingSink {
    fn log(&mut self, level: Level, message: &str) {
        self.messages.push((level, message.to_string()));
    }
}
