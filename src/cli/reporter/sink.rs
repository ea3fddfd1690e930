//! Durable destination for leveled messages, independent of what the
//! console shows

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Critical,
    Error,
    Warning,
    Info,
    Debug,
}

pub trait MessageSink {
    fn log(&mut self, level: Level, message: &str);
}

/// Hands messages to whatever `tracing` subscriber the process installed
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl MessageSink for TracingSink {
    fn log(&mut self, level: Level, message: &str) {
        match level {
            Level::Critical => tracing::error!(target: "stepreport::console", critical = true, "{}", message),
            Level::Error => tracing::error!(target: "stepreport::console", "{}", message),
            Level::Warning => tracing::warn!(target: "stepreport::console", "{}", message),
            Level::Info => tracing::info!(target: "stepreport::console", "{}", message),
            Level::Debug => tracing::debug!(target: "stepreport::console", "{}", message),
        }
    }
}
