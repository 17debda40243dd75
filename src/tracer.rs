//! Diagnostics façade for the lexer.
//!
//! The lexer reports what it is doing through a [`Tracer`]. Nothing it
//! reports influences tokenization; the default [`NullTracer`] is disabled so
//! no message is ever formatted, and [`TracingTracer`] forwards them to
//! `tracing`.

use std::fmt::{self, Display};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TraceLevel {
    Info,
    Debug,
    Warn,
    Failure,
}

impl Display for TraceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraceLevel::Info => write!(f, "INFO"),
            TraceLevel::Debug => write!(f, "DEBUG"),
            TraceLevel::Warn => write!(f, "WARNING"),
            TraceLevel::Failure => write!(f, "FAILURE"),
        }
    }
}

pub trait Tracer {
    /// A disabled tracer is never called and its messages are never built.
    fn enabled(&self) -> bool {
        true
    }

    fn notify(&self, level: TraceLevel, message: fmt::Arguments<'_>);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullTracer;

impl Tracer for NullTracer {
    fn enabled(&self) -> bool {
        false
    }

    fn notify(&self, _level: TraceLevel, _message: fmt::Arguments<'_>) {}
}

/// Forwards notifications to `tracing` events tagged with a section name.
#[derive(Debug, Clone)]
pub struct TracingTracer {
    section: String,
}

impl TracingTracer {
    pub fn new(section: impl Into<String>) -> Self {
        TracingTracer {
            section: section.into(),
        }
    }

    pub fn section(&self) -> &str {
        &self.section
    }
}

impl Tracer for TracingTracer {
    fn notify(&self, level: TraceLevel, message: fmt::Arguments<'_>) {
        let section = self.section.as_str();
        match level {
            TraceLevel::Info => tracing::info!(section, "{}", message),
            TraceLevel::Debug => tracing::debug!(section, "{}", message),
            TraceLevel::Warn => tracing::warn!(section, "{}", message),
            TraceLevel::Failure => tracing::error!(section, "{}", message),
        }
    }
}
