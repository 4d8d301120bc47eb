// Error types for the SauceDemo suite
//
// Three families surface from a scenario: timeouts on awaited conditions,
// assertion mismatches, and engine errors (navigation/action) which pass
// through untouched. Everything else is plumbing around them.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for suite operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving the application under test
#[derive(Debug, Error)]
pub enum Error {
    /// An awaited condition did not hold within its timeout
    ///
    /// Names the condition (visible, enabled, network idle) and the locator
    /// it was evaluated against.
    #[error("Timeout after {}ms waiting for {locator} to be {condition}", timeout.as_millis())]
    Timeout {
        condition: String,
        locator: String,
        timeout: Duration,
    },

    /// An explicit expectation failed
    ///
    /// The message always carries the expected and the actual value.
    #[error("Assertion failed: {0}")]
    Assertion(String),

    /// Navigation to a URL failed
    #[error("Navigation to '{url}' failed: {source}")]
    Navigation {
        url: String,
        #[source]
        source: Box<Error>,
    },

    /// Error raised by the browser-automation engine
    #[error("Engine error: {0}")]
    Engine(#[from] playwright_rs::Error),

    /// Operation attempted on a session that was already closed
    #[error("Session closed: {0}")]
    SessionClosed(String),

    /// A named step of a scenario failed
    #[error("Step '{step}' failed: {source}")]
    StepFailed {
        step: String,
        #[source]
        source: Box<Error>,
    },

    /// A scenario exceeded its total time budget
    #[error("Scenario '{scenario}' timed out after {}ms", timeout.as_millis())]
    ScenarioTimeout { scenario: String, timeout: Duration },

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error with additional context
    #[error("{0}: {1}")]
    Context(String, #[source] Box<Error>),
}

impl Error {
    /// Adds context to the error
    pub fn context(self, msg: impl Into<String>) -> Self {
        Error::Context(msg.into(), Box::new(self))
    }

    /// Builds an assertion error from an expected/actual pair
    pub fn mismatch(what: &str, expected: impl std::fmt::Display, actual: impl std::fmt::Display) -> Self {
        Error::Assertion(format!("expected {what} '{expected}', but found '{actual}'"))
    }

    /// Returns true for timeouts on awaited conditions
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Timeout { .. } | Error::ScenarioTimeout { .. } => true,
            Error::StepFailed { source, .. }
            | Error::Context(_, source)
            | Error::Navigation { source, .. } => source.is_timeout(),
            _ => false,
        }
    }

    /// Returns true for failed expectations
    pub fn is_assertion(&self) -> bool {
        match self {
            Error::Assertion(_) => true,
            Error::StepFailed { source, .. } | Error::Context(_, source) => source.is_assertion(),
            _ => false,
        }
    }

    /// Label of the step that failed, if the error came out of a step
    pub fn failed_step(&self) -> Option<&str> {
        match self {
            Error::StepFailed { step, .. } => Some(step),
            Error::Context(_, source) => source.failed_step(),
            _ => None,
        }
    }
}
