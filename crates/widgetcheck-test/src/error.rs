//! Error types for the consistency harness.

use crate::driver::DrainOutcome;
use crate::pattern::Interaction;
use thiserror::Error;

/// Symbolic event registry lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Name not present in the event type registry.
    #[error("unknown event name: {0}")]
    UnknownEventName(String),
}

/// Malformed detail codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DetailError {
    /// Traversal details are single bits; anything else is corrupt.
    #[error("traversal detail {0:#x} is not zero or a power of two")]
    NotPowerOfTwo(i32),

    /// Traversal bit beyond the known traversal kinds.
    #[error("traversal detail {0:#x} has no known traversal kind")]
    OutOfRange(i32),
}

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML did not parse into a config.
    #[error("parse error: {0}")]
    Parse(String),

    /// A value parsed but is unusable.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Why a consistency scenario did not pass.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// No pattern registered under this name.
    #[error("no interaction pattern named '{0}'")]
    UnknownPattern(String),

    /// A pattern referenced an event name the registry does not know.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Scenario was run without an input descriptor.
    #[error("scenario '{0}' has no input to synthesize")]
    MissingInput(String),

    /// Input descriptor does not fit the pattern's interaction kind.
    #[error("pattern '{pattern}' needs {expected:?} input, got {actual:?}")]
    InputMismatch {
        /// Pattern name
        pattern: String,
        /// Interaction the pattern is driven by
        expected: Interaction,
        /// Interaction the supplied input describes
        actual: Interaction,
    },

    /// A harness parameter named a mouse button that does not exist.
    #[error("{0} is not a mouse button id")]
    InvalidButton(i32),

    /// Iconify was requested on a control that is not a shell.
    #[error("widget {0} is not a shell and cannot be iconified")]
    NotAShell(u64),

    /// The backend rejected at least one synthetic input.
    #[error("input injection failed while synthesizing '{0}'")]
    InjectionFailed(String),

    /// A captured event carried a corrupt detail code.
    #[error("malformed event detail: {0}")]
    MalformedDetail(#[from] DetailError),

    /// Drain did not settle in time and the config asks for strict timeouts.
    #[error("'{pattern}' did not settle within {timeout_ms}ms")]
    DrainTimeout {
        /// Pattern name
        pattern: String,
        /// Timeout that elapsed
        timeout_ms: u64,
    },

    /// Captured events differ from the expected sequence.
    #[error("{pattern} event ordering: expected {expected:?} but captured {actual:?} (drain: {drain:?}){report}")]
    Mismatch {
        /// Pattern name
        pattern: String,
        /// Canonical expected sequence
        expected: Vec<String>,
        /// Canonical captured sequence
        actual: Vec<String>,
        /// How the drain loop ended
        drain: DrainOutcome,
        /// Serialized scenario report, prefixed with a newline
        report: String,
    },
}

impl ScenarioError {
    /// Whether this is a sequence mismatch, as opposed to a setup failure.
    #[must_use]
    pub const fn is_mismatch(&self) -> bool {
        matches!(self, Self::Mismatch { .. })
    }
}
