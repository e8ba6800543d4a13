//! Error types for circuit compilation.
//!
//! Every variant is a fatal configuration error: compilation either
//! completes or fails, and nothing in this crate catches or retries.

use thiserror::Error;

/// Errors raised synchronously during circuit compilation.
#[derive(Debug, Error)]
pub enum CompileError {
    /// A caller-supplied argument is malformed: non-positive round count,
    /// odd-length qubit list for a two-qubit gate, bad label, and so on.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A referenced qubit is absent from the layout, which indicates a
    /// mismatch between the layout and the experiment parameters.
    #[error("unknown qubit '{0}'")]
    UnknownQubit(String),

    /// The noise-parameter store has no entry for the requested key.
    /// Surfaced as-is from the store.
    #[error("parameter '{param}' is not defined for qubit(s) {qubits}")]
    MissingParameter { param: String, qubits: String },

    /// A gate label has no mapping to a physical instruction.
    #[error("unsupported gate '{0}'")]
    UnsupportedGate(String),
}

pub type Result<T> = core::result::Result<T, CompileError>;
