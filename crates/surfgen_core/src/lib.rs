//! Core circuit-compilation engine for quantum error correction
//! experiments.
//!
//! This crate turns a declarative description of a QEC experiment (a code
//! layout, a noise model, a round count and a measurement basis) into a
//! fully timed stim instruction stream with detector and observable
//! bookkeeping. The layout and setup layers describe hardware, the model
//! layer attaches noise to abstract operations, the block layer compiles
//! experiment phases, and the assemblers stitch phases into complete
//! experiments that a frame-propagation engine can verify.

/// Gate-sequence builders for the phases of an experiment.
pub mod blocks;

/// Structural validation: lock-step idle coverage and record-reference
/// bounds on compiled circuits.
pub mod check;

/// Compiled-circuit representation and stim text rendering.
pub mod circuit;

/// Detector and observable record-offset arithmetic.
///
/// All measurement-record bookkeeping lives here: the syndrome
/// comparison depth implied by the reset policy, the offset lists for
/// interior and first rounds, the final-round detectors that mix data
/// and ancilla records, and the observable support.
pub mod detectors;

/// Error type shared across the compilation pipeline.
pub mod error;

/// Full-experiment assemblers for the supported codes.
pub mod experiments;

/// Deterministic Pauli-frame propagation for verifying compiled
/// circuits under injected errors.
pub mod frame;

/// Connectivity-graph description of a code patch.
pub mod layout;

/// Generators for the built-in code layouts.
pub mod layouts;

/// Noise models mapping abstract operations to physical instructions.
pub mod models;

/// Hardware parameter sets with qubit-specific overrides.
pub mod setup;

pub use circuit::{Circuit, CircuitOp, Instruction};
pub use error::{CompileError, Result};
pub use layout::{Layout, QubitFilter, QubitInfo};
pub use models::{CircuitNoiseModel, DecoherenceNoiseModel, Model, NoiselessModel, QubitIndex};
pub use setup::Setup;
