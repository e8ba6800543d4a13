//! Memory experiments on the rotated surface code.

use surfgen_common::StabType;

use crate::blocks::css_code::{init_qubits, log_meas, qec_round};
use crate::blocks::RoundOptions;
use crate::circuit::Circuit;
use crate::detectors::{comparison_depth, RoundDetectors};
use crate::error::{CompileError, Result};
use crate::experiments::coords_prelude;
use crate::layout::Layout;
use crate::models::Model;

/// Parameters of a memory experiment.
#[derive(Debug, Clone)]
pub struct MemoryOptions<'a> {
    /// Number of syndrome-extraction rounds. Must be at least one.
    pub num_rounds: usize,
    /// Initial classical state of each data qubit, in data order.
    pub data_init: &'a [bool],
    /// Measure the logical qubit in the X basis instead of Z.
    pub rot_basis: bool,
    /// Reset ancillas after each syndrome measurement.
    pub meas_reset: bool,
    /// Declare first-round detectors for both stabilizer types. When
    /// false, the early rounds only check the type matching the
    /// measurement basis, whose outcomes are deterministic from the
    /// initial product state.
    pub gauge_detectors: bool,
    /// Prefix the stream with QUBIT_COORDS declarations.
    pub emit_coords: bool,
}

impl<'a> MemoryOptions<'a> {
    pub fn new(num_rounds: usize, data_init: &'a [bool]) -> Self {
        MemoryOptions {
            num_rounds,
            data_init,
            rot_basis: false,
            meas_reset: false,
            gauge_detectors: false,
            emit_coords: false,
        }
    }
}

/// Compile a full memory experiment: initialization, `num_rounds` QEC
/// rounds, logical measurement.
///
/// The first `comparison_depth` rounds have no complete syndrome history
/// to compare against and use measurement-only detectors; later rounds
/// compare against the previous syndrome. When `num_rounds` does not
/// exceed that boundary the experiment is truncated: every round is an
/// early round and the final detectors compare one round deep.
pub fn memory_experiment(
    model: &dyn Model,
    layout: &Layout,
    opts: &MemoryOptions,
) -> Result<Circuit> {
    if opts.num_rounds == 0 {
        return Err(CompileError::InvalidArgument(
            "memory experiment requires at least one round".into(),
        ));
    }

    let boundary = comparison_depth(opts.meas_reset);
    let basis_type = if opts.rot_basis {
        StabType::XType
    } else {
        StabType::ZType
    };
    let early = RoundOptions {
        meas_reset: opts.meas_reset,
        detectors: RoundDetectors::MeasurementOnly,
        det_only: (!opts.gauge_detectors).then_some(basis_type),
    };
    let interior = RoundOptions {
        meas_reset: opts.meas_reset,
        detectors: RoundDetectors::CompareSyndromes,
        det_only: None,
    };

    let mut experiment = if opts.emit_coords {
        coords_prelude(layout)?
    } else {
        Circuit::new()
    };
    experiment += init_qubits(model, layout, opts.data_init, opts.rot_basis)?;

    if opts.num_rounds > boundary {
        experiment += qec_round(model, layout, &early)? * boundary;
        experiment += qec_round(model, layout, &interior)? * (opts.num_rounds - boundary);
        experiment += log_meas(model, layout, opts.rot_basis, opts.meas_reset)?;
    } else {
        // Truncated run: no round ever sees a full history, and the final
        // comparison only reaches the single round that happened.
        experiment += qec_round(model, layout, &early)? * opts.num_rounds;
        experiment += log_meas(model, layout, opts.rot_basis, true)?;
    }

    log::debug!(
        "surface memory experiment on {}: {} rounds, {} measurements, {} detectors",
        layout.name(),
        opts.num_rounds,
        experiment.num_measurements(),
        experiment.num_detectors()
    );
    Ok(experiment)
}
