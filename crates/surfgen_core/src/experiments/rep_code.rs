//! Memory experiments on the repetition code.

use crate::blocks::rep_code::{init_qubits, log_meas, qec_round};
use crate::blocks::RoundOptions;
use crate::circuit::Circuit;
use crate::detectors::{comparison_depth, RoundDetectors};
use crate::error::{CompileError, Result};
use crate::experiments::coords_prelude;
use crate::layout::Layout;
use crate::models::Model;

/// Parameters of a repetition-code memory experiment. The code only
/// protects against bit flips, so there is no basis choice.
#[derive(Debug, Clone)]
pub struct MemoryOptions<'a> {
    pub num_rounds: usize,
    pub data_init: &'a [bool],
    pub meas_reset: bool,
    pub emit_coords: bool,
}

impl<'a> MemoryOptions<'a> {
    pub fn new(num_rounds: usize, data_init: &'a [bool]) -> Self {
        MemoryOptions {
            num_rounds,
            data_init,
            meas_reset: false,
            emit_coords: false,
        }
    }
}

/// Compile a full memory experiment. Round structure and truncation
/// follow the surface-code assembler; every detector is declared since
/// all parities are deterministic from the initial state.
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
    let early = RoundOptions {
        meas_reset: opts.meas_reset,
        detectors: RoundDetectors::MeasurementOnly,
        det_only: None,
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
    experiment += init_qubits(model, layout, opts.data_init)?;

    if opts.num_rounds > boundary {
        experiment += qec_round(model, layout, &early)? * boundary;
        experiment += qec_round(model, layout, &interior)? * (opts.num_rounds - boundary);
        experiment += log_meas(model, layout, opts.meas_reset)?;
    } else {
        experiment += qec_round(model, layout, &early)? * opts.num_rounds;
        experiment += log_meas(model, layout, true)?;
    }

    Ok(experiment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layouts::repetition_code;
    use crate::models::{NoiselessModel, QubitIndex};

    fn compile(num_rounds: usize, meas_reset: bool) -> Circuit {
        let layout = repetition_code(5).unwrap();
        let model = NoiselessModel::new(QubitIndex::from_layout(&layout));
        let mut opts = MemoryOptions::new(num_rounds, &[false; 5]);
        opts.meas_reset = meas_reset;
        memory_experiment(&model, &layout, &opts).unwrap()
    }

    #[test]
    fn zero_rounds_rejected() {
        let layout = repetition_code(5).unwrap();
        let model = NoiselessModel::new(QubitIndex::from_layout(&layout));
        let opts = MemoryOptions::new(0, &[false; 5]);
        assert!(memory_experiment(&model, &layout, &opts).is_err());
    }

    #[test]
    fn counts_for_ten_rounds() {
        let circuit = compile(10, true);
        // 4 ancillas per round, 5 final data measurements.
        assert_eq!(circuit.num_measurements(), 45);
        // Every round declares all 4 detectors; final block adds 4.
        assert_eq!(circuit.num_detectors(), 44);
    }

    #[test]
    fn truncation_at_boundary() {
        let circuit = compile(2, false);
        assert_eq!(circuit.num_detectors(), 2 * 4 + 4);
        let text = circuit.to_string();
        // Final detector for A4 (D4, D5, one syndrome round back).
        assert!(text.contains("DETECTOR rec[-2] rec[-1] rec[-6]\n"));
    }
}
