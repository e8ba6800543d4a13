//! Phase circuits for CSS surface codes.
//!
//! The round schedule keeps data qubits in the X eigenbasis for the whole
//! round: the Hadamard that rotates them in is emitted with the X-type
//! pass and rotated out again by the same pass's closing Hadamard layer,
//! which simultaneously prepares the Z-type ancillas. Each stabilizer
//! type walks its four diagonals in its own fixed order so the two
//! interaction patterns interleave without qubit conflicts.

use surfgen_common::StabType;

use crate::blocks::{idle_complement, RoundOptions};
use crate::circuit::Circuit;
use crate::detectors::{
    comparison_depth, final_round_offsets, observable_offsets, syndrome_offsets,
};
use crate::error::{CompileError, Result};
use crate::layout::{Layout, QubitFilter};
use crate::models::Model;
use surfgen_common::Role;

/// Logical initialization: reset everything, flip the requested data
/// qubits, optionally rotate the data into the X basis.
pub fn init_qubits(
    model: &dyn Model,
    layout: &Layout,
    data_init: &[bool],
    rot_basis: bool,
) -> Result<Circuit> {
    let data = layout.data_qubits();
    let anc = layout.anc_qubits();
    let all = layout.get_qubits(QubitFilter::default());

    if data_init.len() != data.len() {
        return Err(CompileError::InvalidArgument(format!(
            "data_init has {} entries for {} data qubits",
            data_init.len(),
            data.len()
        )));
    }

    let mut circuit = Circuit::new();

    circuit.extend(model.reset(&all)?);
    circuit.tick();

    let flipped: Vec<&str> = data
        .iter()
        .zip(data_init)
        .filter_map(|(&q, &flip)| flip.then_some(q))
        .collect();
    if !flipped.is_empty() {
        circuit.extend(model.x_gate(&flipped)?);
    }
    circuit.extend(model.idle(&idle_complement(&all, &flipped))?);
    circuit.tick();

    if rot_basis {
        circuit.extend(model.hadamard(&data)?);
        circuit.extend(model.idle(&anc)?);
        circuit.tick();
    }

    Ok(circuit)
}

/// One syndrome-extraction round over both stabilizer types, closed by
/// the ancilla measurement (and reset, if the policy says so) and the
/// round's detector declarations.
pub fn qec_round(model: &dyn Model, layout: &Layout, opts: &RoundOptions) -> Result<Circuit> {
    let data = layout.data_qubits();
    let anc = layout.anc_qubits();
    let all = layout.get_qubits(QubitFilter::default());
    let depth = comparison_depth(opts.meas_reset);

    let mut circuit = Circuit::new();

    for (stab_type, order) in layout.interaction_order() {
        let stab_qubits = layout.get_qubits(QubitFilter::ancillas_of(*stab_type));

        if *stab_type == StabType::XType {
            let mut rot = data.clone();
            rot.extend(&stab_qubits);
            circuit.extend(model.hadamard(&rot)?);
            circuit.extend(model.idle(&idle_complement(&all, &rot))?);
            circuit.tick();
        }

        for dir in order {
            let pairs = layout.neighbor_pairs(&stab_qubits, *dir)?;
            let involved: Vec<&str> = pairs.iter().flat_map(|&(a, d)| [a, d]).collect();
            if !involved.is_empty() {
                circuit.extend(model.cphase(&involved)?);
            }
            circuit.extend(model.idle(&idle_complement(&all, &involved))?);
            circuit.tick();
        }

        let rot = if *stab_type == StabType::XType {
            let mut rot = data.clone();
            rot.extend(&anc);
            rot
        } else {
            stab_qubits
        };
        circuit.extend(model.hadamard(&rot)?);
        circuit.extend(model.idle(&idle_complement(&all, &rot))?);
        circuit.tick();
    }

    circuit.extend(model.measure(&anc)?);
    circuit.extend(model.idle(&data)?);
    circuit.tick();

    if opts.meas_reset {
        circuit.extend(model.reset(&anc)?);
        circuit.extend(model.idle(&data)?);
        circuit.tick();
    }

    // Detectors ordered as in the measurement block.
    let offsets = syndrome_offsets(anc.len(), depth, opts.detectors);
    for (slot, anc_qubit) in anc.iter().enumerate() {
        if let Some(only) = opts.det_only {
            if layout.stab_type(anc_qubit)? != Some(only) {
                continue;
            }
        }
        circuit.detector(offsets[slot].clone());
    }

    log::trace!(
        "compiled qec round: {} ticks, {} detectors",
        circuit.num_ticks(),
        circuit.num_detectors()
    );
    Ok(circuit)
}

/// Logical measurement of every data qubit, merged with the final round
/// of detectors: each matching ancilla's data support is compared against
/// the ancilla's own last `comparison_depth` measurements.
pub fn log_meas(
    model: &dyn Model,
    layout: &Layout,
    rot_basis: bool,
    meas_reset: bool,
) -> Result<Circuit> {
    let data = layout.data_qubits();
    let anc = layout.anc_qubits();
    let comp_rounds = comparison_depth(meas_reset);

    let mut circuit = Circuit::new();

    if rot_basis {
        circuit.extend(model.hadamard(&data)?);
        circuit.extend(model.idle(&anc)?);
        circuit.tick();
    }

    circuit.extend(model.measure(&data)?);
    circuit.extend(model.idle(&anc)?);
    circuit.tick();

    let stab_type = if rot_basis {
        StabType::XType
    } else {
        StabType::ZType
    };
    for anc_qubit in layout.get_qubits(QubitFilter::ancillas_of(stab_type)) {
        let support = layout.get_neighbors(anc_qubit, None, QubitFilter::role(Role::Data))?;
        let data_slots: Vec<usize> = support
            .iter()
            .map(|q| layout.data_index_of(q))
            .collect::<Result<_>>()?;
        let anc_slot = layout.anc_index_of(anc_qubit)?;
        circuit.detector(final_round_offsets(
            anc_slot,
            &data_slots,
            data.len(),
            anc.len(),
            comp_rounds,
        )?);
    }

    let support_slots = match layout.logical_support(stab_type) {
        Some(names) => Some(
            names
                .iter()
                .map(|q| layout.data_index_of(q))
                .collect::<Result<Vec<_>>>()?,
        ),
        None => None,
    };
    circuit.observable_include(0, observable_offsets(data.len(), support_slots.as_deref()));

    Ok(circuit)
}

/// Transversal logical X: flip every data qubit.
pub fn log_x(model: &dyn Model, layout: &Layout) -> Result<Circuit> {
    let mut circuit = Circuit::new();
    circuit.extend(model.x_gate(&layout.data_qubits())?);
    circuit.extend(model.idle(&layout.anc_qubits())?);
    circuit.tick();
    Ok(circuit)
}

/// Transversal logical Z.
pub fn log_z(model: &dyn Model, layout: &Layout) -> Result<Circuit> {
    let mut circuit = Circuit::new();
    circuit.extend(model.z_gate(&layout.data_qubits())?);
    circuit.extend(model.idle(&layout.anc_qubits())?);
    circuit.tick();
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::RoundDetectors;
    use crate::layouts::rotated_surface_code;
    use crate::models::{NoiselessModel, QubitIndex};

    fn noiseless(layout: &Layout) -> NoiselessModel {
        NoiselessModel::new(QubitIndex::from_layout(layout))
    }

    #[test]
    fn round_has_lockstep_tick_structure() {
        let layout = rotated_surface_code(3).unwrap();
        let model = noiseless(&layout);
        let round = qec_round(&model, &layout, &RoundOptions::default()).unwrap();
        // X pass: 1 rotation + 4 interactions + 1 rotation; Z pass:
        // 4 interactions + 1 rotation; measurement. No reset layer.
        assert_eq!(round.num_ticks(), 12);
        assert_eq!(round.num_measurements(), 8);
        assert_eq!(round.num_detectors(), 8);
    }

    #[test]
    fn reset_policy_adds_a_layer() {
        let layout = rotated_surface_code(3).unwrap();
        let model = noiseless(&layout);
        let opts = RoundOptions {
            meas_reset: true,
            ..Default::default()
        };
        let round = qec_round(&model, &layout, &opts).unwrap();
        assert_eq!(round.num_ticks(), 13);
    }

    #[test]
    fn det_only_restricts_detectors() {
        let layout = rotated_surface_code(3).unwrap();
        let model = noiseless(&layout);
        let opts = RoundOptions {
            detectors: RoundDetectors::MeasurementOnly,
            det_only: Some(StabType::ZType),
            ..Default::default()
        };
        let round = qec_round(&model, &layout, &opts).unwrap();
        assert_eq!(round.num_detectors(), 4);
    }

    #[test]
    fn init_flips_requested_qubits() {
        let layout = rotated_surface_code(3).unwrap();
        let model = noiseless(&layout);
        let mut data_init = vec![false; 9];
        data_init[4] = true;
        let init = init_qubits(&model, &layout, &data_init, false).unwrap();
        let text = init.to_string();
        assert!(text.contains("X 4"));
        assert!(!init_qubits(&model, &layout, &[false; 3], false).is_ok());
    }

    #[test]
    fn log_meas_detector_count_matches_basis() {
        let layout = rotated_surface_code(3).unwrap();
        let model = noiseless(&layout);
        let z_meas = log_meas(&model, &layout, false, false).unwrap();
        assert_eq!(z_meas.num_detectors(), 4);
        assert_eq!(z_meas.num_measurements(), 9);
        let x_meas = log_meas(&model, &layout, true, false).unwrap();
        assert_eq!(x_meas.num_detectors(), 4);
    }

    #[test]
    fn log_meas_observable_uses_layout_support() {
        let layout = rotated_surface_code(3).unwrap();
        let model = noiseless(&layout);
        let meas = log_meas(&model, &layout, false, false).unwrap();
        let text = meas.to_string();
        // Southern row D1 D2 D3 occupies the first three data slots.
        assert!(text.contains("OBSERVABLE_INCLUDE(0) rec[-9] rec[-8] rec[-7]"));
    }
}
