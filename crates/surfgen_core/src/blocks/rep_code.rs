//! Phase circuits for the repetition code.
//!
//! The repetition code only checks Z parities, so a round is a single
//! pass: rotate the ancillas in, walk the two link directions, rotate
//! back out, measure. Data qubits stay in the computational basis
//! throughout.

use surfgen_common::{Role, StabType};

use crate::blocks::{idle_complement, RoundOptions};
use crate::circuit::Circuit;
use crate::detectors::{
    comparison_depth, final_round_offsets, observable_offsets, syndrome_offsets,
};
use crate::error::{CompileError, Result};
use crate::layout::{Layout, QubitFilter};
use crate::models::Model;

/// Reset every qubit and flip the requested data qubits.
pub fn init_qubits(model: &dyn Model, layout: &Layout, data_init: &[bool]) -> Result<Circuit> {
    let data = layout.data_qubits();
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

    Ok(circuit)
}

/// One parity-check round.
pub fn qec_round(model: &dyn Model, layout: &Layout, opts: &RoundOptions) -> Result<Circuit> {
    let data = layout.data_qubits();
    let anc = layout.anc_qubits();
    let all = layout.get_qubits(QubitFilter::default());
    let depth = comparison_depth(opts.meas_reset);

    for anc_qubit in &anc {
        if layout.stab_type(anc_qubit)? != Some(StabType::ZType) {
            return Err(CompileError::InvalidArgument(format!(
                "repetition-code round requires Z-type ancillas, {anc_qubit} is not"
            )));
        }
    }

    let order = layout
        .interaction_order()
        .iter()
        .find(|(stab_type, _)| *stab_type == StabType::ZType)
        .map(|(_, order)| order.as_slice())
        .ok_or_else(|| {
            CompileError::InvalidArgument("layout defines no Z-type interaction order".into())
        })?;

    let mut circuit = Circuit::new();

    circuit.extend(model.hadamard(&anc)?);
    circuit.extend(model.idle(&data)?);
    circuit.tick();

    for dir in order {
        let pairs = layout.neighbor_pairs(&anc, *dir)?;
        let involved: Vec<&str> = pairs.iter().flat_map(|&(a, d)| [a, d]).collect();
        if !involved.is_empty() {
            circuit.extend(model.cphase(&involved)?);
        }
        circuit.extend(model.idle(&idle_complement(&all, &involved))?);
        circuit.tick();
    }

    circuit.extend(model.hadamard(&anc)?);
    circuit.extend(model.idle(&data)?);
    circuit.tick();

    circuit.extend(model.measure(&anc)?);
    circuit.extend(model.idle(&data)?);
    circuit.tick();

    if opts.meas_reset {
        circuit.extend(model.reset(&anc)?);
        circuit.extend(model.idle(&data)?);
        circuit.tick();
    }

    let offsets = syndrome_offsets(anc.len(), depth, opts.detectors);
    for offset in offsets {
        circuit.detector(offset);
    }

    Ok(circuit)
}

/// Measure every data qubit, close out the ancilla detectors, and
/// declare the logical observable over the full data register.
pub fn log_meas(model: &dyn Model, layout: &Layout, meas_reset: bool) -> Result<Circuit> {
    let data = layout.data_qubits();
    let anc = layout.anc_qubits();
    let comp_rounds = comparison_depth(meas_reset);

    let mut circuit = Circuit::new();

    circuit.extend(model.measure(&data)?);
    circuit.extend(model.idle(&anc)?);
    circuit.tick();

    for anc_qubit in &anc {
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

    circuit.observable_include(0, observable_offsets(data.len(), None));

    Ok(circuit)
}
