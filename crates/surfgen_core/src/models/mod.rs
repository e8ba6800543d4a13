//! Noise models: physical-operation emission with interleaved noise.
//!
//! A model turns an abstract operation on named qubits into the ordered
//! physical instructions the compiled circuit carries, drawing error
//! probabilities from a [`Setup`](crate::setup::Setup) snapshot. The
//! builders never construct instructions themselves; every gate in a
//! compiled circuit passes through exactly one of these methods.

mod library;
mod util;

pub use library::{CircuitNoiseModel, DecoherenceNoiseModel, NoiselessModel};
pub use util::idle_error_probs;

use std::collections::HashMap;

use crate::circuit::Instruction;
use crate::error::{CompileError, Result};
use crate::layout::Layout;

/// Mapping from qubit labels to stim target indices, frozen from a
/// layout's canonical order.
#[derive(Debug, Clone)]
pub struct QubitIndex {
    map: HashMap<String, u32>,
}

impl QubitIndex {
    pub fn from_layout(layout: &Layout) -> Self {
        let map = layout
            .get_qubits(Default::default())
            .into_iter()
            .enumerate()
            .map(|(i, q)| (q.to_owned(), i as u32))
            .collect();
        QubitIndex { map }
    }

    pub fn get(&self, qubit: &str) -> Result<u32> {
        self.map
            .get(qubit)
            .copied()
            .ok_or_else(|| CompileError::UnknownQubit(qubit.to_owned()))
    }

    pub fn targets(&self, qubits: &[&str]) -> Result<Vec<u32>> {
        qubits.iter().map(|q| self.get(q)).collect()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Physical-operation emission interface.
///
/// Each method yields the ordered instruction sequence for one abstract
/// operation on the given qubits: the physical gate itself plus whatever
/// noise channels the model attaches. Two-qubit operations take a flat,
/// even-length qubit list interpreted as consecutive pairs. Measurement
/// records are appended in the order of `qubits`.
pub trait Model {
    fn hadamard(&self, qubits: &[&str]) -> Result<Vec<Instruction>>;
    fn s_gate(&self, qubits: &[&str]) -> Result<Vec<Instruction>>;
    fn x_gate(&self, qubits: &[&str]) -> Result<Vec<Instruction>>;
    fn z_gate(&self, qubits: &[&str]) -> Result<Vec<Instruction>>;
    fn cphase(&self, qubits: &[&str]) -> Result<Vec<Instruction>>;
    fn measure(&self, qubits: &[&str]) -> Result<Vec<Instruction>>;
    fn reset(&self, qubits: &[&str]) -> Result<Vec<Instruction>>;
    /// Explicit idling for qubits not acted on in the current time step.
    /// May be empty for models without idle noise.
    fn idle(&self, qubits: &[&str]) -> Result<Vec<Instruction>>;
}

pub(crate) fn require_pairs(qubits: &[&str]) -> Result<()> {
    if qubits.len() % 2 != 0 {
        return Err(CompileError::InvalidArgument(format!(
            "two-qubit gate expects an even number of qubits, got {}",
            qubits.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layouts::repetition_code;

    #[test]
    fn index_follows_canonical_order() {
        let layout = repetition_code(3).unwrap();
        let index = QubitIndex::from_layout(&layout);
        assert_eq!(index.get("D1").unwrap(), 0);
        assert_eq!(index.get("D3").unwrap(), 2);
        assert_eq!(index.get("A1").unwrap(), 3);
        assert!(index.get("Q9").is_err());
    }

    #[test]
    fn odd_pair_list_rejected() {
        assert!(require_pairs(&["A1", "D1", "D2"]).is_err());
        assert!(require_pairs(&["A1", "D1"]).is_ok());
    }
}
