//! Full-experiment assemblers.
//!
//! An experiment stitches phase circuits into one instruction stream:
//! initialization, a run of syndrome-extraction rounds, and the logical
//! measurement that closes every open detector. The round-count state
//! machine lives here; the phase circuits themselves come from
//! [`blocks`](crate::blocks).

pub mod rep_code;
pub mod surface_code;

use crate::circuit::Circuit;
use crate::error::Result;
use crate::layout::{Layout, QubitFilter};

/// QUBIT_COORDS declarations for every qubit that carries coordinates,
/// in canonical roster order (which is also the stim target order).
pub(crate) fn coords_prelude(layout: &Layout) -> Result<Circuit> {
    let mut circuit = Circuit::new();
    for (target, qubit) in layout.get_qubits(QubitFilter::default()).iter().enumerate() {
        if let Some((x, y)) = layout.coords(qubit)? {
            circuit.qubit_coords(target as u32, x as f64, y as f64);
        }
    }
    Ok(circuit)
}
