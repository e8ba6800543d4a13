//! Gate-sequence builders for the phases of a QEC experiment.
//!
//! Each builder emits one phase (initialization, syndrome-extraction
//! round, logical measurement) as a [`Circuit`](crate::circuit::Circuit)
//! fragment in which every qubit is either acted upon or explicitly idled
//! at every time step, so the whole layout advances in lock-step TICK
//! boundaries. Idle sets are always computed by filtering the canonical
//! roster order, never from hash sets: the instruction stream must be
//! byte-reproducible.

pub mod css_code;
pub mod rep_code;

use std::collections::HashSet;

use crate::detectors::RoundDetectors;
use surfgen_common::StabType;

/// Options for one syndrome-extraction round.
#[derive(Debug, Clone, Copy)]
pub struct RoundOptions {
    /// Reset ancillas after measuring them.
    pub meas_reset: bool,
    /// Detector policy for this round.
    pub detectors: RoundDetectors,
    /// Restrict detector declarations to one stabilizer type; `None`
    /// declares detectors for every ancilla.
    pub det_only: Option<StabType>,
}

impl Default for RoundOptions {
    fn default() -> Self {
        RoundOptions {
            meas_reset: false,
            detectors: RoundDetectors::CompareSyndromes,
            det_only: None,
        }
    }
}

/// The complement of `active` within `all`, in `all`'s order.
pub(crate) fn idle_complement<'a>(all: &[&'a str], active: &[&str]) -> Vec<&'a str> {
    let active: HashSet<&str> = active.iter().copied().collect();
    all.iter().copied().filter(|q| !active.contains(q)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complement_preserves_roster_order() {
        let all = ["D1", "D2", "D3", "A1"];
        let idle = idle_complement(&all, &["D2"]);
        assert_eq!(idle, vec!["D1", "D3", "A1"]);
    }

    #[test]
    fn complement_of_everything_is_empty() {
        let all = ["D1", "A1"];
        assert!(idle_complement(&all, &["A1", "D1"]).is_empty());
    }
}
