//! Detector and observable record-offset resolver.
//!
//! All measurement-record arithmetic lives here, parameterized by ancilla
//! count, comparison depth and boundary position. The layout fixes a
//! canonical ancilla order; within the record stream the most recent
//! syndrome block occupies offsets [-N, -1] and the block k rounds earlier
//! occupies [-(k+1)N, -kN - 1]. Getting any of this wrong does not crash:
//! it silently produces non-deterministic detectors, which is why the
//! whole module is pure offset arithmetic, testable without emitting a
//! single gate.

use crate::error::{CompileError, Result};

/// How far back a syndrome comparison must reach.
///
/// With reset after measurement consecutive syndromes sit one ancilla
/// block apart. Without reset the outcomes are cumulative parities and a
/// valid comparison must skip one extra block.
pub fn comparison_depth(meas_reset: bool) -> usize {
    if meas_reset { 1 } else { 2 }
}

/// Detector policy for a syndrome-extraction round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundDetectors {
    /// Interior round: XOR each ancilla's measurement against its own
    /// measurement `depth` rounds earlier.
    CompareSyndromes,
    /// Boundary round right after initialization: the reset already fixes
    /// the expected parity, so the historical term is omitted.
    MeasurementOnly,
}

/// Offset lists for the detectors declared right after one ancilla
/// measurement block, one list per ancilla in canonical order.
pub fn syndrome_offsets(num_anc: usize, depth: usize, policy: RoundDetectors) -> Vec<Vec<i32>> {
    let n = num_anc as i32;
    (0..n)
        .map(|i| match policy {
            RoundDetectors::CompareSyndromes => vec![i - (depth as i32 + 1) * n, i - n],
            RoundDetectors::MeasurementOnly => vec![i - n],
        })
        .collect()
}

/// Offsets for one final-round detector, declared after the data-qubit
/// measurement block: the ancilla's data-qubit support plus the ancilla's
/// own measurements up to `comp_rounds` blocks back.
///
/// `data_slots` are indices within the data measurement block and
/// `anc_slot` the ancilla's index within the syndrome block.
pub fn final_round_offsets(
    anc_slot: usize,
    data_slots: &[usize],
    num_data: usize,
    num_anc: usize,
    comp_rounds: usize,
) -> Result<Vec<i32>> {
    let nd = num_data as i32;
    let na = num_anc as i32;
    let mut offsets = Vec::with_capacity(data_slots.len() + comp_rounds);
    for &slot in data_slots {
        if slot >= num_data {
            return Err(CompileError::InvalidArgument(format!(
                "data slot {slot} out of range for {num_data} data qubits"
            )));
        }
        offsets.push(slot as i32 - nd);
    }
    for round in 1..=comp_rounds as i32 {
        offsets.push(anc_slot as i32 - nd - round * na);
    }
    Ok(offsets)
}

/// Offsets defining the logical observable over the final data-qubit
/// measurement block. `support` restricts to a logical operator support
/// when the layout defines one; the default is every data qubit, whose
/// total parity differs from the logical operator only by stabilizers.
pub fn observable_offsets(num_data: usize, support: Option<&[usize]>) -> Vec<i32> {
    let nd = num_data as i32;
    match support {
        Some(slots) => slots.iter().map(|&s| s as i32 - nd).collect(),
        None => (-nd..0).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_follows_reset_policy() {
        assert_eq!(comparison_depth(true), 1);
        assert_eq!(comparison_depth(false), 2);
    }

    #[test]
    fn interior_round_compares_two_blocks() {
        // 4 ancillas, no reset: depth 2 skips one extra block.
        let offsets = syndrome_offsets(4, 2, RoundDetectors::CompareSyndromes);
        assert_eq!(offsets.len(), 4);
        assert_eq!(offsets[0], vec![-12, -4]);
        assert_eq!(offsets[3], vec![-9, -1]);
    }

    #[test]
    fn reset_round_compares_adjacent_blocks() {
        let offsets = syndrome_offsets(4, 1, RoundDetectors::CompareSyndromes);
        assert_eq!(offsets[0], vec![-8, -4]);
    }

    #[test]
    fn first_round_omits_history() {
        let offsets = syndrome_offsets(3, 2, RoundDetectors::MeasurementOnly);
        assert_eq!(offsets, vec![vec![-3], vec![-2], vec![-1]]);
    }

    #[test]
    fn final_round_merges_data_and_history() {
        // 9 data, 8 ancillas, ancilla slot 2 touching data slots {1, 4},
        // one comparison round.
        let offsets = final_round_offsets(2, &[1, 4], 9, 8, 1).unwrap();
        assert_eq!(offsets, vec![-8, -5, 2 - 9 - 8]);
    }

    #[test]
    fn final_round_without_reset_reaches_two_blocks() {
        let offsets = final_round_offsets(0, &[0], 5, 4, 2).unwrap();
        assert_eq!(offsets, vec![-5, -9, -13]);
    }

    #[test]
    fn bad_data_slot_rejected() {
        assert!(final_round_offsets(0, &[7], 5, 4, 1).is_err());
    }

    #[test]
    fn observable_defaults_to_all_data() {
        assert_eq!(observable_offsets(3, None), vec![-3, -2, -1]);
    }

    #[test]
    fn observable_support_restricts() {
        assert_eq!(observable_offsets(9, Some(&[0, 1, 2])), vec![-9, -8, -7]);
    }
}
