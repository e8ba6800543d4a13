//! Structural validation of compiled circuits.
//!
//! Two invariants hold for every compiled experiment: within each time
//! step a qubit is acted on at most once and every qubit is either acted
//! on or carries an explicit idle instruction, and no detector or
//! observable reaches further back than the measurement records that
//! exist at its position. Violations are reported as [`CheckFailure`]
//! values rather than panics so callers can surface them.

use std::collections::HashSet;

use thiserror::Error;

use crate::circuit::{Circuit, CircuitOp};

#[derive(Debug, Error, PartialEq)]
pub enum CheckFailure {
    #[error("qubit {qubit} acted on twice in time step {tick}")]
    DoubleActive { tick: usize, qubit: u32 },
    #[error("qubit {qubit} neither acted on nor idled in time step {tick}")]
    Uncovered { tick: usize, qubit: u32 },
    #[error("record offset {offset} invalid with {available} records available")]
    RecordOutOfRange { offset: i32, available: usize },
}

/// Check the lock-step invariant: in every time step containing at
/// least one instruction, each of the `num_qubits` qubits appears in
/// exactly one non-noise instruction or in a noise (idle) instruction.
///
/// Only meaningful for circuits compiled through a model with idle
/// noise; the noiseless model emits no idle markers, so its circuits
/// legitimately leave qubits untouched.
pub fn check_idle_coverage(circuit: &Circuit, num_qubits: u32) -> Result<(), CheckFailure> {
    let mut tick = 0usize;
    let mut active: HashSet<u32> = HashSet::new();
    let mut noisy: HashSet<u32> = HashSet::new();
    let mut saw_gate = false;

    let mut close_segment = |tick: usize,
                             active: &mut HashSet<u32>,
                             noisy: &mut HashSet<u32>,
                             saw_gate: &mut bool|
     -> Result<(), CheckFailure> {
        if *saw_gate {
            for qubit in 0..num_qubits {
                if !active.contains(&qubit) && !noisy.contains(&qubit) {
                    return Err(CheckFailure::Uncovered { tick, qubit });
                }
            }
        }
        active.clear();
        noisy.clear();
        *saw_gate = false;
        Ok(())
    };

    for op in circuit.ops() {
        match op {
            CircuitOp::Gate(instr) => {
                saw_gate = true;
                if instr.kind.is_noise() {
                    noisy.extend(instr.targets.iter().copied());
                } else {
                    for &target in &instr.targets {
                        if !active.insert(target) {
                            return Err(CheckFailure::DoubleActive {
                                tick,
                                qubit: target,
                            });
                        }
                    }
                }
            }
            CircuitOp::Tick => {
                close_segment(tick, &mut active, &mut noisy, &mut saw_gate)?;
                tick += 1;
            }
            _ => {}
        }
    }
    close_segment(tick, &mut active, &mut noisy, &mut saw_gate)
}

/// Check that every detector and observable reference stays within the
/// records accumulated at the point where it appears.
pub fn check_record_refs(circuit: &Circuit) -> Result<(), CheckFailure> {
    let mut available = 0usize;
    for op in circuit.ops() {
        match op {
            CircuitOp::Gate(instr) if instr.kind.is_measurement() => {
                available += instr.targets.len();
            }
            CircuitOp::Detector(offsets)
            | CircuitOp::ObservableInclude { offsets, .. } => {
                for &offset in offsets {
                    let reach = i64::from(offset) + available as i64;
                    if offset >= 0 || reach < 0 {
                        return Err(CheckFailure::RecordOutOfRange { offset, available });
                    }
                }
            }
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::Instruction;
    use surfgen_common::OpKind;

    #[test]
    fn covered_segment_passes() {
        let mut c = Circuit::new();
        c.push(Instruction::new(OpKind::Hadamard, vec![0]));
        c.push(Instruction::with_args(
            OpKind::Depolarize1,
            vec![1],
            vec![0.1],
        ));
        c.tick();
        assert_eq!(check_idle_coverage(&c, 2), Ok(()));
    }

    #[test]
    fn uncovered_qubit_detected() {
        let mut c = Circuit::new();
        c.push(Instruction::new(OpKind::Hadamard, vec![0]));
        c.tick();
        assert_eq!(
            check_idle_coverage(&c, 2),
            Err(CheckFailure::Uncovered { tick: 0, qubit: 1 })
        );
    }

    #[test]
    fn double_gate_detected() {
        let mut c = Circuit::new();
        c.push(Instruction::new(OpKind::Hadamard, vec![0]));
        c.push(Instruction::new(OpKind::XGate, vec![0, 1]));
        c.tick();
        assert_eq!(
            check_idle_coverage(&c, 2),
            Err(CheckFailure::DoubleActive { tick: 0, qubit: 0 })
        );
    }

    #[test]
    fn noise_on_active_qubit_is_fine() {
        // X_ERROR preceding the measurement it models.
        let mut c = Circuit::new();
        c.push(Instruction::with_args(OpKind::XError, vec![0], vec![0.01]));
        c.push(Instruction::new(OpKind::Measure, vec![0]));
        c.tick();
        assert_eq!(check_idle_coverage(&c, 1), Ok(()));
    }

    #[test]
    fn empty_trailing_segment_ignored() {
        let mut c = Circuit::new();
        c.push(Instruction::new(OpKind::Measure, vec![0]));
        c.tick();
        c.detector(vec![-1]);
        assert_eq!(check_idle_coverage(&c, 1), Ok(()));
    }

    #[test]
    fn record_refs_in_range() {
        let mut c = Circuit::new();
        c.push(Instruction::new(OpKind::Measure, vec![0, 1]));
        c.detector(vec![-2, -1]);
        assert_eq!(check_record_refs(&c), Ok(()));
    }

    #[test]
    fn overreaching_detector_rejected() {
        let mut c = Circuit::new();
        c.push(Instruction::new(OpKind::Measure, vec![0]));
        c.detector(vec![-2]);
        assert_eq!(
            check_record_refs(&c),
            Err(CheckFailure::RecordOutOfRange {
                offset: -2,
                available: 1
            })
        );
    }

    #[test]
    fn nonnegative_offset_rejected() {
        let mut c = Circuit::new();
        c.push(Instruction::new(OpKind::Measure, vec![0]));
        c.observable_include(0, vec![0]);
        assert!(check_record_refs(&c).is_err());
    }
}
