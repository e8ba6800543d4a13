//! Pauli-frame propagation through compiled circuits.
//!
//! Tracks the X and Z error components accumulated on every qubit as a
//! circuit executes, instead of the full stabilizer state. Clifford
//! gates update the frame by their conjugation rules; measurements
//! record whether the frame flips the outcome, and detectors and
//! observables evaluate as XORs of those recorded flips. This is exact
//! and deterministic, which makes it a verification engine rather than
//! a sampler: probabilistic noise channels are rejected unless their
//! probability is exactly zero or, for classical flips, exactly one.

use std::collections::BTreeMap;

use surfgen_common::OpKind;

use crate::circuit::{Circuit, CircuitOp, Instruction};
use crate::error::{CompileError, Result};

/// A single-qubit Pauli error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pauli {
    X,
    Y,
    Z,
}

/// A Pauli error injected at a TICK boundary.
///
/// `after_tick` counts consumed TICKs: zero injects before any gate
/// executes, one injects once the first time step has completed.
#[derive(Debug, Clone, Copy)]
pub struct Injection {
    pub after_tick: usize,
    pub qubit: u32,
    pub pauli: Pauli,
}

/// Outcome of propagating a frame through a circuit.
#[derive(Debug, Clone, Default)]
pub struct FrameReport {
    /// Per measurement record, whether the frame flips the outcome.
    pub flips: Vec<bool>,
    /// Detector values in declaration order.
    pub detectors: Vec<bool>,
    /// Observable values by observable index.
    pub observables: BTreeMap<u32, bool>,
}

impl FrameReport {
    /// True when every detector evaluated to zero.
    pub fn all_quiet(&self) -> bool {
        self.detectors.iter().all(|&d| !d)
    }

    /// Indices of the detectors that fired.
    pub fn fired(&self) -> Vec<usize> {
        self.detectors
            .iter()
            .enumerate()
            .filter_map(|(i, &d)| d.then_some(i))
            .collect()
    }
}

struct Frame {
    x: Vec<bool>,
    z: Vec<bool>,
}

impl Frame {
    fn new(num_qubits: usize) -> Self {
        Frame {
            x: vec![false; num_qubits],
            z: vec![false; num_qubits],
        }
    }

    fn inject(&mut self, qubit: usize, pauli: Pauli) {
        match pauli {
            Pauli::X => self.x[qubit] = !self.x[qubit],
            Pauli::Z => self.z[qubit] = !self.z[qubit],
            Pauli::Y => {
                self.x[qubit] = !self.x[qubit];
                self.z[qubit] = !self.z[qubit];
            }
        }
    }

    fn hadamard(&mut self, qubit: usize) {
        let (x, z) = (self.x[qubit], self.z[qubit]);
        self.x[qubit] = z;
        self.z[qubit] = x;
    }

    fn s_gate(&mut self, qubit: usize) {
        self.z[qubit] ^= self.x[qubit];
    }

    fn cphase(&mut self, a: usize, b: usize) {
        self.z[a] ^= self.x[b];
        self.z[b] ^= self.x[a];
    }

    fn reset(&mut self, qubit: usize) {
        self.x[qubit] = false;
        self.z[qubit] = false;
    }
}

/// Propagate a Pauli frame through `circuit`, injecting the given
/// errors, and evaluate every detector and observable.
pub fn propagate(circuit: &Circuit, injections: &[Injection]) -> Result<FrameReport> {
    let num_qubits = highest_target(circuit) + 1;
    let mut frame = Frame::new(num_qubits);
    let mut report = FrameReport::default();

    let mut tick = 0usize;
    let mut pending: Vec<&Injection> = injections.iter().collect();
    apply_due(&mut frame, &mut pending, tick, num_qubits)?;

    for op in circuit.ops() {
        match op {
            CircuitOp::Gate(instr) => apply_gate(&mut frame, &mut report, instr)?,
            CircuitOp::Tick => {
                tick += 1;
                apply_due(&mut frame, &mut pending, tick, num_qubits)?;
            }
            CircuitOp::Detector(offsets) => {
                let mut value = false;
                for &offset in offsets {
                    value ^= lookup(&report.flips, offset)?;
                }
                report.detectors.push(value);
            }
            CircuitOp::ObservableInclude { index, offsets } => {
                let entry = report.observables.entry(*index).or_default();
                for &offset in offsets {
                    *entry ^= lookup(&report.flips, offset)?;
                }
            }
            CircuitOp::QubitCoords { .. } => {}
        }
    }

    if let Some(stale) = pending.first() {
        return Err(CompileError::InvalidArgument(format!(
            "injection after tick {} never fired; circuit has {} ticks",
            stale.after_tick, tick
        )));
    }

    Ok(report)
}

fn apply_due(
    frame: &mut Frame,
    pending: &mut Vec<&Injection>,
    tick: usize,
    num_qubits: usize,
) -> Result<()> {
    let mut i = 0;
    while i < pending.len() {
        let inj = pending[i];
        if inj.after_tick == tick {
            let qubit = inj.qubit as usize;
            if qubit >= num_qubits {
                return Err(CompileError::InvalidArgument(format!(
                    "injection targets qubit {qubit}, circuit has {num_qubits}"
                )));
            }
            frame.inject(qubit, inj.pauli);
            pending.remove(i);
        } else {
            i += 1;
        }
    }
    Ok(())
}

fn apply_gate(frame: &mut Frame, report: &mut FrameReport, instr: &Instruction) -> Result<()> {
    match instr.kind {
        OpKind::Hadamard => {
            for &t in &instr.targets {
                frame.hadamard(t as usize);
            }
        }
        OpKind::SGate => {
            for &t in &instr.targets {
                frame.s_gate(t as usize);
            }
        }
        // Circuit-level X and Z are part of the ideal execution; they
        // commute with the error frame up to phase.
        OpKind::XGate | OpKind::ZGate => {}
        OpKind::Cphase => {
            for pair in instr.targets.chunks_exact(2) {
                frame.cphase(pair[0] as usize, pair[1] as usize);
            }
        }
        OpKind::Measure => {
            for &t in &instr.targets {
                report.flips.push(frame.x[t as usize]);
            }
        }
        OpKind::Reset => {
            for &t in &instr.targets {
                frame.reset(t as usize);
            }
        }
        OpKind::XError => {
            let prob = instr.args.first().copied().unwrap_or(0.0);
            if prob == 1.0 {
                for &t in &instr.targets {
                    frame.x[t as usize] = !frame.x[t as usize];
                }
            } else if prob != 0.0 {
                return Err(CompileError::UnsupportedGate(format!(
                    "X_ERROR({prob}) is probabilistic; frame propagation is deterministic"
                )));
            }
        }
        OpKind::Depolarize1 | OpKind::Depolarize2 | OpKind::PauliChannel1 => {
            if instr.args.iter().any(|&p| p != 0.0) {
                return Err(CompileError::UnsupportedGate(format!(
                    "{} with nonzero probability cannot be propagated deterministically",
                    instr.kind.as_str()
                )));
            }
        }
    }
    Ok(())
}

fn lookup(flips: &[bool], offset: i32) -> Result<bool> {
    let len = flips.len() as i64;
    let slot = len + offset as i64;
    if offset >= 0 || slot < 0 {
        return Err(CompileError::InvalidArgument(format!(
            "record offset {offset} out of range with {len} measurements recorded"
        )));
    }
    Ok(flips[slot as usize])
}

fn highest_target(circuit: &Circuit) -> usize {
    circuit
        .ops()
        .iter()
        .filter_map(|op| match op {
            CircuitOp::Gate(instr) => instr.targets.iter().max().copied(),
            _ => None,
        })
        .max()
        .unwrap_or(0) as usize
}
