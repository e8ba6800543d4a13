//! Compiled circuit representation.
//!
//! A [`Circuit`] is an ordered sequence of physical instructions, TICK
//! boundaries, detector declarations and observable declarations, rendered
//! on demand into the stim circuit text format. Measurement records are
//! addressed by negative offsets counted back from the most recent
//! measurement at the point where the reference appears, so concatenation
//! and repetition never rewrite offsets; what needs guarding instead is
//! that no reference reaches past the records that actually exist, which
//! [`crate::check::check_record_refs`] enforces.

use std::fmt;
use std::ops::{Add, AddAssign, Mul};

use surfgen_common::OpKind;

/// One physical instruction: operation, target indices, numeric arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub kind: OpKind,
    pub targets: Vec<u32>,
    pub args: Vec<f64>,
}

impl Instruction {
    pub fn new(kind: OpKind, targets: Vec<u32>) -> Self {
        Instruction {
            kind,
            targets,
            args: Vec::new(),
        }
    }

    pub fn with_args(kind: OpKind, targets: Vec<u32>, args: Vec<f64>) -> Self {
        Instruction { kind, targets, args }
    }
}

/// One entry of a compiled circuit.
#[derive(Debug, Clone, PartialEq)]
pub enum CircuitOp {
    Gate(Instruction),
    /// Time-step boundary: all qubits advance in lock-step across it.
    Tick,
    /// Parity check over the referenced records (negative offsets).
    Detector(Vec<i32>),
    /// Contribution of the referenced records to one logical observable.
    ObservableInclude { index: u32, offsets: Vec<i32> },
    /// Coordinate annotation, ignored by all record arithmetic.
    QubitCoords { qubit: u32, x: f64, y: f64 },
}

/// An immutable-once-built instruction sequence.
///
/// Built bottom-up per phase, then combined with `+` and `*` into a full
/// experiment. The measurement count is tracked so that record references
/// can be bounds-checked after composition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Circuit {
    ops: Vec<CircuitOp>,
    num_measurements: usize,
}

impl Circuit {
    pub fn new() -> Self {
        Circuit::default()
    }

    pub fn ops(&self) -> &[CircuitOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Total number of measurement records the circuit appends.
    pub fn num_measurements(&self) -> usize {
        self.num_measurements
    }

    pub fn num_ticks(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, CircuitOp::Tick)).count()
    }

    pub fn num_detectors(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, CircuitOp::Detector(_)))
            .count()
    }

    pub fn push(&mut self, instruction: Instruction) {
        if instruction.kind.is_measurement() {
            self.num_measurements += instruction.targets.len();
        }
        self.ops.push(CircuitOp::Gate(instruction));
    }

    pub fn extend(&mut self, instructions: impl IntoIterator<Item = Instruction>) {
        for instruction in instructions {
            self.push(instruction);
        }
    }

    pub fn tick(&mut self) {
        self.ops.push(CircuitOp::Tick);
    }

    pub fn detector(&mut self, offsets: Vec<i32>) {
        self.ops.push(CircuitOp::Detector(offsets));
    }

    pub fn observable_include(&mut self, index: u32, offsets: Vec<i32>) {
        self.ops.push(CircuitOp::ObservableInclude { index, offsets });
    }

    pub fn qubit_coords(&mut self, qubit: u32, x: f64, y: f64) {
        self.ops.push(CircuitOp::QubitCoords { qubit, x, y });
    }

    /// n-fold concatenation of the circuit with itself. Offsets need no
    /// rebasing: each repetition's references look back into the previous
    /// one through the positional-relative encoding.
    pub fn repeat(&self, n: usize) -> Circuit {
        let mut out = Circuit::new();
        for _ in 0..n {
            out += self.clone();
        }
        out
    }
}

impl Add for Circuit {
    type Output = Circuit;

    fn add(mut self, rhs: Circuit) -> Circuit {
        self += rhs;
        self
    }
}

impl AddAssign for Circuit {
    fn add_assign(&mut self, rhs: Circuit) {
        self.num_measurements += rhs.num_measurements;
        self.ops.extend(rhs.ops);
    }
}

impl Mul<usize> for Circuit {
    type Output = Circuit;

    fn mul(self, n: usize) -> Circuit {
        self.repeat(n)
    }
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[f64]) -> fmt::Result {
    if args.is_empty() {
        return Ok(());
    }
    write!(f, "(")?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{arg}")?;
    }
    write!(f, ")")
}

impl fmt::Display for Circuit {
    /// Renders the exact stim text format, one instruction per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for op in &self.ops {
            match op {
                CircuitOp::Gate(inst) => {
                    write!(f, "{}", inst.kind.as_str())?;
                    write_args(f, &inst.args)?;
                    for target in &inst.targets {
                        write!(f, " {target}")?;
                    }
                    writeln!(f)?;
                }
                CircuitOp::Tick => writeln!(f, "TICK")?,
                CircuitOp::Detector(offsets) => {
                    write!(f, "DETECTOR")?;
                    for offset in offsets {
                        write!(f, " rec[{offset}]")?;
                    }
                    writeln!(f)?;
                }
                CircuitOp::ObservableInclude { index, offsets } => {
                    write!(f, "OBSERVABLE_INCLUDE({index})")?;
                    for offset in offsets {
                        write!(f, " rec[{offset}]")?;
                    }
                    writeln!(f)?;
                }
                CircuitOp::QubitCoords { qubit, x, y } => {
                    writeln!(f, "QUBIT_COORDS({x},{y}) {qubit}")?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meas_block() -> Circuit {
        let mut c = Circuit::new();
        c.push(Instruction::new(OpKind::Measure, vec![0, 1]));
        c.detector(vec![-2]);
        c.tick();
        c
    }

    #[test]
    fn measurement_count_tracks_targets() {
        let c = meas_block();
        assert_eq!(c.num_measurements(), 2);
        assert_eq!((c.clone() + c.clone()).num_measurements(), 4);
        assert_eq!(c.repeat(3).num_measurements(), 6);
    }

    #[test]
    fn add_and_mul_agree() {
        let c = meas_block();
        let doubled = c.clone() + c.clone();
        assert_eq!(doubled, c.clone() * 2);
    }

    #[test]
    fn repeat_zero_is_empty() {
        let c = meas_block();
        assert!(c.repeat(0).is_empty());
    }

    #[test]
    fn display_matches_stim_format() {
        let mut c = Circuit::new();
        c.push(Instruction::new(OpKind::Hadamard, vec![0, 3]));
        c.push(Instruction::with_args(
            OpKind::Depolarize1,
            vec![1],
            vec![0.001],
        ));
        c.tick();
        c.push(Instruction::new(OpKind::Measure, vec![1, 2]));
        c.detector(vec![-2, -1]);
        c.observable_include(0, vec![-1]);
        let text = c.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "H 0 3",
                "DEPOLARIZE1(0.001) 1",
                "TICK",
                "M 1 2",
                "DETECTOR rec[-2] rec[-1]",
                "OBSERVABLE_INCLUDE(0) rec[-1]",
            ]
        );
    }

    #[test]
    fn multi_arg_channels_are_comma_separated() {
        let mut c = Circuit::new();
        c.push(Instruction::with_args(
            OpKind::PauliChannel1,
            vec![4],
            vec![0.01, 0.02, 0.03],
        ));
        assert_eq!(c.to_string(), "PAULI_CHANNEL_1(0.01,0.02,0.03) 4\n");
    }
}
