//! The provided noise models.

use surfgen_common::OpKind;

use crate::circuit::Instruction;
use crate::error::Result;
use crate::models::{require_pairs, Model, QubitIndex};
use crate::setup::Setup;

use super::util::idle_error_probs;

/// Noise-free model: bare physical gates, no idle instructions.
#[derive(Debug, Clone)]
pub struct NoiselessModel {
    index: QubitIndex,
}

impl NoiselessModel {
    pub fn new(index: QubitIndex) -> Self {
        NoiselessModel { index }
    }

    fn bare(&self, kind: OpKind, qubits: &[&str]) -> Result<Vec<Instruction>> {
        Ok(vec![Instruction::new(kind, self.index.targets(qubits)?)])
    }
}

impl Model for NoiselessModel {
    fn hadamard(&self, qubits: &[&str]) -> Result<Vec<Instruction>> {
        self.bare(OpKind::Hadamard, qubits)
    }

    fn s_gate(&self, qubits: &[&str]) -> Result<Vec<Instruction>> {
        self.bare(OpKind::SGate, qubits)
    }

    fn x_gate(&self, qubits: &[&str]) -> Result<Vec<Instruction>> {
        self.bare(OpKind::XGate, qubits)
    }

    fn z_gate(&self, qubits: &[&str]) -> Result<Vec<Instruction>> {
        self.bare(OpKind::ZGate, qubits)
    }

    fn cphase(&self, qubits: &[&str]) -> Result<Vec<Instruction>> {
        require_pairs(qubits)?;
        self.bare(OpKind::Cphase, qubits)
    }

    fn measure(&self, qubits: &[&str]) -> Result<Vec<Instruction>> {
        self.bare(OpKind::Measure, qubits)
    }

    fn reset(&self, qubits: &[&str]) -> Result<Vec<Instruction>> {
        self.bare(OpKind::Reset, qubits)
    }

    fn idle(&self, _qubits: &[&str]) -> Result<Vec<Instruction>> {
        Ok(Vec::new())
    }
}

/// Circuit-level depolarizing noise.
///
/// Every single-qubit gate is followed by DEPOLARIZE1, every CZ pair by
/// DEPOLARIZE2, measurements are preceded by a classical X_ERROR and
/// resets followed by one, and idling qubits depolarize. Parameters:
/// `sq_error_prob`, `cz_error_prob`, `meas_error_prob`,
/// `reset_error_prob`, `idle_error_prob`.
#[derive(Debug, Clone)]
pub struct CircuitNoiseModel {
    setup: Setup,
    index: QubitIndex,
}

impl CircuitNoiseModel {
    pub fn new(setup: Setup, index: QubitIndex) -> Self {
        CircuitNoiseModel { setup, index }
    }

    fn single_qubit_gate(&self, kind: OpKind, qubits: &[&str]) -> Result<Vec<Instruction>> {
        let mut out = vec![Instruction::new(kind, self.index.targets(qubits)?)];
        for &qubit in qubits {
            let prob = self.setup.param("sq_error_prob", &[qubit])?;
            out.push(Instruction::with_args(
                OpKind::Depolarize1,
                vec![self.index.get(qubit)?],
                vec![prob],
            ));
        }
        Ok(out)
    }
}

impl Model for CircuitNoiseModel {
    fn hadamard(&self, qubits: &[&str]) -> Result<Vec<Instruction>> {
        self.single_qubit_gate(OpKind::Hadamard, qubits)
    }

    fn s_gate(&self, qubits: &[&str]) -> Result<Vec<Instruction>> {
        self.single_qubit_gate(OpKind::SGate, qubits)
    }

    fn x_gate(&self, qubits: &[&str]) -> Result<Vec<Instruction>> {
        self.single_qubit_gate(OpKind::XGate, qubits)
    }

    fn z_gate(&self, qubits: &[&str]) -> Result<Vec<Instruction>> {
        self.single_qubit_gate(OpKind::ZGate, qubits)
    }

    fn cphase(&self, qubits: &[&str]) -> Result<Vec<Instruction>> {
        require_pairs(qubits)?;
        let mut out = vec![Instruction::new(OpKind::Cphase, self.index.targets(qubits)?)];
        for pair in qubits.chunks_exact(2) {
            let prob = self.setup.param("cz_error_prob", pair)?;
            out.push(Instruction::with_args(
                OpKind::Depolarize2,
                self.index.targets(pair)?,
                vec![prob],
            ));
        }
        Ok(out)
    }

    fn measure(&self, qubits: &[&str]) -> Result<Vec<Instruction>> {
        let mut out = Vec::with_capacity(qubits.len() + 1);
        for &qubit in qubits {
            let prob = self.setup.param("meas_error_prob", &[qubit])?;
            out.push(Instruction::with_args(
                OpKind::XError,
                vec![self.index.get(qubit)?],
                vec![prob],
            ));
        }
        out.push(Instruction::new(OpKind::Measure, self.index.targets(qubits)?));
        Ok(out)
    }

    fn reset(&self, qubits: &[&str]) -> Result<Vec<Instruction>> {
        let mut out = vec![Instruction::new(OpKind::Reset, self.index.targets(qubits)?)];
        for &qubit in qubits {
            let prob = self.setup.param("reset_error_prob", &[qubit])?;
            out.push(Instruction::with_args(
                OpKind::XError,
                vec![self.index.get(qubit)?],
                vec![prob],
            ));
        }
        Ok(out)
    }

    fn idle(&self, qubits: &[&str]) -> Result<Vec<Instruction>> {
        let mut out = Vec::with_capacity(qubits.len());
        for &qubit in qubits {
            let prob = self.setup.param("idle_error_prob", &[qubit])?;
            out.push(Instruction::with_args(
                OpKind::Depolarize1,
                vec![self.index.get(qubit)?],
                vec![prob],
            ));
        }
        Ok(out)
    }
}

/// Amplitude/phase damping noise from T1/T2 times.
///
/// Each operation is followed by a Pauli-twirled PAULI_CHANNEL_1 on every
/// involved qubit, with probabilities derived from `relax_time`,
/// `deph_time` and the per-operation durations (`sq_gate_duration`,
/// `cz_gate_duration`, `reset_duration`, `idle_duration`). Measurements
/// keep the classical `meas_error_prob` flip.
#[derive(Debug, Clone)]
pub struct DecoherenceNoiseModel {
    setup: Setup,
    index: QubitIndex,
}

impl DecoherenceNoiseModel {
    pub fn new(setup: Setup, index: QubitIndex) -> Self {
        DecoherenceNoiseModel { setup, index }
    }

    fn damping(&self, qubit: &str, duration_param: &str) -> Result<Instruction> {
        let relax_time = self.setup.param("relax_time", &[qubit])?;
        let deph_time = self.setup.param("deph_time", &[qubit])?;
        let duration = self.setup.param(duration_param, &[qubit])?;
        let probs = idle_error_probs(relax_time, deph_time, duration)?;
        Ok(Instruction::with_args(
            OpKind::PauliChannel1,
            vec![self.index.get(qubit)?],
            probs.to_vec(),
        ))
    }

    fn damped_gate(
        &self,
        kind: OpKind,
        qubits: &[&str],
        duration_param: &str,
    ) -> Result<Vec<Instruction>> {
        let mut out = vec![Instruction::new(kind, self.index.targets(qubits)?)];
        for &qubit in qubits {
            out.push(self.damping(qubit, duration_param)?);
        }
        Ok(out)
    }
}

impl Model for DecoherenceNoiseModel {
    fn hadamard(&self, qubits: &[&str]) -> Result<Vec<Instruction>> {
        self.damped_gate(OpKind::Hadamard, qubits, "sq_gate_duration")
    }

    fn s_gate(&self, qubits: &[&str]) -> Result<Vec<Instruction>> {
        self.damped_gate(OpKind::SGate, qubits, "sq_gate_duration")
    }

    fn x_gate(&self, qubits: &[&str]) -> Result<Vec<Instruction>> {
        self.damped_gate(OpKind::XGate, qubits, "sq_gate_duration")
    }

    fn z_gate(&self, qubits: &[&str]) -> Result<Vec<Instruction>> {
        self.damped_gate(OpKind::ZGate, qubits, "sq_gate_duration")
    }

    fn cphase(&self, qubits: &[&str]) -> Result<Vec<Instruction>> {
        require_pairs(qubits)?;
        self.damped_gate(OpKind::Cphase, qubits, "cz_gate_duration")
    }

    fn measure(&self, qubits: &[&str]) -> Result<Vec<Instruction>> {
        let mut out = Vec::with_capacity(qubits.len() + 1);
        for &qubit in qubits {
            let prob = self.setup.param("meas_error_prob", &[qubit])?;
            out.push(Instruction::with_args(
                OpKind::XError,
                vec![self.index.get(qubit)?],
                vec![prob],
            ));
        }
        out.push(Instruction::new(OpKind::Measure, self.index.targets(qubits)?));
        Ok(out)
    }

    fn reset(&self, qubits: &[&str]) -> Result<Vec<Instruction>> {
        self.damped_gate(OpKind::Reset, qubits, "reset_duration")
    }

    fn idle(&self, qubits: &[&str]) -> Result<Vec<Instruction>> {
        qubits.iter().map(|&q| self.damping(q, "idle_duration")).collect()
    }
}
