//! Noise-parameter store.
//!
//! A [`Setup`] is an immutable snapshot of numeric parameters keyed by
//! (parameter name, qubit tuple). Lookups fall back from the qubit-specific
//! entry to a global entry keyed by the empty tuple. Parameter sweeps are
//! expressed as independent snapshots produced by [`Setup::with_param`],
//! never by mutating a shared store mid-compilation.

use std::collections::HashMap;

use crate::error::{CompileError, Result};

type ParamKey = (String, Vec<String>);

/// Immutable store of per-qubit and global noise parameters.
#[derive(Debug, Clone, Default)]
pub struct Setup {
    name: String,
    description: String,
    params: HashMap<ParamKey, f64>,
}

impl Setup {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Setup {
            name: name.into(),
            description: description.into(),
            params: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Sets a parameter during construction. An empty `qubits` slice makes
    /// the entry global.
    pub fn set(&mut self, param: &str, qubits: &[&str], value: f64) {
        let key = (param.to_owned(), qubits.iter().map(|q| (*q).to_owned()).collect());
        self.params.insert(key, value);
    }

    /// Returns a new snapshot with one parameter replaced. The receiver is
    /// left untouched, so concurrent compilations can keep reading it.
    pub fn with_param(&self, param: &str, qubits: &[&str], value: f64) -> Setup {
        let mut snapshot = self.clone();
        snapshot.set(param, qubits, value);
        snapshot
    }

    /// Looks up a parameter for the given qubit tuple, falling back to the
    /// global entry. A miss on both is a fatal configuration error.
    pub fn param(&self, param: &str, qubits: &[&str]) -> Result<f64> {
        let key = (param.to_owned(), qubits.iter().map(|q| (*q).to_owned()).collect());
        if let Some(&value) = self.params.get(&key) {
            return Ok(value);
        }
        let global = (param.to_owned(), Vec::new());
        if let Some(&value) = self.params.get(&global) {
            return Ok(value);
        }
        Err(CompileError::MissingParameter {
            param: param.to_owned(),
            qubits: qubits.join(", "),
        })
    }

    /// All stored entries as (parameter, qubit tuple, value), in no
    /// particular order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[String], f64)> {
        self.params
            .iter()
            .map(|((param, qubits), &value)| (param.as_str(), qubits.as_slice(), value))
    }

    /// Uniform circuit-level noise: one probability for every operation on
    /// every qubit. Convenient for memory-experiment scans.
    pub fn uniform_circuit_noise(prob: f64) -> Setup {
        let mut setup = Setup::new("uniform", "uniform circuit-level noise");
        for param in [
            "sq_error_prob",
            "cz_error_prob",
            "meas_error_prob",
            "reset_error_prob",
            "idle_error_prob",
        ] {
            setup.set(param, &[], prob);
        }
        setup
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qubit_entry_shadows_global() {
        let mut setup = Setup::new("t", "");
        setup.set("sq_error_prob", &[], 0.001);
        setup.set("sq_error_prob", &["D1"], 0.01);
        assert_eq!(setup.param("sq_error_prob", &["D1"]).unwrap(), 0.01);
        assert_eq!(setup.param("sq_error_prob", &["D2"]).unwrap(), 0.001);
    }

    #[test]
    fn pair_keys_are_ordered() {
        let mut setup = Setup::new("t", "");
        setup.set("cz_error_prob", &["X1", "D1"], 0.02);
        assert!(setup.param("cz_error_prob", &["D1", "X1"]).is_err());
        assert_eq!(setup.param("cz_error_prob", &["X1", "D1"]).unwrap(), 0.02);
    }

    #[test]
    fn missing_parameter_is_fatal() {
        let setup = Setup::new("t", "");
        let err = setup.param("meas_error_prob", &["A1"]).unwrap_err();
        assert!(matches!(err, CompileError::MissingParameter { .. }));
    }

    #[test]
    fn with_param_leaves_original_untouched() {
        let base = Setup::uniform_circuit_noise(0.001);
        let bumped = base.with_param("idle_error_prob", &[], 0.1);
        assert_eq!(base.param("idle_error_prob", &[]).unwrap(), 0.001);
        assert_eq!(bumped.param("idle_error_prob", &[]).unwrap(), 0.1);
    }
}
