//! Numeric helpers for noise-model parameters.

use crate::error::{CompileError, Result};

/// Probabilities of X, Y and Z errors for a Pauli-twirled amplitude and
/// phase damping channel of the given duration.
///
/// `relax_time` is T1, `deph_time` is T2. See arXiv:1210.5799 and
/// arXiv:1305.2021 for the twirling approximation.
pub fn idle_error_probs(relax_time: f64, deph_time: f64, duration: f64) -> Result<[f64; 3]> {
    if relax_time <= 0.0 {
        return Err(CompileError::InvalidArgument(
            "relaxation time (T1) must be positive".into(),
        ));
    }
    if deph_time <= 0.0 {
        return Err(CompileError::InvalidArgument(
            "dephasing time (T2) must be positive".into(),
        ));
    }
    if duration <= 0.0 {
        return Err(CompileError::InvalidArgument(
            "idling duration must be positive".into(),
        ));
    }

    let relax_prob = 1.0 - (-duration / relax_time).exp();
    let deph_prob = 1.0 - (-duration / deph_time).exp();

    let x_prob = 0.25 * relax_prob;
    let y_prob = 0.25 * relax_prob;
    let z_prob = 0.5 * deph_prob - 0.25 * relax_prob;

    Ok([x_prob, y_prob, z_prob])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_duration_gives_small_probs() {
        let [px, py, pz] = idle_error_probs(30_000.0, 40_000.0, 20.0).unwrap();
        assert!(px > 0.0 && px < 1e-3);
        assert_eq!(px, py);
        assert!(pz > 0.0 && pz < 1e-3);
    }

    #[test]
    fn invalid_inputs_rejected() {
        assert!(idle_error_probs(0.0, 1.0, 1.0).is_err());
        assert!(idle_error_probs(1.0, -1.0, 1.0).is_err());
        assert!(idle_error_probs(1.0, 1.0, 0.0).is_err());
    }
}
