//! Property-based tests over randomized experiment parameters.

use proptest::prelude::*;

use surfgen_core::check::{check_idle_coverage, check_record_refs};
use surfgen_core::detectors::comparison_depth;
use surfgen_core::experiments::{rep_code, surface_code};
use surfgen_core::frame::propagate;
use surfgen_core::layouts::{repetition_code, rotated_surface_code};
use surfgen_core::{CircuitNoiseModel, NoiselessModel, QubitIndex, Setup};

proptest! {
    /// Every compiled surface-code experiment keeps its record references
    /// in bounds and its zero-noise detectors quiet, whatever the round
    /// count, initial state, basis or reset policy.
    #[test]
    fn surface_experiments_are_well_formed(
        num_rounds in 1usize..12,
        seed in any::<u16>(),
        rot_basis in any::<bool>(),
        meas_reset in any::<bool>(),
    ) {
        let layout = rotated_surface_code(3).unwrap();
        let model = NoiselessModel::new(QubitIndex::from_layout(&layout));
        let data_init: Vec<bool> = (0..9).map(|i| (seed >> i) & 1 == 1).collect();
        let mut opts = surface_code::MemoryOptions::new(num_rounds, &data_init);
        opts.rot_basis = rot_basis;
        opts.meas_reset = meas_reset;
        let circuit = surface_code::memory_experiment(&model, &layout, &opts).unwrap();

        prop_assert!(check_record_refs(&circuit).is_ok());
        let report = propagate(&circuit, &[]).unwrap();
        prop_assert!(report.all_quiet(), "fired: {:?}", report.fired());
        prop_assert_eq!(report.observables.get(&0), Some(&false));
    }

    /// Measurement and detector totals follow the round-count state
    /// machine of the repetition-code assembler.
    #[test]
    fn repetition_counts_follow_round_structure(
        distance in 2usize..7,
        num_rounds in 1usize..12,
        meas_reset in any::<bool>(),
    ) {
        let layout = repetition_code(distance).unwrap();
        let model = NoiselessModel::new(QubitIndex::from_layout(&layout));
        let data_init = vec![false; distance];
        let mut opts = rep_code::MemoryOptions::new(num_rounds, &data_init);
        opts.meas_reset = meas_reset;
        let circuit = rep_code::memory_experiment(&model, &layout, &opts).unwrap();

        let num_anc = distance - 1;
        prop_assert_eq!(
            circuit.num_measurements(),
            num_rounds * num_anc + distance
        );
        // One detector per ancilla per round plus the final block.
        prop_assert_eq!(circuit.num_detectors(), (num_rounds + 1) * num_anc);
        prop_assert!(check_record_refs(&circuit).is_ok());
    }

    /// Noise-model compilation preserves the lock-step idling invariant
    /// for every parameter combination.
    #[test]
    fn noisy_surface_experiments_cover_all_qubits(
        num_rounds in 1usize..8,
        rot_basis in any::<bool>(),
        meas_reset in any::<bool>(),
        prob in 1e-6f64..0.1,
    ) {
        let layout = rotated_surface_code(3).unwrap();
        let model = CircuitNoiseModel::new(
            Setup::uniform_circuit_noise(prob),
            QubitIndex::from_layout(&layout),
        );
        let data_init = vec![false; 9];
        let mut opts = surface_code::MemoryOptions::new(num_rounds, &data_init);
        opts.rot_basis = rot_basis;
        opts.meas_reset = meas_reset;
        let circuit = surface_code::memory_experiment(&model, &layout, &opts).unwrap();

        prop_assert!(check_idle_coverage(&circuit, layout.num_qubits() as u32).is_ok());
        prop_assert!(check_record_refs(&circuit).is_ok());
    }

    /// The comparison depth decides how many early rounds an experiment
    /// has; detector totals shift accordingly.
    #[test]
    fn surface_detector_totals(num_rounds in 1usize..12, meas_reset in any::<bool>()) {
        let layout = rotated_surface_code(3).unwrap();
        let model = NoiselessModel::new(QubitIndex::from_layout(&layout));
        let data_init = vec![false; 9];
        let mut opts = surface_code::MemoryOptions::new(num_rounds, &data_init);
        opts.meas_reset = meas_reset;
        let circuit = surface_code::memory_experiment(&model, &layout, &opts).unwrap();

        let boundary = comparison_depth(meas_reset);
        let early = num_rounds.min(boundary);
        let interior = num_rounds - early;
        // Early rounds declare 4 detectors (measurement basis only),
        // interior rounds 8, the final block 4.
        prop_assert_eq!(circuit.num_detectors(), early * 4 + interior * 8 + 4);
    }
}
