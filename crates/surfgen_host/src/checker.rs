//! Validation of compiled circuit files.

use anyhow::{bail, Result};

use surfgen_core::check::{check_idle_coverage, check_record_refs};
use surfgen_core::frame::propagate;
use surfgen_io::stim_text::load_circuit_file;

pub fn run(path: &str, qubits: Option<u32>) -> Result<()> {
    let circuit = load_circuit_file(path)?;
    println!(
        "{path}: {} ticks, {} measurements, {} detectors",
        circuit.num_ticks(),
        circuit.num_measurements(),
        circuit.num_detectors()
    );

    if let Err(failure) = check_record_refs(&circuit) {
        bail!("{path}: record check failed: {failure}");
    }
    println!("record references: ok");

    match qubits {
        Some(num_qubits) => {
            if let Err(failure) = check_idle_coverage(&circuit, num_qubits) {
                bail!("{path}: idle coverage failed: {failure}");
            }
            println!("idle coverage over {num_qubits} qubits: ok");
        }
        None => println!("idle coverage: skipped (pass --qubits)"),
    }

    // Zero-noise determinism only holds for noiseless circuits; a noisy
    // circuit fails the propagation instead, which is fine to report.
    match propagate(&circuit, &[]) {
        Ok(report) if report.all_quiet() => println!("zero-noise detectors: quiet"),
        Ok(report) => bail!(
            "{path}: {} detectors fire under zero noise: {:?}",
            report.fired().len(),
            report.fired()
        ),
        Err(err) => println!("zero-noise propagation: skipped ({err})"),
    }
    Ok(())
}
