//! Single-experiment compilation.

use anyhow::{bail, Context, Result};

use surfgen_core::experiments::{rep_code, surface_code};
use surfgen_core::layouts::{repetition_code, rotated_surface_code};
use surfgen_core::{
    Circuit, CircuitNoiseModel, DecoherenceNoiseModel, Layout, Model, NoiselessModel, QubitIndex,
    Setup,
};
use surfgen_io::layout_file::{load_setup_file, save_layout_file};
use surfgen_io::stim_text::write_circuit_file;

pub struct GenConfig {
    pub code: String,
    pub distance: usize,
    pub rounds: usize,
    pub basis: String,
    pub meas_reset: bool,
    pub gauge_detectors: bool,
    pub noise: String,
    pub p: f64,
    pub setup: Option<String>,
    pub coords: bool,
    pub out: String,
    pub layout_out: Option<String>,
}

pub fn build_layout(code: &str, distance: usize) -> Result<Layout> {
    match code {
        "surface" => Ok(rotated_surface_code(distance)?),
        "repetition" => Ok(repetition_code(distance)?),
        other => bail!("unknown code family {other:?} (expected surface or repetition)"),
    }
}

pub fn build_model(
    noise: &str,
    p: f64,
    setup_path: Option<&str>,
    layout: &Layout,
) -> Result<Box<dyn Model + Sync>> {
    let index = QubitIndex::from_layout(layout);
    let setup = match setup_path {
        Some(path) => load_setup_file(path)?,
        None => Setup::uniform_circuit_noise(p),
    };
    match noise {
        "none" => Ok(Box::new(NoiselessModel::new(index))),
        "circuit" => Ok(Box::new(CircuitNoiseModel::new(setup, index))),
        "decoherence" => Ok(Box::new(DecoherenceNoiseModel::new(setup, index))),
        other => bail!("unknown noise model {other:?} (expected none, circuit or decoherence)"),
    }
}

pub fn rot_basis(basis: &str) -> Result<bool> {
    match basis {
        "z" => Ok(false),
        "x" => Ok(true),
        other => bail!("unknown basis {other:?} (expected z or x)"),
    }
}

pub fn compile(config: &GenConfig, layout: &Layout, model: &dyn Model) -> Result<Circuit> {
    let circuit = match config.code.as_str() {
        "surface" => {
            let data_init = vec![false; layout.data_qubits().len()];
            let mut opts = surface_code::MemoryOptions::new(config.rounds, &data_init);
            opts.rot_basis = rot_basis(&config.basis)?;
            opts.meas_reset = config.meas_reset;
            opts.gauge_detectors = config.gauge_detectors;
            opts.emit_coords = config.coords;
            surface_code::memory_experiment(model, layout, &opts)?
        }
        "repetition" => {
            if config.basis != "z" {
                bail!("the repetition code only supports the z basis");
            }
            let data_init = vec![false; layout.data_qubits().len()];
            let mut opts = rep_code::MemoryOptions::new(config.rounds, &data_init);
            opts.meas_reset = config.meas_reset;
            opts.emit_coords = config.coords;
            rep_code::memory_experiment(model, layout, &opts)?
        }
        other => bail!("unknown code family {other:?}"),
    };
    Ok(circuit)
}

pub fn run(config: &GenConfig) -> Result<()> {
    let layout = build_layout(&config.code, config.distance)?;
    let model = build_model(&config.noise, config.p, config.setup.as_deref(), &layout)?;
    let circuit = compile(config, &layout, model.as_ref())
        .with_context(|| format!("failed to compile {} d={}", config.code, config.distance))?;

    write_circuit_file(&config.out, &circuit)?;
    log::info!(
        "wrote {}: {} measurements, {} detectors, {} ticks",
        config.out,
        circuit.num_measurements(),
        circuit.num_detectors(),
        circuit.num_ticks()
    );
    println!(
        "{}: {} rounds, {} measurements, {} detectors",
        config.out,
        config.rounds,
        circuit.num_measurements(),
        circuit.num_detectors()
    );

    if let Some(path) = &config.layout_out {
        save_layout_file(path, &layout)?;
        println!("{path}: layout for {}", layout.name());
    }
    Ok(())
}
