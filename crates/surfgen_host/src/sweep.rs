//! Parallel compilation of an experiment grid.
//!
//! Each (distance, probability) cell gets its own seed, drawn up front
//! from the root seed so the assignment does not depend on worker
//! scheduling. The seeds are for the downstream sampler; compilation
//! itself is deterministic. A plain-text manifest next to the circuits
//! records the full grid.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use surfgen_io::stim_text::write_circuit_file;

use crate::gen::{self, GenConfig};

pub struct SweepConfig {
    pub code: String,
    pub distances: String,
    pub probs: String,
    pub rounds: usize,
    pub basis: String,
    pub meas_reset: bool,
    pub seed: u64,
    pub out_dir: String,
}

struct Task {
    distance: usize,
    prob: f64,
    seed: u64,
    path: PathBuf,
}

fn parse_list<T: std::str::FromStr>(text: &str, what: &str) -> Result<Vec<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    text.split(',')
        .map(|part| {
            part.trim()
                .parse::<T>()
                .with_context(|| format!("bad {what} entry {part:?}"))
        })
        .collect()
}

pub fn run(config: &SweepConfig) -> Result<()> {
    let distances: Vec<usize> = parse_list(&config.distances, "distance")?;
    let probs: Vec<f64> = parse_list(&config.probs, "probability")?;

    let out_dir = Path::new(&config.out_dir);
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory {}", out_dir.display()))?;

    // Draw every task seed before any worker runs.
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut tasks = Vec::new();
    for &distance in &distances {
        for &prob in &probs {
            let seed: u64 = rng.gen();
            let path = out_dir.join(format!(
                "{}_d{distance}_p{prob:e}_r{}.stim",
                config.code, config.rounds
            ));
            tasks.push(Task {
                distance,
                prob,
                seed,
                path,
            });
        }
    }

    tasks.par_iter().try_for_each(|task| -> Result<()> {
        let layout = gen::build_layout(&config.code, task.distance)?;
        let model = gen::build_model("circuit", task.prob, None, &layout)?;
        let gen_config = GenConfig {
            code: config.code.clone(),
            distance: task.distance,
            rounds: config.rounds,
            basis: config.basis.clone(),
            meas_reset: config.meas_reset,
            gauge_detectors: false,
            noise: "circuit".into(),
            p: task.prob,
            setup: None,
            coords: false,
            out: String::new(),
            layout_out: None,
        };
        let circuit = gen::compile(&gen_config, &layout, model.as_ref())?;
        write_circuit_file(&task.path, &circuit)?;
        log::info!(
            "compiled {} (seed {})",
            task.path.display(),
            task.seed
        );
        Ok(())
    })?;

    let manifest_path = out_dir.join("manifest.txt");
    let mut manifest = fs::File::create(&manifest_path)
        .with_context(|| format!("failed to create {}", manifest_path.display()))?;
    writeln!(manifest, "# root_seed={} rounds={}", config.seed, config.rounds)?;
    for task in &tasks {
        writeln!(
            manifest,
            "{}\tdistance={}\tp={:e}\tseed={}",
            task.path.display(),
            task.distance,
            task.prob,
            task.seed
        )?;
    }
    println!(
        "{}: {} circuits, manifest at {}",
        out_dir.display(),
        tasks.len(),
        manifest_path.display()
    );
    Ok(())
}
