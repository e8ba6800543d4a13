mod checker;
mod gen;
mod sweep;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(about = "Surface-code experiment circuit generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a single memory experiment to a stim circuit file.
    Gen {
        /// Code family: "surface" or "repetition".
        #[arg(long, default_value = "surface")]
        code: String,
        #[arg(long, default_value_t = 3)]
        distance: usize,
        #[arg(long, default_value_t = 10)]
        rounds: usize,
        /// Measurement basis: "z" or "x" (surface code only).
        #[arg(long, default_value = "z")]
        basis: String,
        /// Reset ancillas after measuring them.
        #[arg(long)]
        meas_reset: bool,
        /// Declare first-round detectors for both stabilizer types.
        #[arg(long)]
        gauge_detectors: bool,
        /// Noise model: "none", "circuit" or "decoherence".
        #[arg(long, default_value = "none")]
        noise: String,
        /// Uniform error probability for the circuit noise model.
        #[arg(long, default_value_t = 1e-3)]
        p: f64,
        /// Setup file overriding the uniform probabilities.
        #[arg(long)]
        setup: Option<String>,
        /// Prefix the circuit with QUBIT_COORDS declarations.
        #[arg(long)]
        coords: bool,
        #[arg(long, default_value = "memory.stim")]
        out: String,
        /// Also write the layout as JSON next to the circuit.
        #[arg(long)]
        layout_out: Option<String>,
    },
    /// Validate a compiled circuit file.
    Check {
        circuit: String,
        /// Expected qubit count for the idle-coverage check; skipped
        /// when absent.
        #[arg(long)]
        qubits: Option<u32>,
    },
    /// Compile a grid of experiments with derived per-task seeds.
    Sweep {
        #[arg(long, default_value = "surface")]
        code: String,
        /// Comma-separated code distances.
        #[arg(long, default_value = "3,5")]
        distances: String,
        /// Comma-separated uniform error probabilities.
        #[arg(long, default_value = "1e-3")]
        probs: String,
        #[arg(long, default_value_t = 10)]
        rounds: usize,
        #[arg(long, default_value = "z")]
        basis: String,
        #[arg(long)]
        meas_reset: bool,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value = "sweep")]
        out_dir: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Gen {
            code,
            distance,
            rounds,
            basis,
            meas_reset,
            gauge_detectors,
            noise,
            p,
            setup,
            coords,
            out,
            layout_out,
        } => gen::run(&gen::GenConfig {
            code,
            distance,
            rounds,
            basis,
            meas_reset,
            gauge_detectors,
            noise,
            p,
            setup,
            coords,
            out,
            layout_out,
        }),
        Commands::Check { circuit, qubits } => checker::run(&circuit, qubits),
        Commands::Sweep {
            code,
            distances,
            probs,
            rounds,
            basis,
            meas_reset,
            seed,
            out_dir,
        } => sweep::run(&sweep::SweepConfig {
            code,
            distances,
            probs,
            rounds,
            basis,
            meas_reset,
            seed,
            out_dir,
        }),
    }
}
