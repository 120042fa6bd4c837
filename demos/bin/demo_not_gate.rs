//! NOT Gate Demo
//!
//! Flips two qubits, measures them on the local simulator and prints the
//! resulting histogram.

use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use qflip_adapter_sim::SimulatorBackend;
use qflip_demos::runners::{NOT_GATE_SHOTS, run_not_gate_on, single_qubit_measure};

#[derive(Parser, Debug)]
#[command(name = "demo-not-gate")]
#[command(about = "Apply X to two qubits and measure them")]
struct Args {
    /// Size of the quantum register
    #[arg(short, long, default_value = "2")]
    qubits: u32,

    /// Size of the classical register
    #[arg(short, long, default_value = "2")]
    classical_bits: u32,

    /// Print the full execution result as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Setup logging
    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&args).await {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(args: &Args) -> anyhow::Result<()> {
    if args.json {
        let backend = SimulatorBackend::new();
        let result =
            run_not_gate_on(&backend, args.qubits, args.classical_bits, NOT_GATE_SHOTS).await?;
        println!("{}", result.to_json()?);
        return Ok(());
    }

    let counts = single_qubit_measure(args.qubits, args.classical_bits).await?;
    println!("Total count for various states are: {counts}");
    Ok(())
}
