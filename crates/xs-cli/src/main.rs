//! xscomb CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use xs_combine::{combine_all_with_policy, pairwise, ZeroUncertaintyPolicy};
use xs_data::{read_histogram, Histogram};

#[derive(Parser)]
#[command(name = "xscomb")]
#[command(about = "xscomb - compatibility checks and combination of binned measurements")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report the contents of one dataset
    Inspect {
        /// Input dataset (whitespace-delimited text)
        #[arg(short, long)]
        input: PathBuf,

        /// Restrict the report to a single bin index
        #[arg(long)]
        bin: Option<usize>,

        /// Output file for results (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Pairwise n-sigma compatibility table over two or more datasets
    Compare {
        /// Input datasets (two or more)
        #[arg(short, long, num_args = 2.., required = true)]
        inputs: Vec<PathBuf>,

        /// Sigma multiplier for the per-bin test
        #[arg(long, default_value = "2.0")]
        n_sigma: f64,

        /// Output file for results (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Threads (0 = auto). Use 1 for deterministic parity.
        #[arg(long, default_value = "1")]
        threads: usize,
    },

    /// Fold datasets into one by inverse-variance weighted averaging
    Combine {
        /// Input datasets (two or more), folded left to right
        #[arg(short, long, num_args = 2.., required = true)]
        inputs: Vec<PathBuf>,

        /// Sigma multiplier for the advisory compatibility check
        #[arg(long, default_value = "2.0")]
        n_sigma: f64,

        /// How to treat bins with exactly zero uncertainty
        #[arg(long, value_enum, default_value_t = ZeroPolicyArg::Propagate)]
        zero_uncertainty: ZeroPolicyArg,

        /// Output file for results (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print version information
    Version,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ZeroPolicyArg {
    /// IEEE arithmetic, nothing trapped
    Propagate,
    /// A zero-uncertainty side is authoritative
    Exact,
    /// Refuse zero uncertainties
    Reject,
}

impl From<ZeroPolicyArg> for ZeroUncertaintyPolicy {
    fn from(arg: ZeroPolicyArg) -> Self {
        match arg {
            ZeroPolicyArg::Propagate => ZeroUncertaintyPolicy::Propagate,
            ZeroPolicyArg::Exact => ZeroUncertaintyPolicy::Exact,
            ZeroPolicyArg::Reject => ZeroUncertaintyPolicy::Reject,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_max_level(cli.log_level).with_target(false).init();

    match cli.command {
        Commands::Inspect { input, bin, output } => cmd_inspect(&input, bin, output.as_ref()),
        Commands::Compare { inputs, n_sigma, output, threads } => {
            cmd_compare(&inputs, n_sigma, output.as_ref(), threads)
        }
        Commands::Combine { inputs, n_sigma, zero_uncertainty, output } => {
            cmd_combine(&inputs, n_sigma, zero_uncertainty.into(), output.as_ref())
        }
        Commands::Version => {
            println!("xscomb {}", xs_core::VERSION);
            Ok(())
        }
    }
}

fn cmd_inspect(input: &PathBuf, bin: Option<usize>, output: Option<&PathBuf>) -> Result<()> {
    let h = load_dataset(input)?;

    let payload = match bin {
        Some(i) => serde_json::json!({
            "path": input.display().to_string(),
            "n_bins": h.n_bins(),
            "bin": i,
            "low": h.bin_low(i)?,
            "high": h.bin_high(i)?,
            "center": h.bin_center(i)?,
            "measurement": h.measurement(i)?,
            "error": h.error(i)?,
        }),
        None => {
            let mut rows = Vec::with_capacity(h.n_bins());
            for i in 0..h.n_bins() {
                rows.push(serde_json::json!({
                    "bin": i,
                    "low": h.bin_low(i)?,
                    "high": h.bin_high(i)?,
                    "center": h.bin_center(i)?,
                    "measurement": h.measurement(i)?,
                    "error": h.error(i)?,
                }));
            }
            serde_json::json!({
                "path": input.display().to_string(),
                "n_bins": h.n_bins(),
                "bins": rows,
            })
        }
    };

    write_json(output, payload)
}

fn cmd_compare(
    inputs: &[PathBuf],
    n_sigma: f64,
    output: Option<&PathBuf>,
    threads: usize,
) -> Result<()> {
    if threads > 0 {
        // Best-effort; if a global pool already exists, keep going.
        let _ = rayon::ThreadPoolBuilder::new().num_threads(threads).build_global();
    }

    let histograms = load_datasets(inputs)?;
    let table = pairwise(&histograms, n_sigma)?;

    let rows: Vec<serde_json::Value> = table
        .iter()
        .map(|p| {
            serde_json::json!({
                "left": inputs[p.left].display().to_string(),
                "right": inputs[p.right].display().to_string(),
                "n_bins": p.report.n_bins,
                "n_incompatible": p.report.n_incompatible,
                "compatible": p.report.all_compatible(),
                "pulls": p.report.pulls,
            })
        })
        .collect();

    write_json(output, serde_json::json!({ "n_sigma": n_sigma, "pairs": rows }))
}

fn cmd_combine(
    inputs: &[PathBuf],
    n_sigma: f64,
    policy: ZeroUncertaintyPolicy,
    output: Option<&PathBuf>,
) -> Result<()> {
    let histograms = load_datasets(inputs)?;
    let combined = combine_all_with_policy(&histograms, n_sigma, policy)?;
    tracing::info!(bins = combined.n_bins(), datasets = inputs.len(), "combination complete");

    let payload = serde_json::json!({
        "inputs": inputs.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
        "n_sigma": n_sigma,
        "zero_uncertainty": format!("{policy:?}").to_lowercase(),
        "n_bins": combined.n_bins(),
        "histogram": combined,
    });

    write_json(output, payload)
}

fn load_datasets(inputs: &[PathBuf]) -> Result<Vec<Histogram>> {
    inputs.iter().map(load_dataset).collect()
}

fn load_dataset(path: &PathBuf) -> Result<Histogram> {
    let h = read_histogram(path)
        .with_context(|| format!("failed to load dataset {}", path.display()))?;
    tracing::info!(path = %path.display(), bins = h.n_bins(), "dataset loaded");
    Ok(h)
}

fn write_json(output: Option<&PathBuf>, value: serde_json::Value) -> Result<()> {
    if let Some(path) = output {
        std::fs::write(path, serde_json::to_string_pretty(&value)?)?;
    } else {
        println!("{}", serde_json::to_string_pretty(&value)?);
    }
    Ok(())
}
