use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{info, warn};
use local_fields::request::{FieldRequest, ValidatedRequest};
use local_fields::fields::flatten;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "local-fields")]
#[command(about = "Dipolar, Lorentz and contact fields at a muon site")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number of threads to use (default: all available cores)
    #[arg(short, long, global = true)]
    threads: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the local fields described by a JSON job file
    Fields {
        /// Job file
        #[arg(short, long)]
        input: PathBuf,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep atoms whose Fourier component is zero
        #[arg(long)]
        keep_nonmagnetic: bool,
    },
    /// Print the dipolar tensor of the magnetic positions at every site (Å⁻³)
    Tensor {
        #[arg(short, long)]
        input: PathBuf,

        /// Keep atoms whose Fourier component is zero
        #[arg(long)]
        keep_nonmagnetic: bool,
    },
    /// Print the radius of the largest sphere around each site that fits in the supercell
    Sphere {
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(Serialize)]
struct FieldsReport<'a> {
    calculation: &'a str,
    sites: Vec<SiteReport<'a>>,
}

#[derive(Serialize)]
struct SiteReport<'a> {
    /// Fractional coordinates of the site.
    site: [f64; 3],
    fields: &'a local_fields::FieldOutput,
    /// Contact + dipolar + Lorentz, contact scaled by the coupling.
    total: Vec<[f64; 3]>,
    flat: Vec<f64>,
    diagnostics: &'a [local_fields::Diagnostic],
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Set thread pool size if specified
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to set thread pool size")?;
        info!("Using {} threads", threads);
    }

    info!("Starting local-fields v{}", local_fields::VERSION);

    match cli.command {
        Commands::Fields {
            input,
            output,
            keep_nonmagnetic,
        } => {
            info!("Evaluating fields from {}", input.display());
            run_fields(&input, output.as_deref(), keep_nonmagnetic)
        }
        Commands::Tensor {
            input,
            keep_nonmagnetic,
        } => {
            let request = load(&input, keep_nonmagnetic)?;
            for (domain, tensor) in request.domains.iter().zip(request.dipolar_tensors()) {
                println!("# site {:?}", domain.probe.as_slice());
                for row in local_fields::algebra::to_rows(&tensor) {
                    println!("{:>16.8e} {:>16.8e} {:>16.8e}", row[0], row[1], row[2]);
                }
            }
            Ok(())
        }
        Commands::Sphere { input } => {
            let request = load(&input, true)?;
            for radius in request.inscribed_radii() {
                println!("{}", radius);
            }
            Ok(())
        }
    }
}

fn load(path: &Path, keep_nonmagnetic: bool) -> Result<ValidatedRequest> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let request: FieldRequest =
        serde_json::from_str(&text).with_context(|| format!("Failed to parse job file {}", path.display()))?;
    let mut validated = request
        .validate()
        .with_context(|| format!("Invalid job file {}", path.display()))?;
    if !keep_nonmagnetic {
        let removed = validated.retain_magnetic();
        if removed > 0 {
            info!("Ignoring {} non-magnetic atoms", removed);
        }
    }
    Ok(validated)
}

fn run_fields(input: &Path, output: Option<&Path>, keep_nonmagnetic: bool) -> Result<()> {
    let request = load(input, keep_nonmagnetic)?;

    for (domain, inscribed) in request.domains.iter().zip(request.inscribed_radii()) {
        info!(
            "{} sum at site {:?} over {:?} supercell, radius {} Å (largest inscribed sphere {:.4} Å)",
            request.calculation,
            domain.probe.as_slice(),
            domain.supercell.repeats(),
            domain.radius,
            inscribed
        );
        if domain.radius > inscribed {
            warn!("Summation sphere extends beyond the supercell, consider a larger supercell");
        }
    }

    let reports = request.evaluate().context("Field evaluation failed")?;
    let sites = request
        .domains
        .iter()
        .zip(&reports)
        .map(|(domain, report)| SiteReport {
            site: [domain.probe.x, domain.probe.y, domain.probe.z],
            fields: &report.value,
            total: request
                .local_fields(&report.value)
                .total()
                .iter()
                .map(|v| [v.x, v.y, v.z])
                .collect(),
            flat: flatten(report.value.components()),
            diagnostics: &report.diagnostics,
        })
        .collect();
    let document = FieldsReport {
        calculation: request.calculation.name(),
        sites,
    };
    let json = serde_json::to_string_pretty(&document).context("Failed to serialise result")?;

    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{}", json),
    }
    let diagnostics: usize = reports.iter().map(|report| report.diagnostics.len()).sum();
    if diagnostics > 0 {
        warn!("Evaluation finished with {} diagnostic(s)", diagnostics);
    }
    Ok(())
}
