//! Command-line front end: solves the arch and builds it in the in-memory kernel.
//!
//! ```text
//! catenary-arch                          # reference arch, text report
//! catenary-arch --config arch.toml       # custom dimensions or stations
//! catenary-arch --format json            # machine-readable report
//! catenary-arch --stations-only          # solver output only
//! ```
//!
//! Logs go to stderr; override the level with `RUST_LOG`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::error;

use catenary_arch::arch::{solve_apex, solve_stations, ArchSegment};
use catenary_arch::kernel::ExtentDirection;
use catenary_arch::{generate, ArchConfig, ModelKernel, Result, StationSample};

#[derive(Parser)]
#[command(name = "catenary-arch")]
#[command(about = "Generate the geometry of a tapered catenary arch", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults describe the reference arch
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Solve the stations without building any solids
    #[arg(long)]
    stations_only: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Serialize)]
struct SegmentReport {
    index: usize,
    name: String,
    label: String,
    lip_direction: ExtentDirection,
}

impl From<&ArchSegment> for SegmentReport {
    fn from(segment: &ArchSegment) -> Self {
        Self {
            index: segment.index,
            name: segment.name.clone(),
            label: segment.label_text.clone(),
            lip_direction: segment.lip_direction,
        }
    }
}

#[derive(Serialize)]
struct Report {
    name: String,
    apex: StationSample,
    stations: Vec<StationSample>,
    segments: Vec<SegmentReport>,
}

fn main() -> ExitCode {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let mut chain = err.to_string();
            let mut source = std::error::Error::source(&err);
            while let Some(cause) = source {
                chain.push_str(": ");
                chain.push_str(&cause.to_string());
                source = cause.source();
            }
            error!(error = %chain, "arch generation failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ArchConfig::load(path)?,
        None => ArchConfig::default(),
    };

    let report = if cli.stations_only {
        config.validate()?;
        let constants = config.physical_constants()?;
        Report {
            name: config.name.clone(),
            apex: solve_apex(&constants),
            stations: solve_stations(config.station_table(), &constants),
            segments: Vec::new(),
        }
    } else {
        let mut kernel = ModelKernel::new();
        let assembly = generate(&mut kernel, &config)?;
        Report {
            name: assembly.name.clone(),
            apex: assembly.apex.sample,
            segments: assembly.segments.iter().map(SegmentReport::from).collect(),
            stations: assembly.stations,
        }
    };

    match cli.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        Format::Text => print_text(&report),
    }
    Ok(())
}

fn print_text(report: &Report) {
    println!("{}", report.name);
    println!(
        "{:>4} {:>10} {:>10} {:>10} {:>8} {:>10} {:>8}",
        "#", "x", "drop", "elev", "angle", "area", "H"
    );
    for (index, s) in std::iter::once(&report.apex)
        .chain(&report.stations)
        .enumerate()
    {
        println!(
            "{index:>4} {:>10.4} {:>10.4} {:>10.4} {:>8.2} {:>10.3} {:>8.3}",
            s.x,
            s.drop,
            s.elevation,
            s.tangent_angle.to_degrees(),
            s.cross_section_size,
            s.leg_half_height
        );
    }
    if !report.segments.is_empty() {
        println!();
        for segment in &report.segments {
            println!(
                "{:<12} label {:>3}  lip {:?}",
                segment.name, segment.label, segment.lip_direction
            );
        }
    }
}
