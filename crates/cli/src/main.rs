//! RISC-V cache task file generator CLI.
//!
//! This binary is the operator entry point for the generator. It provides:
//! 1. **Generate:** Build the stock hit-rate fixture, write it atomically and print the expected outcome.
//! 2. **Report:** Print the expected outcome without writing anything.
//! 3. **Inspect:** Parse an existing task file and print registers, fragments and disassembly.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rvtask_core::analysis::analyze;
use rvtask_core::config::{Config, ImmediateMode};
use rvtask_core::fixture::TaskImage;
use rvtask_core::{Fixture, FixtureError};

#[derive(Parser, Debug)]
#[command(
    name = "rvtask",
    author,
    version,
    about = "RISC-V cache test-vector generator",
    long_about = "Build binary task files for the RISC-V cache simulator.\n\nThe stock fixture drives the unified cache to a 12/13 instruction hit rate and a 4/8 data hit rate.\n\nExamples:\n  rvtask generate\n  rvtask generate -o build/task.bin --immediates expand\n  rvtask report -c cache.json\n  rvtask inspect task.bin"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the stock fixture and write it to disk.
    Generate {
        /// Output path; an existing file is replaced.
        #[arg(short, long, default_value = "task.bin")]
        output: PathBuf,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Immediate policy: truncate, strict or expand.
        #[arg(long, value_name = "MODE")]
        immediates: Option<ImmediateMode>,

        /// Do not print the expected-outcome report.
        #[arg(short, long)]
        quiet: bool,
    },

    /// Print the expected outcome of the stock fixture without writing it.
    Report {
        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Immediate policy: truncate, strict or expand.
        #[arg(long, value_name = "MODE")]
        immediates: Option<ImmediateMode>,
    },

    /// Decode an existing task file.
    Inspect {
        /// Task file to read.
        file: PathBuf,

        /// JSON configuration file (cache geometry for set/tag annotations).
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            output,
            config,
            immediates,
            quiet,
        } => cmd_generate(&output, config.as_deref(), immediates, quiet),
        Commands::Report { config, immediates } => cmd_report(config.as_deref(), immediates),
        Commands::Inspect { file, config } => cmd_inspect(&file, config.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Installs the fmt subscriber on stderr; `RUST_LOG` takes precedence over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Loads the configuration file if given and applies the command-line policy override.
fn load_config(
    path: Option<&Path>,
    immediates: Option<ImmediateMode>,
) -> Result<Config, FixtureError> {
    let mut config = match path {
        Some(p) => {
            info!(path = %p.display(), "loading configuration");
            Config::load(p)?
        }
        None => Config::default(),
    };
    if let Some(mode) = immediates {
        config.fixture.immediates = mode;
    }
    config.cache.validate()?;
    Ok(config)
}

fn build_fixture(config: &Config) -> Result<Fixture, FixtureError> {
    info!(
        data_base = format_args!("{:#x}", config.scenario.data_base),
        stride = config.scenario.stride,
        accesses = config.scenario.accesses,
        immediates = %config.fixture.immediates,
        "building hit-rate fixture"
    );
    config.scenario.fixture(config)
}

/// Builds the stock fixture, writes it, and prints the expected outcome and simulator hint.
fn cmd_generate(
    output: &Path,
    config: Option<&Path>,
    immediates: Option<ImmediateMode>,
    quiet: bool,
) -> Result<(), FixtureError> {
    let config = load_config(config, immediates)?;
    let fixture = build_fixture(&config)?;
    let report = analyze(&fixture, &config.cache)?;

    fixture.save(output)?;

    println!(
        "[*] Wrote {} ({} bytes, {} instructions, {} data words)",
        output.display(),
        fixture.encoded_len(),
        fixture.code().instruction_count(),
        fixture.data().len()
    );
    if !quiet {
        print!("{report}");
    }
    println!();
    println!("Run: riscv_emu -i {}", output.display());
    Ok(())
}

fn cmd_report(
    config: Option<&Path>,
    immediates: Option<ImmediateMode>,
) -> Result<(), FixtureError> {
    let config = load_config(config, immediates)?;
    let fixture = build_fixture(&config)?;
    print!("{}", analyze(&fixture, &config.cache)?);
    Ok(())
}

/// Prints a parsed task file with the cache coordinates of every fragment.
fn cmd_inspect(file: &Path, config: Option<&Path>) -> Result<(), FixtureError> {
    let config = load_config(config, None)?;
    let image = TaskImage::read(file)?;

    println!("[*] {}", file.display());
    print!("{image}");

    let geometry = &config.cache;
    println!("----------------------------------------------------------");
    for frag in &image.fragments {
        let parts = geometry.decompose(frag.addr);
        let note = if geometry.in_address_space(frag.addr) {
            ""
        } else {
            "  (beyond address space)"
        };
        println!(
            "  {:#010x}  set {:<3} tag {:<4} offset {:<3}{note}",
            frag.addr, parts.set, parts.tag, parts.offset
        );
    }
    Ok(())
}
