//! PV sizing entry point: CLI wiring, project loading, report and BOM output.

use std::io;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use pv_sizing::bom::export::{BomFormat, export_bom, write_bom};
use pv_sizing::bom::{BomLineItem, build_bom};
use pv_sizing::catalog::Catalog;
use pv_sizing::config::{ConfigError, ProjectConfig};
use pv_sizing::sizing::{CalculationInput, DesignReport};

#[derive(Parser)]
#[command(name = "pv-sizing")]
#[command(about = "Size PV balance-of-system components and generate a bill of materials")]
struct Cli {
    /// Load the project from a TOML file
    #[arg(long, value_name = "PATH", conflicts_with = "preset")]
    project: Option<PathBuf>,

    /// Use a built-in project preset (default, large_plant)
    #[arg(long, value_name = "NAME")]
    preset: Option<String>,

    /// Replace the built-in reference tables with a TOML catalog
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Write the bill of materials to this file
    #[arg(long, value_name = "PATH")]
    bom_out: Option<PathBuf>,

    /// Delimiter of the exported bill of materials
    #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
    bom_format: FormatArg,

    /// Print input, results and BOM as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Log every selection (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Tsv,
}

impl From<FormatArg> for BomFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => BomFormat::Csv,
            FormatArg::Tsv => BomFormat::Tsv,
        }
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    input: &'a CalculationInput,
    report: &'a DesignReport,
    bom: &'a [BomLineItem],
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn config_errors(errors: &[ConfigError]) -> anyhow::Error {
    let lines: Vec<String> = errors.iter().map(ToString::to_string).collect();
    anyhow!(lines.join("\n"))
}

fn load_project(cli: &Cli) -> Result<ProjectConfig> {
    // --project takes priority, then --preset, then the default plant
    let project = if let Some(ref path) = cli.project {
        ProjectConfig::from_toml_file(path)?
    } else if let Some(ref name) = cli.preset {
        ProjectConfig::from_preset(name)?
    } else {
        ProjectConfig::default_plant()
    };

    let errors = project.validate();
    if !errors.is_empty() {
        return Err(config_errors(&errors));
    }
    Ok(project)
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::from_toml_file(path).map_err(|errors| config_errors(&errors)),
        None => Ok(Catalog::standard()),
    }
}

fn run(cli: &Cli) -> Result<()> {
    let project = load_project(cli)?;
    let catalog = load_catalog(cli.catalog.as_deref())?;

    let input = project.to_input();
    let report = DesignReport::calculate(&input, &catalog);
    let bom = build_bom(&input, &report);

    if cli.json {
        let out = JsonOutput {
            input: &input,
            report: &report,
            bom: &bom,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{report}");
        println!("\n--- Bill of materials ---");
        write_bom(&bom, io::stdout().lock(), BomFormat::Tsv)?;
    }

    if let Some(ref path) = cli.bom_out {
        export_bom(&bom, path, cli.bom_format.into())
            .with_context(|| format!("exporting bill of materials to {}", path.display()))?;
        eprintln!("Bill of materials written to {}", path.display());
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
