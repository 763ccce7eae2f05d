//! Catforge - aggregate application manifests and scan reports into a
//! validated master catalog.

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use catforge_generator::{refresh_catalog, validate_catalog_tree, GeneratorConfig};

#[derive(Parser)]
#[command(name = "catforge")]
#[command(
    author,
    version,
    about = "Aggregate application manifests and scan reports into a master catalog"
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Catalog root directory
    #[arg(long, global = true, default_value = "catalog")]
    catalog_root: PathBuf,

    /// Master catalog output path (defaults to <catalog-root>/apps.json)
    #[arg(long, short, global = true)]
    output: Option<PathBuf>,

    /// Directory with replacement schema documents
    #[arg(long, global = true)]
    schema_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate every manifest against the schema and report all violations
    Validate,

    /// Recompute aggregates, rewrite manifests, and rebuild the master catalog
    Refresh,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Diagnostics go to stderr; command output and violations go to stdout.
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    let Some(command) = cli.command else {
        let mut cmd = Cli::command();
        let _ = cmd.print_help();
        println!();
        return ExitCode::SUCCESS;
    };

    let mut config = GeneratorConfig::new(&cli.catalog_root);
    if let Some(output) = cli.output {
        config.output_path = output;
    }
    config.schema_dir = cli.schema_dir;

    match run(command, &config) {
        Ok(code) => code,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, config: &GeneratorConfig) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Validate => {
            let report = validate_catalog_tree(config)?;
            if report.is_valid() {
                println!(
                    "{} manifests valid ({} directories skipped)",
                    report.checked, report.skipped
                );
                return Ok(ExitCode::SUCCESS);
            }

            println!(
                "validation failed for {} of {} manifests:",
                report.failures.len(),
                report.checked
            );
            for failure in &report.failures {
                println!("{}", failure.manifest_path.display());
                for violation in &failure.violations {
                    println!("  - {}", violation);
                }
            }
            Ok(ExitCode::FAILURE)
        }

        Commands::Refresh => {
            let summary = refresh_catalog(config)?;
            println!(
                "refreshed {} applications ({} manifests rewritten, {} directories skipped)",
                summary.processed, summary.manifests_rewritten, summary.skipped
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}
