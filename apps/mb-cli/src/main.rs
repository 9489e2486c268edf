use clap::{Parser, Subcommand, ValueEnum};
use mb_core::Tolerances;
use mb_model::{AsmtDocument, DocumentSummary, LoadOptions, UnsupportedJointPolicy};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{}: {source}", path.display())]
    Model {
        path: PathBuf,
        source: mb_model::ModelError,
    },

    #[error("Report error: {0}")]
    Report(String),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "mb-cli")]
#[command(about = "Load, check and normalize ASMT multibody joint models", long_about = None)]
struct Cli {
    /// Drop joint blocks with unknown tags instead of failing
    #[arg(long, global = true)]
    skip_unsupported: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and assemble a model, then report its constraint residuals
    Check {
        /// Path to the ASMT file
        path: PathBuf,
    },
    /// List the joints of a model
    Joints {
        /// Path to the ASMT file
        path: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Re-serialize a model in canonical form
    Normalize {
        /// Path to the ASMT file
        path: PathBuf,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
    Yaml,
}

fn main() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let options = LoadOptions {
        unsupported: if cli.skip_unsupported {
            UnsupportedJointPolicy::Skip
        } else {
            UnsupportedJointPolicy::Abort
        },
    };

    let result = match cli.command {
        Commands::Check { path } => cmd_check(&path, options),
        Commands::Joints { path, format } => cmd_joints(&path, options, format),
        Commands::Normalize { path, output } => cmd_normalize(&path, options, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn load(path: &Path, options: LoadOptions) -> CliResult<AsmtDocument> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    AsmtDocument::parse(&text, options).map_err(|source| CliError::Model {
        path: path.to_path_buf(),
        source,
    })
}

fn cmd_check(path: &Path, options: LoadOptions) -> CliResult<()> {
    let mut doc = load(path, options)?;
    let system = doc.assemble().map_err(|source| CliError::Model {
        path: path.to_path_buf(),
        source,
    })?;
    let residuals = system.residuals().map_err(|e| CliError::Model {
        path: path.to_path_buf(),
        source: e.into(),
    })?;

    println!(
        "{}: {} markers, {} joints, {} equations",
        path.display(),
        system.markers().len(),
        system.len(),
        system.equation_count()
    );
    for skipped in &doc.skipped {
        println!("  skipped {} at line {}", skipped.tag, skipped.line);
    }
    println!("  residual norm: {:e}", residuals.norm());

    let tol = Tolerances::default();
    if tol.all_satisfied(residuals.iter()) {
        println!("✓ Assembly pose satisfies every constraint");
    } else {
        println!("✗ Assembly pose violates at least one constraint");
    }
    Ok(())
}

fn cmd_joints(path: &Path, options: LoadOptions, format: Format) -> CliResult<()> {
    let doc = load(path, options)?;
    let summary = DocumentSummary::from(&doc);

    match format {
        Format::Text => {
            if summary.joints.is_empty() {
                println!("No joints found");
            }
            for joint in &summary.joints {
                println!(
                    "  {} - {} ({} -> {}, {} equations)",
                    joint.name, joint.kind, joint.marker_i, joint.marker_j, joint.equations
                );
                for (keyword, value) in &joint.params {
                    println!("      {keyword} = {value}");
                }
            }
        }
        Format::Json => {
            let out = serde_json::to_string_pretty(&summary)
                .map_err(|e| CliError::Report(e.to_string()))?;
            println!("{out}");
        }
        Format::Yaml => {
            let out =
                serde_yaml::to_string(&summary).map_err(|e| CliError::Report(e.to_string()))?;
            print!("{out}");
        }
    }
    Ok(())
}

fn cmd_normalize(path: &Path, options: LoadOptions, output: Option<&Path>) -> CliResult<()> {
    let doc = load(path, options)?;
    let text = doc.store();
    match output {
        Some(out) => {
            std::fs::write(out, &text).map_err(|source| CliError::Write {
                path: out.to_path_buf(),
                source,
            })?;
            tracing::info!(path = %out.display(), "normalized model written");
        }
        None => print!("{text}"),
    }
    Ok(())
}
