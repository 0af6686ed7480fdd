//! sqlweave CLI
//!
//! Command-line tool for generating schema DDL from model declarations and
//! pretty-printing SQL.

mod models;

use std::io::Read;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use sqlweave_core::format::{self, FormatOptions};
use sqlweave_core::schema::{EmitOptions, SchemaRegistry, SchemaTarget};
use sqlweave_core::Dialect;

/// SQL schema generator and formatter.
#[derive(Parser)]
#[command(name = "sqlweave")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct FormatArgs {
    /// SQL dialect used by the pretty-printer.
    #[arg(long, env = "SQLWEAVE_DIALECT")]
    dialect: Option<Dialect>,

    /// Spaces per indentation level.
    #[arg(long, env = "SQLWEAVE_INDENT", default_value_t = 2)]
    indent: usize,
}

impl FormatArgs {
    fn options(&self) -> FormatOptions {
        FormatOptions {
            dialect: self.dialect,
            indent: self.indent,
            ..FormatOptions::default()
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate CREATE TABLE / CREATE INDEX statements from a model file.
    Schema {
        /// Model declarations (JSON or TOML).
        #[arg(short, long)]
        models: PathBuf,

        /// Write every table into this file.
        #[arg(short, long, conflicts_with = "dir", required_unless_present = "dir")]
        out: Option<PathBuf>,

        /// Write one `<table>.schema.sql` file per table into this directory.
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Precede each table with a `-- table` comment.
        #[arg(long)]
        comments: bool,

        #[command(flatten)]
        style: FormatArgs,
    },

    /// Pretty-print SQL from a file or stdin.
    Format {
        /// SQL file to read (stdin if not specified).
        file: Option<PathBuf>,

        #[command(flatten)]
        style: FormatArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Schema {
            models: model_path,
            out,
            dir,
            comments,
            style,
        } => {
            let definitions = models::load(&model_path)?;
            debug!(path = %model_path.display(), definitions = definitions.len(), "Loaded models");

            let mut registry = SchemaRegistry::new();
            for definition in definitions {
                registry.register(definition)?;
            }

            let target = match (out, dir) {
                (_, Some(dir)) => SchemaTarget::Directory(dir),
                (Some(out), None) => SchemaTarget::File(out),
                (None, None) => anyhow::bail!("either --out or --dir is required"),
            };
            let options = EmitOptions {
                comments,
                format: style.options(),
            };

            let written = registry.emit(&target, &options)?;
            for path in &written {
                info!("Wrote schema: {}", path.display());
            }
            if written.is_empty() {
                info!("No tables declared in {}", model_path.display());
            }
        }

        Commands::Format { file, style } => {
            let sql = match &file {
                Some(path) => std::fs::read_to_string(path).map_err(|e| {
                    anyhow::anyhow!("failed to read SQL file {}: {e}", path.display())
                })?,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };
            let formatted = format::format(&sql, &style.options())?;
            println!("{formatted}");
        }
    }

    Ok(())
}
