//! rfcmap CLI - build an RFC cross-reference knowledge base.
//!
//! Three subcommands mirror the pipeline's cacheable boundaries:
//!
//! 1. `extract` - corpus archive → references map (JSON artifact)
//! 2. `index`   - rfc-index.xml → projected entries (JSON artifact)
//! 3. `build`   - references + index → SQLite knowledge base
//!
//! `build` can run the whole pipeline from the raw inputs in one go, or
//! resume from the JSON artifacts of the first two steps. Inputs are local
//! snapshot files; fetching them is the operator's job:
//!
//!   https://www.rfc-editor.org/in-notes/tar/RFC-all.zip
//!   https://www.rfc-editor.org/rfc-index.xml

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rfcmap::pipeline::{self, BuildOptions, ReferenceSource};

/// Build an RFC cross-reference knowledge base from local corpus snapshots.
#[derive(Parser, Debug)]
#[command(name = "rfcmap")]
#[command(version)]
#[command(about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract per-document reference URLs from the corpus archive
    ///
    /// Reads every rfcNNNN.txt member of the archive, re-assembles wrapped
    /// paragraphs, and writes the references map as JSON:
    ///   { "RFC100": ["http://www.rfc-editor.org/info/rfc50", ...], ... }
    Extract {
        /// Local RFC-all.zip snapshot
        #[arg(long)]
        archive: PathBuf,

        /// Output path for the references map JSON
        #[arg(long)]
        output: PathBuf,
    },

    /// Project rfc-index.xml into flat entry records
    ///
    /// Writes the projected entries as a JSON array, one object per
    /// rfc-entry element.
    Index {
        /// Local rfc-index.xml snapshot
        #[arg(long)]
        xml: PathBuf,

        /// Output path for the projected entries JSON
        #[arg(long)]
        output: PathBuf,
    },

    /// Build the SQLite knowledge base
    ///
    /// Joins the cross-reference graph onto the index records and
    /// bulk-inserts one row per document into the rfc_entries table.
    Build {
        /// Local RFC-all.zip snapshot to extract references from
        #[arg(long, conflicts_with = "references")]
        archive: Option<PathBuf>,

        /// Previously extracted references map JSON (skips the archive)
        #[arg(long)]
        references: Option<PathBuf>,

        /// Index input: rfc-index.xml, or the JSON artifact of `index`
        #[arg(long)]
        index: PathBuf,

        /// Output database path
        #[arg(long)]
        db: PathBuf,

        /// Also write the extracted references map to this path
        #[arg(long)]
        dump_references: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    // Process-scoped observability context, installed once at the entry
    // point. Default to info-level progress; RUST_LOG overrides.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Extract { archive, output } => {
            let map = pipeline::extract_references(&archive)?;
            pipeline::write_references(&map, &output)?;
        }
        Command::Index { xml, output } => {
            let entries = pipeline::load_index(&xml)?;
            let json = serde_json::to_string_pretty(&entries)?;
            std::fs::write(&output, json)?;
        }
        Command::Build {
            archive,
            references,
            index,
            db,
            dump_references,
        } => {
            let source = match (archive, references) {
                (Some(path), None) => ReferenceSource::Archive(path),
                (None, Some(path)) => ReferenceSource::Artifact(path),
                (None, None) => ReferenceSource::None,
                // clap's conflicts_with already rejects both together
                (Some(_), Some(_)) => unreachable!(),
            };

            let stats = pipeline::build(&BuildOptions {
                references: source,
                index,
                db,
                dump_references,
            })?;

            println!(
                "built: {} records, {} reference edges across {} documents",
                stats.records, stats.edges, stats.documents
            );
        }
    }
    Ok(())
}
