//! Defines the command-line arguments and subcommands for the graft CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "graft",
    version,
    about = "Annotate, prune, and extend partial type declarations in source trees."
)]
pub struct GraftArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Full pipeline: annotate, prune, synthesize, and write generated sources.
    Run {
        /// Unit files (JSON) or directories to scan for them.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Directory generated sources are written to.
        #[arg(long, default_value = "generated")]
        out_dir: PathBuf,
    },
    /// Print the annotated (stage-1) tree for a unit as JSON.
    Annotate {
        /// The unit file to annotate.
        #[arg(required = true)]
        file: PathBuf,
    },
    /// Print the pruned (stage-2) tree for a unit as JSON.
    Prune {
        /// The unit file to prune.
        #[arg(required = true)]
        file: PathBuf,
    },
    /// Pretty-print a unit file as normalized source text, unchanged.
    Render {
        /// The unit file to render.
        #[arg(required = true)]
        file: PathBuf,
    },
}
