//! The graft command-line interface.
//!
//! This is the driver collaborator around the core pipeline: it discovers
//! unit files, binds a semantic model per unit, runs the stages, and writes
//! the generated sources. Units are processed independently — a failed unit
//! is reported and skipped, and the run continues. Only configuration
//! errors abort the whole run.

use std::path::{Path, PathBuf};
use std::{fs, process};

use clap::Parser;
use walkdir::WalkDir;

use crate::ast::SourceUnit;
use crate::cli::args::{Command, GraftArgs};
use crate::errors::{print_error, GraftError};
use crate::pipeline::run_unit;
use crate::render::render_unit;
use crate::semantics::SourceModel;
use crate::passes::{annotate, prune};

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = GraftArgs::parse();

    let result = match args.command {
        Command::Run { paths, out_dir } => handle_run(&paths, &out_dir),
        Command::Annotate { file } => handle_annotate(&file),
        Command::Prune { file } => handle_prune(&file),
        Command::Render { file } => handle_render(&file),
    };

    if let Err(error) = result {
        print_error(error);
        process::exit(1);
    }
}

/// Handles the `run` subcommand: the per-unit driver loop.
fn handle_run(paths: &[PathBuf], out_dir: &Path) -> Result<(), GraftError> {
    let files = collect_unit_files(paths)?;
    let mut emitted = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;

    for file in files {
        match process_unit_file(&file, out_dir) {
            Ok(Some(_)) => emitted += 1,
            Ok(None) => skipped += 1,
            Err(error) if error.is_fatal_to_run() => return Err(error),
            Err(error) => {
                failed += 1;
                print_error(error);
            }
        }
    }

    output::summary(emitted, skipped, failed);
    Ok(())
}

/// Processes one unit file end to end, returning the generated name if the
/// unit contributed output.
fn process_unit_file(file: &Path, out_dir: &Path) -> Result<Option<String>, GraftError> {
    let unit = load_unit(file)?;
    let model = SourceModel::bind(&unit);
    let Some(generated) = run_unit(&unit, &model)? else {
        output::skipped(&unit.path);
        return Ok(None);
    };

    let target = out_dir.join(format!("{}.cs", generated.name));
    write_generated(&target, &generated.text)?;
    output::emitted(&generated.name, &target);
    Ok(Some(generated.name))
}

fn handle_annotate(file: &Path) -> Result<(), GraftError> {
    let unit = load_unit(file)?;
    let model = SourceModel::bind(&unit);
    let annotated = annotate(&unit, &model)?;
    print_tree(&annotated, file)
}

fn handle_prune(file: &Path) -> Result<(), GraftError> {
    let unit = load_unit(file)?;
    let model = SourceModel::bind(&unit);
    let pruned = prune(&annotate(&unit, &model)?);
    print_tree(&pruned, file)
}

fn handle_render(file: &Path) -> Result<(), GraftError> {
    let unit = load_unit(file)?;
    print!("{}", render_unit(&unit));
    Ok(())
}

// =====================
// Unit file I/O
// =====================

/// Reads and deserializes one JSON unit file.
fn load_unit(path: &Path) -> Result<SourceUnit, GraftError> {
    let display = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|e| GraftError::io(&display, &e))?;
    serde_json::from_str(&text).map_err(|e| GraftError::malformed_unit(&display, &e))
}

/// Expands the argument list into unit files: files are taken as-is,
/// directories are scanned recursively for `*.json`. The result is sorted
/// for deterministic processing order.
fn collect_unit_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, GraftError> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        for entry in WalkDir::new(path) {
            let entry = entry
                .map_err(|e| GraftError::io(&path.display().to_string(), &std::io::Error::from(e)))?;
            let p = entry.path();
            if p.is_file() && p.extension().is_some_and(|ext| ext == "json") {
                files.push(p.to_path_buf());
            }
        }
    }
    files.sort();
    Ok(files)
}

fn write_generated(target: &Path, text: &str) -> Result<(), GraftError> {
    let display = target.display().to_string();
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| GraftError::io(&display, &e))?;
    }
    fs::write(target, text).map_err(|e| GraftError::io(&display, &e))
}

fn print_tree(unit: &SourceUnit, file: &Path) -> Result<(), GraftError> {
    let json = serde_json::to_string_pretty(unit)
        .map_err(|e| GraftError::malformed_unit(&file.display().to_string(), &e))?;
    println!("{json}");
    Ok(())
}
