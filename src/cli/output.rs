//! Handles user-facing output for the CLI.
//!
//! Centralizing notice formatting here keeps the command handlers free of
//! presentation concerns and the output consistent across subcommands.

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Prints a notice for one emitted source: colored name, then the target
/// path.
pub fn emitted(name: &str, path: &std::path::Path) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true));
    print!("emit");
    let _ = stdout.reset();
    println!(" {} -> {}", name, path.display());
}

/// Prints a notice for a unit that produced nothing to contribute.
pub fn skipped(unit: &str) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)));
    print!("skip");
    let _ = stdout.reset();
    println!(" {} (no partial types)", unit);
}

/// Prints the run summary line.
pub fn summary(emitted: usize, skipped: usize, failed: usize) {
    println!(
        "{} generated, {} skipped, {} failed",
        emitted, skipped, failed
    );
}
