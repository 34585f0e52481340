//! Subcommand implementations.

pub mod config;
pub mod relations;

/// Write a JSON document to stdout.
#[allow(clippy::print_stdout)]
fn print_json(json: &str) {
    println!("{json}");
}
