//! Command-line interface for armory.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **serve**: Run the REST service over a database file
//! - **init**: Write a starter database with every recognized scope
//! - **check**: Audit a database file for schema and uniqueness violations
//!
//! ## Usage
//!
//! ```text
//! # Create a fresh database and serve it
//! armory init
//! armory serve --port 3000
//!
//! # Serve an existing document on another port
//! armory serve --database /srv/armory/db.json --port 8080
//!
//! # Audit a hand-edited database, JSON output for scripting
//! armory check --database db.json --format json
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod check;
pub mod init;

/// Default path of the persisted catalog document.
pub const DEFAULT_DATABASE: &str = "database/db.json";

#[derive(Parser)]
#[command(name = "armory")]
#[command(version)]
#[command(about = "REST service over a hierarchical catalog of heroes and items")]
#[command(
    long_about = "armory serves CRUD operations over a single JSON document partitioned by type (heroes, items) and category.\n\nRecords are matched by case/space-insensitive name; the document is loaded into memory at startup and rewritten on every mutation."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the REST service
    Serve(ServeArgs),

    /// Write a starter database file
    Init(init::InitArgs),

    /// Audit a database file against the record schema
    Check(check::CheckArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Path of the catalog database file
    #[arg(short, long, default_value = DEFAULT_DATABASE)]
    pub database: PathBuf,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
