//! `armory check`: audit a database file against the record schema.
//!
//! Runs the same schema validation the write path uses over every record
//! already in the document, plus per-scope duplicate detection, so a
//! hand-edited database can be vetted before serving it.

use anyhow::bail;
use serde::Serialize;
use serde_json::Map;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::catalog::record::{Candidate, Record};
use crate::catalog::store::{Catalog, CatalogBackend, JsonFileBackend};
use crate::cli::{OutputFormat, DEFAULT_DATABASE};
use crate::guards::validate_candidate;

#[derive(clap::Args)]
pub struct CheckArgs {
    /// Path of the database file to audit
    #[arg(short, long, default_value = DEFAULT_DATABASE)]
    pub database: PathBuf,
}

/// A record that violates the schema or collides with another record in
/// its scope.
#[derive(Debug, Serialize)]
pub struct Violation {
    /// `type/category` the record lives in
    pub scope: String,
    pub name: String,
    pub problem: String,
}

/// Audit the database and report violations.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or any violation is
/// found (nonzero exit for scripting).
pub fn run(args: &CheckArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let catalog = JsonFileBackend::new(&args.database).load()?;
    let violations = audit(&catalog);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&violations)?);
        }
        OutputFormat::Text => {
            if verbose {
                for (kind, group) in &catalog.0 {
                    for (category, records) in group {
                        println!("{kind}/{category}: {} record(s)", records.len());
                    }
                }
            }
            for violation in &violations {
                println!(
                    "{}: {:?}: {}",
                    violation.scope, violation.name, violation.problem
                );
            }
            if violations.is_empty() {
                println!("OK: no violations found");
            }
        }
    }

    if !violations.is_empty() {
        bail!("{} violation(s) found", violations.len());
    }
    Ok(())
}

/// Collect every schema violation and duplicate normalized name, scope by
/// scope. Unrecognized sections of the document are audited too; they are
/// unreachable over HTTP but still part of the persisted state.
#[must_use]
pub fn audit(catalog: &Catalog) -> Vec<Violation> {
    let mut violations = Vec::new();

    for (kind, group) in &catalog.0 {
        for (category, records) in group {
            let scope = format!("{kind}/{category}");

            for record in records {
                if let Some(problem) = schema_problem(record) {
                    violations.push(Violation {
                        scope: scope.clone(),
                        name: record.name.clone(),
                        problem,
                    });
                }
            }

            let mut seen: BTreeMap<String, usize> = BTreeMap::new();
            for record in records {
                *seen.entry(record.normalized_name()).or_default() += 1;
            }
            for (key, count) in seen {
                if count > 1 {
                    violations.push(Violation {
                        scope: scope.clone(),
                        name: key,
                        problem: format!("{count} records share this normalized name"),
                    });
                }
            }
        }
    }

    violations
}

/// Re-run write-path schema validation over a stored record; `None` means
/// the record is clean.
fn schema_problem(record: &Record) -> Option<String> {
    let candidate = Candidate {
        name: Some(record.name.clone()),
        description: Some(record.description.clone()),
        extra: Map::new(),
    };

    // Empty scope: conflict detection cannot fire, only schema rules can
    validate_candidate(&[], "", candidate)
        .err()
        .and_then(|rejection| rejection.message().map(str::to_string))
}
