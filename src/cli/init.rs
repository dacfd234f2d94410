//! `armory init`: write a starter database file.

use anyhow::{bail, Context};
use std::path::PathBuf;

use crate::catalog::record::Record;
use crate::catalog::store::Catalog;
use crate::cli::DEFAULT_DATABASE;

#[derive(clap::Args)]
pub struct InitArgs {
    /// Path of the database file to create
    #[arg(short, long, default_value = DEFAULT_DATABASE)]
    pub database: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Write a database containing every recognized scope plus a few seed
/// records, so `serve` has something to answer with out of the box.
///
/// # Errors
///
/// Returns an error if the target exists without `--force` or cannot be
/// written.
pub fn run(args: &InitArgs) -> anyhow::Result<()> {
    if args.database.exists() && !args.force {
        bail!(
            "{} already exists; pass --force to overwrite",
            args.database.display()
        );
    }

    if let Some(parent) = args.database.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }

    let json = serde_json::to_string_pretty(&seed_catalog())?;
    std::fs::write(&args.database, json)
        .with_context(|| format!("writing {}", args.database.display()))?;

    println!("Wrote starter database to {}", args.database.display());
    Ok(())
}

/// All recognized scopes, a few of them pre-populated.
#[must_use]
pub fn seed_catalog() -> Catalog {
    let mut catalog = Catalog::default();
    catalog.ensure_scopes();

    let seeds: &[(&str, &str, Record)] = &[
        (
            "heroes",
            "strength",
            Record::new("Axe Knight", "A sturdy melee fighter"),
        ),
        (
            "heroes",
            "intelligence",
            Record::new("Storm Sage", "Calls lightning down on clustered foes"),
        ),
        (
            "items",
            "physical",
            Record::new("Blink Dagger", "Short-range teleport on activation"),
        ),
    ];

    for (kind, category, record) in seeds {
        if let Some(list) = catalog
            .0
            .get_mut(*kind)
            .and_then(|group| group.get_mut(*category))
        {
            list.push(record.clone());
        }
    }

    catalog
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::taxonomy;

    #[test]
    fn test_seed_covers_every_scope() {
        let catalog = seed_catalog();
        for (kind, category) in taxonomy::scopes() {
            assert!(catalog.records(kind, category).is_some());
        }
    }

    #[test]
    fn test_seed_records_satisfy_schema() {
        let catalog = seed_catalog();
        for (kind, category) in taxonomy::scopes() {
            for record in catalog.records(kind, category).unwrap() {
                assert!(record.name.chars().count() >= 3, "{kind}/{category}");
                assert!(record.description.chars().count() >= 10, "{kind}/{category}");
            }
        }
    }
}
