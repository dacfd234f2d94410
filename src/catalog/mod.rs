//! Catalog storage for the hierarchical heroes/items document.
//!
//! The catalog is a two-level tree: `type -> category -> list of records`.
//! The whole document is read from a persistence backend once at startup,
//! lives in memory for the process lifetime, and is rewritten wholesale
//! through the backend after every successful mutation.
//!
//! ## Example
//!
//! ```rust,no_run
//! use armory::catalog::store::{CatalogStore, JsonFileBackend};
//! use std::path::Path;
//!
//! let backend = JsonFileBackend::new(Path::new("database/db.json"));
//! let store = CatalogStore::open(Box::new(backend)).unwrap();
//!
//! for record in store.records("heroes", "strength").unwrap() {
//!     println!("{}", record.name);
//! }
//! ```

pub mod record;
pub mod store;
pub mod taxonomy;
