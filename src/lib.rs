//! # armory
//!
//! A small REST service exposing CRUD operations over a single
//! hierarchical JSON document of heroes and items.
//!
//! The document is partitioned by `type` (heroes, items) and `category`
//! (intelligence, strength, physical, ...). Records are matched by a
//! case/space-insensitive `name`: "Axe Knight", "axeknight", and
//! "AXE KNIGHT" all address the same record. The whole document is loaded
//! into memory at startup and rewritten to disk after every mutation.
//!
//! Every request runs an ordered chain of guards before its handler:
//! URL-shape validation against the fixed taxonomy, existence validation
//! for routes that address a record, and uniqueness + schema validation
//! for routes that write one. The first failing guard short-circuits the
//! request with a client error.
//!
//! ## Example
//!
//! ```rust,no_run
//! use armory::catalog::store::{CatalogStore, JsonFileBackend};
//! use armory::web::server::create_router;
//!
//! let backend = JsonFileBackend::new("database/db.json");
//! let store = CatalogStore::open(Box::new(backend)).unwrap();
//! let app = create_router(store);
//! // hand `app` to axum::serve
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: the in-memory document, its persistence backend, and the
//!   fixed type/category taxonomy
//! - [`guards`]: the request-validation chain
//! - [`web`]: axum router and request handlers
//! - [`cli`]: command-line interface (serve, init, check)
//! - [`utils`]: name normalization

pub mod catalog;
pub mod cli;
pub mod guards;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use catalog::record::{Candidate, Record};
pub use catalog::store::{Catalog, CatalogBackend, CatalogStore, JsonFileBackend};
pub use guards::Rejection;
pub use utils::text::normalize_name;
