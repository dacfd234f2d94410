//! Request validation guards.
//!
//! Every route runs an ordered chain of guards before its handler touches
//! the store; the first guard to fail short-circuits the request with a
//! client error. Order matters: the existence and uniqueness guards assume
//! the URL-shape guard already vetted `type` and `category`, so they index
//! the catalog without re-checking.
//!
//! Guards are plain functions returning `Result`, chained with `?` inside
//! the handlers; there is no framework middleware involved.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::catalog::record::{Candidate, Record};
use crate::catalog::taxonomy;
use crate::utils::text::normalize_name;

/// Minimum `name` length accepted by schema validation.
pub const MIN_NAME_LEN: usize = 3;
/// Minimum `description` length accepted by schema validation.
pub const MIN_DESCRIPTION_LEN: usize = 10;

/// A terminated guard chain: the status and JSON body to answer with.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

impl Rejection {
    #[must_use]
    pub fn invalid_url() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: json!({ "message": "Invalid URL" }),
        }
    }

    #[must_use]
    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: json!({ "message": "Data Not Found" }),
        }
    }

    #[must_use]
    pub fn conflict() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: json!({ "message": "Data with the same name already exists" }),
        }
    }

    #[must_use]
    pub fn validation(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: json!({ "status": "Validation Failed", "message": message }),
        }
    }

    /// Message carried by the rejection body, for tests and logs.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(serde_json::Value::as_str)
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// URL-shape guard: `type` must be recognized and, when the route carries
/// a category segment, `category` must belong to that type.
pub fn validate_url_params(kind: &str, category: Option<&str>) -> Result<(), Rejection> {
    let shape_ok = match category {
        Some(category) => taxonomy::is_recognized_category(kind, category),
        None => taxonomy::is_recognized_type(kind),
    };

    if shape_ok {
        Ok(())
    } else {
        Err(Rejection::invalid_url())
    }
}

/// Existence guard: some record in the scope must match the path name
/// after normalization. Runs for read-one, update, and delete.
pub fn validate_data_exists(records: &[Record], name: &str) -> Result<(), Rejection> {
    let key = normalize_name(name);
    if records
        .iter()
        .any(|record| record.normalized_name() == key)
    {
        Ok(())
    } else {
        Err(Rejection::not_found())
    }
}

/// Uniqueness + schema guard for create and update.
///
/// A conflict is any record *other than the one addressed by the path*
/// (create passes an empty path name, so every record counts) whose
/// normalized name equals the candidate's. Conflict detection runs before
/// schema validation, and schema validation reports only the first
/// violated rule, in field order.
pub fn validate_candidate(
    records: &[Record],
    path_name: &str,
    candidate: Candidate,
) -> Result<Record, Rejection> {
    let candidate_key = candidate.normalized_name();
    let path_key = normalize_name(path_name);

    let conflicting = records.iter().any(|record| {
        let key = record.normalized_name();
        key == candidate_key && key != path_key
    });
    if conflicting {
        return Err(Rejection::conflict());
    }

    let Some(name) = candidate.name else {
        return Err(Rejection::validation("Name is required"));
    };
    if name.chars().count() < MIN_NAME_LEN {
        return Err(Rejection::validation(
            "Name length must be at least 3 characters long",
        ));
    }

    let Some(description) = candidate.description else {
        return Err(Rejection::validation("Description is required"));
    };
    if description.chars().count() < MIN_DESCRIPTION_LEN {
        return Err(Rejection::validation(
            "Description length must be at least 10 characters long",
        ));
    }

    Ok(Record {
        name,
        description,
        extra: candidate.extra,
    })
}
