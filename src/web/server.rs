use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Path, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::catalog::record::{Candidate, Record};
use crate::catalog::store::{CatalogStore, JsonFileBackend};
use crate::cli::ServeArgs;
use crate::guards::{validate_candidate, validate_data_exists, validate_url_params, Rejection};
use crate::utils::text::normalize_name;

/// Request bodies are single JSON records; anything bigger is abuse.
pub const MAX_BODY_SIZE: usize = 1024 * 1024; // 1MB

/// Shared application state.
///
/// The store sits behind one lock; mutating handlers hold the write guard
/// across validate, mutate, and flush, so the uniqueness check and the
/// write are atomic with respect to other requests.
pub struct AppState {
    pub store: RwLock<CatalogStore>,
}

type SharedState = Arc<AppState>;

/// Log the internal detail server-side and answer with the generic fault
/// body; internals are never exposed to clients.
fn server_fault(detail: impl std::fmt::Display) -> Rejection {
    tracing::error!("internal error: {detail}");
    Rejection {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: json!({ "message": "Internal Server Error" }),
    }
}

fn invalid_body() -> Rejection {
    Rejection {
        status: StatusCode::BAD_REQUEST,
        body: json!({ "message": "Invalid request body" }),
    }
}

/// Run the web server.
///
/// # Errors
///
/// Returns an error if the database cannot be loaded, the tokio runtime
/// cannot be created, or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args).await })
}

/// Create the application router with all routes and middleware configured.
pub fn create_router(store: CatalogStore) -> Router {
    let state = Arc::new(AppState {
        store: RwLock::new(store),
    });

    Router::new()
        .route("/all/{type}", get(list_by_type))
        .route("/all/{type}/{category}", get(list_by_category))
        .route(
            "/all/{type}/{category}/{name}",
            get(get_by_name).put(update_record).delete(delete_record),
        )
        .route("/new/{type}/{category}", post(create_record))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                // Request timeout to prevent slow client attacks
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(30),
                ))
                .layer(ConcurrencyLimitLayer::new(100))
                .layer(DefaultBodyLimit::max(MAX_BODY_SIZE)),
        )
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let backend = JsonFileBackend::new(&args.database);
    let store = CatalogStore::open(Box::new(backend))?;
    let app = create_router(store);

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting armory at http://{addr}");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// `GET /all/{type}`: the full category mapping for a type.
async fn list_by_type(
    State(state): State<SharedState>,
    Path(kind): Path<String>,
) -> Result<Response, Rejection> {
    validate_url_params(&kind, None)?;

    let store = state.store.read().await;
    let group = store
        .group(&kind)
        .ok_or_else(|| server_fault(format!("type {kind} missing from catalog")))?;

    Ok((StatusCode::OK, Json(json!({ "data": group, "status": "Success" }))).into_response())
}

/// `GET /all/{type}/{category}`: the record list for one scope.
async fn list_by_category(
    State(state): State<SharedState>,
    Path((kind, category)): Path<(String, String)>,
) -> Result<Response, Rejection> {
    validate_url_params(&kind, Some(&category))?;

    let store = state.store.read().await;
    let records = scope_records(&store, &kind, &category)?;

    Ok((
        StatusCode::OK,
        Json(json!({ "data": records, "status": "Success" })),
    )
        .into_response())
}

/// `GET /all/{type}/{category}/{name}`: one record by normalized name.
async fn get_by_name(
    State(state): State<SharedState>,
    Path((kind, category, name)): Path<(String, String, String)>,
) -> Result<Response, Rejection> {
    validate_url_params(&kind, Some(&category))?;

    let store = state.store.read().await;
    validate_data_exists(scope_records(&store, &kind, &category)?, &name)?;

    // The existence guard just passed, so the lookup cannot miss
    let record = store
        .find(&kind, &category, &name)
        .ok_or_else(|| server_fault("record vanished between guard and lookup"))?;

    Ok((
        StatusCode::OK,
        Json(json!({ "data": record, "message": "Success" })),
    )
        .into_response())
}

/// `POST /new/{type}/{category}`: append a record to a scope.
async fn create_record(
    State(state): State<SharedState>,
    Path((kind, category)): Path<(String, String)>,
    body: Result<Json<Candidate>, JsonRejection>,
) -> Result<Response, Rejection> {
    validate_url_params(&kind, Some(&category))?;
    let Json(candidate) = body.map_err(|_| invalid_body())?;

    let mut store = state.store.write().await;
    let mut records = scope_records(&store, &kind, &category)?.to_vec();

    // Create addresses no existing record, so the empty path name makes
    // every record in scope a potential conflict
    let record = validate_candidate(&records, "", candidate)?;
    tracing::debug!("creating {}/{}/{}", kind, category, record.name);

    records.push(record);
    store
        .replace_records(&kind, &category, records)
        .map_err(server_fault)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "data": scope_records(&store, &kind, &category)?, "status": "Success" })),
    )
        .into_response())
}

/// `PUT /all/{type}/{category}/{name}`: replace the addressed record with
/// the request body.
async fn update_record(
    State(state): State<SharedState>,
    Path((kind, category, name)): Path<(String, String, String)>,
    body: Result<Json<Candidate>, JsonRejection>,
) -> Result<Response, Rejection> {
    validate_url_params(&kind, Some(&category))?;
    let Json(candidate) = body.map_err(|_| invalid_body())?;

    let mut store = state.store.write().await;
    let records = scope_records(&store, &kind, &category)?.to_vec();

    validate_data_exists(&records, &name)?;
    let record = validate_candidate(&records, &name, candidate)?;
    tracing::debug!("updating {}/{}/{} -> {}", kind, category, name, record.name);

    let key = normalize_name(&name);
    let mut updated: Vec<Record> = records
        .into_iter()
        .filter(|existing| existing.normalized_name() != key)
        .collect();
    updated.push(record);

    store
        .replace_records(&kind, &category, updated)
        .map_err(server_fault)?;

    Ok((
        StatusCode::OK,
        Json(json!({ "data": scope_records(&store, &kind, &category)?, "message": "Success" })),
    )
        .into_response())
}

/// `DELETE /all/{type}/{category}/{name}`: remove the addressed record.
async fn delete_record(
    State(state): State<SharedState>,
    Path((kind, category, name)): Path<(String, String, String)>,
) -> Result<Response, Rejection> {
    validate_url_params(&kind, Some(&category))?;

    let mut store = state.store.write().await;
    let records = scope_records(&store, &kind, &category)?.to_vec();

    validate_data_exists(&records, &name)?;
    tracing::debug!("deleting {}/{}/{}", kind, category, name);

    let key = normalize_name(&name);
    let remaining: Vec<Record> = records
        .into_iter()
        .filter(|existing| existing.normalized_name() != key)
        .collect();

    store
        .replace_records(&kind, &category, remaining)
        .map_err(server_fault)?;

    Ok((
        StatusCode::OK,
        Json(json!({ "data": scope_records(&store, &kind, &category)?, "message": "Success" })),
    )
        .into_response())
}

/// Records for a scope the URL-shape guard already accepted; a miss means
/// the catalog lost a recognized scope, which is a server fault.
fn scope_records<'a>(
    store: &'a CatalogStore,
    kind: &str,
    category: &str,
) -> Result<&'a [Record], Rejection> {
    store
        .records(kind, category)
        .ok_or_else(|| server_fault(format!("scope {kind}/{category} missing from catalog")))
}
