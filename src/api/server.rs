//! HTTP surface for the job API.
//!
//! ```text
//! POST   /jobs        create        201 | 400 | 500
//! GET    /jobs        list          200 | 500
//! GET    /jobs/{id}   fetch         200 | 404 | 500
//! PUT    /jobs/{id}   partial edit  200 | 400 | 404 | 500
//! DELETE /jobs/{id}   remove        200 | 404 | 500
//! GET    /healthz     store check   200 | 500
//! GET    /livez       liveness      200
//! ```
//!
//! Error bodies carry the structured envelope from
//! [`Error::to_structured_json`].

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

use crate::api::service::JobService;
use crate::error::{Error, ErrorCode, Result};
use crate::model::{JobApplication, JobPayload};
use crate::storage::JobStore;

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let code = self.error_code();
        let status =
            StatusCode::from_u16(code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(code = code.as_str(), "Request failed: {self}");
        } else {
            tracing::debug!(code = code.as_str(), "Request rejected: {self}");
        }

        (status, Json(self.to_structured_json())).into_response()
    }
}

/// Shared state handed to every handler.
type ServiceState<S> = State<Arc<JobService<S>>>;

/// Decode a JSON body, turning malformed input into a validation error.
fn decode_body(body: std::result::Result<Json<JobPayload>, JsonRejection>) -> Result<JobPayload> {
    body.map(|Json(payload)| payload)
        .map_err(|rejection| Error::validation(ErrorCode::InvalidBody, "body", rejection.body_text()))
}

/// Run a service call on the blocking pool.
///
/// Store calls are synchronous SQLite work behind a mutex, so they stay off
/// the async worker threads.
async fn run_blocking<S, T, F>(service: Arc<JobService<S>>, op: F) -> Result<T>
where
    S: JobStore + 'static,
    T: Send + 'static,
    F: FnOnce(&JobService<S>) -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || op(&service))
        .await
        .map_err(|e| Error::StoreFault(format!("store task failed: {e}")))?
}

async fn create<S: JobStore + 'static>(
    State(service): ServiceState<S>,
    body: std::result::Result<Json<JobPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<JobApplication>)> {
    let payload = decode_body(body)?;
    let job = run_blocking(service, move |svc| svc.create(&payload)).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

async fn list<S: JobStore + 'static>(
    State(service): ServiceState<S>,
) -> Result<Json<Vec<JobApplication>>> {
    run_blocking(service, |svc| svc.list_all()).await.map(Json)
}

async fn show<S: JobStore + 'static>(
    State(service): ServiceState<S>,
    Path(id): Path<String>,
) -> Result<Json<JobApplication>> {
    run_blocking(service, move |svc| svc.get_by_id(&id))
        .await
        .map(Json)
}

async fn update<S: JobStore + 'static>(
    State(service): ServiceState<S>,
    Path(id): Path<String>,
    body: std::result::Result<Json<JobPayload>, JsonRejection>,
) -> Result<Json<JobApplication>> {
    let payload = decode_body(body)?;
    run_blocking(service, move |svc| svc.update_by_id(&id, &payload))
        .await
        .map(Json)
}

async fn remove<S: JobStore + 'static>(
    State(service): ServiceState<S>,
    Path(id): Path<String>,
) -> Result<Json<JobApplication>> {
    run_blocking(service, move |svc| svc.delete_by_id(&id))
        .await
        .map(Json)
}

async fn healthz<S: JobStore + 'static>(State(service): ServiceState<S>) -> Result<&'static str> {
    run_blocking(service, |svc| svc.health()).await?;
    tracing::debug!("service is healthy");
    Ok("ok")
}

async fn livez() -> &'static str {
    "ok"
}

/// Build the router for a service.
pub fn build_router<S: JobStore + 'static>(service: Arc<JobService<S>>) -> Router {
    Router::new()
        .route("/jobs", get(list::<S>).post(create::<S>))
        .route(
            "/jobs/{id}",
            get(show::<S>).put(update::<S>).delete(remove::<S>),
        )
        .route("/healthz", get(healthz::<S>))
        .route("/livez", get(livez))
        .with_state(service)
}

/// Serve the API until ctrl-c.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound.
pub async fn listen<S: JobStore + 'static>(addr: SocketAddr, service: Arc<JobService<S>>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    tokio::select! {
        r = axum::serve(listener, build_router(service)) => {
            tracing::warn!("server ended unexpectedly: {:?}", &r);
        },
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("received ctrl+c interrupt, closing server");
        }
    }
    Ok(())
}
