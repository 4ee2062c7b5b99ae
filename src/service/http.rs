//! HTTP transport - maps REST routes onto [`ButterflyService`].
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /` - liveness, `{ "message": "Server is running!" }`.
//! - `GET /butterflies/:id`, `POST /butterflies`.
//! - `POST /butterflies/:id/rate` - body `{ "userId", "rating" }`.
//! - `GET /users/:id`, `POST /users`.
//! - `GET /users/:id/rated-butterflies` - ranked `{ id, commonName, rating }`.
//!
//! Request bodies are read only when sent as `application/json`.
//! Errors render as `{ "error": "..." }` with 400, 404 or 500.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{debug, error, info, warn};

use super::{ButterflyService, ServiceError};
use crate::models::{Butterfly, NewButterfly, NewUser, RateButterfly, RatedButterfly, Rating, User};
use crate::store::Backend;
use crate::validation::validate_body;

type Shared<B> = State<Arc<ButterflyService<B>>>;

/// Body returned by `POST /butterflies/:id/rate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingResponse {
    pub message: String,
    pub rating: Rating,
}

/// Build an axum `Router` serving the API from the given service.
pub fn router<B: Backend + 'static>(service: Arc<ButterflyService<B>>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/butterflies", post(create_butterfly_handler::<B>))
        .route("/butterflies/:id", get(get_butterfly_handler::<B>))
        .route("/butterflies/:id/rate", post(rate_butterfly_handler::<B>))
        .route("/users", post(create_user_handler::<B>))
        .route("/users/:id", get(get_user_handler::<B>))
        .route(
            "/users/:id/rated-butterflies",
            get(rated_butterflies_handler::<B>),
        )
        .with_state(service)
}

/// Serve the API on `addr` until Ctrl+C or SIGTERM.
pub async fn serve<B: Backend + 'static>(
    service: Arc<ButterflyService<B>>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let app = router(service);
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match &self {
            ServiceError::Store(_) | ServiceError::Task(_) => {
                error!(error = %self, "request failed")
            }
            _ => warn!(error = %self, "request rejected"),
        }

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}

/// Run a service call on the blocking pool.
///
/// The store holds a std `RwLock` across file writes, which must not stall
/// the async workers.
async fn run_blocking<B, T, F>(service: Arc<ButterflyService<B>>, op: F) -> Result<T, ServiceError>
where
    B: Backend + 'static,
    T: Send + 'static,
    F: FnOnce(&ButterflyService<B>) -> Result<T, ServiceError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || op(&service))
        .await
        .map_err(|err| ServiceError::Task(err.to_string()))?
}

/// The body bytes if the request declares `application/json`, else nothing.
///
/// Parameters such as `charset` are ignored. Any other content type reads as
/// an empty object and fails validation.
fn json_payload<'a>(headers: &HeaderMap, body: &'a Bytes) -> &'a [u8] {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    let is_json = content_type
        .and_then(|value| value.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"));

    if is_json {
        body
    } else {
        if !body.is_empty() {
            debug!(content_type = ?content_type, "ignoring non-JSON request body");
        }
        &[]
    }
}

/// `GET /`
async fn root_handler() -> Json<Value> {
    Json(json!({ "message": "Server is running!" }))
}

/// `GET /butterflies/:id`
async fn get_butterfly_handler<B: Backend + 'static>(
    State(service): Shared<B>,
    Path(id): Path<String>,
) -> Result<Json<Butterfly>, ServiceError> {
    let butterfly = run_blocking(service, move |service| service.get_butterfly(&id)).await?;
    Ok(Json(butterfly))
}

/// `POST /butterflies`
async fn create_butterfly_handler<B: Backend + 'static>(
    State(service): Shared<B>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Butterfly>, ServiceError> {
    let input: NewButterfly = validate_body(json_payload(&headers, &body))?;
    let butterfly = run_blocking(service, move |service| service.create_butterfly(input)).await?;
    Ok(Json(butterfly))
}

/// `POST /butterflies/:id/rate`
async fn rate_butterfly_handler<B: Backend + 'static>(
    State(service): Shared<B>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<RatingResponse>, ServiceError> {
    let input: RateButterfly = validate_body(json_payload(&headers, &body))?;
    let rating = run_blocking(service, move |service| service.rate_butterfly(&id, input)).await?;
    Ok(Json(RatingResponse {
        message: "Rating saved".to_string(),
        rating,
    }))
}

/// `GET /users/:id`
async fn get_user_handler<B: Backend + 'static>(
    State(service): Shared<B>,
    Path(id): Path<String>,
) -> Result<Json<User>, ServiceError> {
    let user = run_blocking(service, move |service| service.get_user(&id)).await?;
    Ok(Json(user))
}

/// `POST /users`
async fn create_user_handler<B: Backend + 'static>(
    State(service): Shared<B>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<User>, ServiceError> {
    let input: NewUser = validate_body(json_payload(&headers, &body))?;
    let user = run_blocking(service, move |service| service.create_user(input)).await?;
    Ok(Json(user))
}

/// `GET /users/:id/rated-butterflies`
async fn rated_butterflies_handler<B: Backend + 'static>(
    State(service): Shared<B>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<RatedButterfly>>, ServiceError> {
    let ranked = run_blocking(service, move |service| service.rated_butterflies(&user_id)).await?;
    Ok(Json(ranked))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(err) => {
                error!("Failed to install signal handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
