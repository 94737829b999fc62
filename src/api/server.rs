use std::net::SocketAddr;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{MatchedPath, Request};
use axum::middleware::{self, Next, from_fn};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use http::StatusCode;
use serde::Serialize;
use sqlx::PgPool;
use thiserror::Error;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::instrument;

use crate::api::handler::{log_session, session_history};
use crate::api::middleware::verify::verify_sender_ident;
use crate::api::validate::FieldError;
use crate::api::webhook::dispatch::webhook_handler;
use crate::db::prelude::*;
use crate::util::env::{EnvErr, Var};
use crate::var;

pub type JsonResult<T> = core::result::Result<Json<T>, RouteError>;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db_pool: &'static PgPool,
}

#[instrument(skip(tx))]
pub async fn router(tx: UnboundedSender<SocketAddr>) {
    let state = Arc::new(AppState {
        db_pool: db_pool().await.unwrap(),
    });

    //
    // github hook callback
    let external_post_routes = Router::new()
        .route("/webhook/github", post(webhook_handler))
        .route_layer(middleware::from_fn(verify_sender_ident));

    let app = Router::new()
        .merge(external_post_routes)
        //
        // general
        .route("/", get(|| async { Response::new(Body::empty()) }))
        //
        // tutor-session + role-expo logging
        .route("/tutor-session", post(log_session))
        .route("/tutor-session", get(session_history))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &axum::http::Request<_>| {
                let method = req.method();
                let uri = req.uri();

                let matched_path = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|matched| matched.as_str());

                tracing::debug_span!("api_request", ?method, ?uri, ?matched_path)
            }),
        )
        .layer(from_fn(log_route_errors))
        .with_state(state);

    let port = var!(Var::ServerApiPort)
        .await
        .unwrap()
        .parse::<u16>()
        .unwrap();

    let socket_addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)), port);
    let listener = tokio::net::TcpListener::bind(socket_addr).await.unwrap();

    tx.send(socket_addr).unwrap();
    axum::serve(listener, app).await.unwrap()
}

/// Custom error trace handler for `RouteError`-type responses; the full error
/// only ever reaches the log, never the response body.
#[instrument(skip(request, next), fields(uri = request.uri().to_string()))]
async fn log_route_errors(request: Request, next: Next) -> Response {
    let res = next.run(request).await;
    if let Some(err) = res.extensions().get::<Arc<RouteError>>() {
        tracing::error!(error = ?err, "error occurred inside route handler");
    }

    res
}

#[instrument]
pub async fn start_server(
    tx: UnboundedSender<SocketAddr>,
    mut rx: UnboundedReceiver<SocketAddr>,
) -> Result<Vec<JoinHandle<()>>, RouteError> {
    tracing::info!("starting server");
    let server_handle = tokio::task::spawn(async move {
        router(tx).await;
    });

    let logging_handle = tokio::task::spawn(async move {
        while !rx.is_closed() {
            if let Some(msg) = rx.recv().await {
                tracing::info!(
                    server_url = &format!("http://127.0.0.1:{}", msg.port()),
                    "server ready"
                );
                break;
            }
        }
    });

    let handles = vec![server_handle, logging_handle];
    Ok(handles)
}

#[derive(Debug, Error)]
pub enum RouteError {
    #[error(transparent)]
    QueryError(#[from] PgError),

    #[error(transparent)]
    SqlxError(#[from] sqlx::error::Error),

    #[error(transparent)]
    EnvError(#[from] EnvErr),

    #[error("malformed event payload: {0}")]
    MalformedEvent(serde_json::Error),

    #[error("payload missing repository owner or head commit")]
    MissingEventData,

    #[error("missing required query parameter '{0}'")]
    MissingParam(&'static str),

    #[error("payload failed validation")]
    Validation(Vec<FieldError>),
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            message: String,

            #[serde(skip_serializing_if = "Option::is_none")]
            details: Option<Vec<FieldError>>,
        }

        // internal failures answer with a fixed message; specifics stay in
        // the server log via `log_route_errors`
        let (status, message, details, err) = match self {
            RouteError::QueryError(_) | RouteError::SqlxError(_) | RouteError::EnvError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                String::from("internal server error"),
                None,
                Some(self),
            ),

            RouteError::MalformedEvent(ref error) => (
                StatusCode::BAD_REQUEST,
                format!("malformed event payload: {error}"),
                None,
                Some(self),
            ),

            RouteError::MissingEventData => (
                StatusCode::BAD_REQUEST,
                String::from("payload missing repository owner or head commit"),
                None,
                // caller error, nothing for our log to chase
                None,
            ),

            RouteError::MissingParam(param) => (
                StatusCode::BAD_REQUEST,
                format!("missing required query parameter '{param}'"),
                None,
                None,
            ),

            RouteError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                String::from("payload failed validation"),
                Some(details),
                None,
            ),
        };

        let mut response = (status, Json(ErrorResponse { message, details })).into_response();
        if let Some(err) = err {
            response.extensions_mut().insert(Arc::new(err));
        }

        response
    }
}
