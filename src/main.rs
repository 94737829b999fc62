use std::net::SocketAddr;

use futures::future::join_all;
use thiserror::Error;

mod api;
mod constants;
mod db;
mod grading;
mod util;

#[derive(Debug, Error)]
enum RunnerErr {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Route(#[from] api::server::RouteError),
}

type Result<T> = core::result::Result<T, RunnerErr>;

#[tokio::main]
async fn main() -> Result<()> {
    util::tracing::build_subscriber();

    tracing::info!("starting main application");

    let (tx_server_ready, rx_server_ready) = tokio::sync::mpsc::unbounded_channel::<SocketAddr>();

    let handles = api::server::start_server(tx_server_ready, rx_server_ready).await?;
    _ = join_all(handles).await;

    Ok(())
}
