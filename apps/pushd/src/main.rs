//! Kopro push delivery daemon.
//!
//! Bridges the web-to-native wrapper to the OS: receives push payloads and
//! notification clicks over a loopback WebSocket, renders desktop
//! notifications, and opens the application on click.

mod config;
mod intake;
mod windows;

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use kopro_desktop_notify::DesktopShelf;
use kopro_push_wire::constants::PRODUCT_NAME;
use kopro_router::{NotificationRouter, RouterWorker};

use crate::config::PushdConfig;
use crate::intake::run_intake;
use crate::windows::OpenerWindows;

/// Router queue capacity. Push bursts are small; 64 gives headroom.
const QUEUE_CAPACITY: usize = 64;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = PushdConfig::load()?;
    info!(origin = %config.origin, "starting push daemon");

    let shelf = Arc::new(DesktopShelf::new(PRODUCT_NAME));
    let windows = Arc::new(OpenerWindows::new(
        config.origin.clone(),
        config.opener.clone(),
    ));
    let router = NotificationRouter::new(config.origin.clone(), shelf, windows);
    router.activate().await;

    let (events_tx, events_rx) = mpsc::channel(QUEUE_CAPACITY);
    let cancel = CancellationToken::new();
    let worker = RouterWorker::spawn(router, events_rx, cancel.clone());

    let listener = TcpListener::bind(("127.0.0.1", config.port)).await?;
    info!("push intake listening on {}", listener.local_addr()?);
    let intake = tokio::spawn(run_intake(listener, events_tx, cancel.clone()));

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    cancel.cancel();
    let _ = intake.await;
    worker.wait().await;

    Ok(())
}
