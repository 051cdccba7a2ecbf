#![forbid(unsafe_code)]
#![deny(rust_2018_idioms, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::{
    env,
    net::{Ipv4Addr, SocketAddr},
};

use anyhow::Result;
use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tokio_shutdown::Shutdown;
use tower::{ServiceBuilder, util::AndThenLayer};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing::{Level, info};
use tracing_subscriber::{filter::Targets, prelude::*};

use crate::repositories::{ServiceRepository, SettingsRepository};

mod cookies;
mod de;
mod dirs;
mod extract;
mod geo;
mod handlers;
mod middleware;
mod models;
mod repositories;
mod response;
mod ser;
mod session;
mod validate;

const ADDRESS: Ipv4Addr = if cfg!(debug_assertions) {
    Ipv4Addr::LOCALHOST
} else {
    Ipv4Addr::UNSPECIFIED
};
const DEFAULT_PORT: u16 = 8080;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    SettingsRepository::init().await?;
    ServiceRepository::init().await?;

    let port = env::var("PORT")
        .ok()
        .and_then(|port| port.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::from((ADDRESS, port));
    let shutdown = Shutdown::new()?;

    let router = Router::new()
        .route("/bookings/{id}/status", post(handlers::booking::status))
        .route("/bookings/{id}/review", post(handlers::booking::review))
        .route(
            "/bookings",
            get(handlers::booking::list).post(handlers::booking::create),
        )
        .route("/technicians/search", post(handlers::technician::search))
        .route(
            "/technicians/availability",
            post(handlers::technician::availability),
        )
        .route("/api/user-info", get(handlers::user::info))
        .route("/api/location", post(handlers::user::location))
        .route("/api/services", get(handlers::services))
        .route("/register/strength", post(handlers::auth::strength))
        .route("/register", post(handlers::auth::register))
        .route("/logout", post(handlers::auth::logout))
        .route("/login", post(handlers::auth::login))
        .route("/", get(handlers::index))
        .fallback(handlers::handle_404)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(AndThenLayer::new(middleware::security_headers))
                .into_inner(),
        );

    let listener = TcpListener::bind(addr).await?;

    info!("listening on http://{addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown.handle())
        .await?;

    Ok(())
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            Targets::new()
                .with_target(env!("CARGO_PKG_NAME"), Level::TRACE)
                .with_target("tower_http", Level::TRACE)
                .with_default(Level::INFO),
        )
        .init();
}
