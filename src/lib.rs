pub mod auth;
pub mod config;
pub mod cors;
pub mod err;
pub mod health;
pub mod memory;
pub mod models;
pub mod repository;
pub mod service;
pub mod session;

use std::future::Future;
use std::net::SocketAddr;

use anyhow::Context;
use axum::handler::Handler;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::Serialize;

use crate::err::Error;
use crate::service::StudentService;
use crate::session::SessionFactory;

pub type Payload<T> = Result<Json<T>, Error>;

pub fn proceeds<V>(value: V) -> Payload<V>
where
    V: Serialize,
{
    Ok(Json(value))
}

pub fn app(students: StudentService) -> Router {
    let router = Router::new()
        .route("/login", post(auth::login_student).options(auth::preflight))
        .route("/register", post(auth::register_student).options(auth::preflight))
        .route("/see-results", post(auth::see_results).options(auth::preflight))
        .route("/health", get(health::check_store))
        .fallback(err::handler404.into_service())
        .layer(Extension(students));
    cors::allow_any_origin(router)
}

/// Serves `app` on `addr` until `shutdown` resolves, then closes the session
/// factory. The factory is closed on every exit, including a failed bind.
pub async fn run<F>(
    app: Router,
    addr: SocketAddr,
    sessions: Option<SessionFactory>,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()>,
{
    let served = serve(app, addr, shutdown).await;
    if let Some(sessions) = sessions {
        sessions.close().await;
    }
    served
}

async fn serve<F>(app: Router, addr: SocketAddr, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()>,
{
    log::info!("Starting StudentApp HTTP Server on http://{}", addr);
    axum::Server::try_bind(&addr)
        .with_context(|| format!("could not bind {}", addr))?
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
