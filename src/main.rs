use std::sync::Arc;

use anyhow::Context;

use studentapp::config::Config;
use studentapp::memory::MemoryStudentRepository;
use studentapp::repository::{PgStudentRepository, StudentRepository};
use studentapp::service::StudentService;
use studentapp::session::SessionFactory;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = Config::load()?;

    let (repository, sessions) = match config.store.url.as_deref() {
        Some(url) => {
            let sessions = SessionFactory::connect(url, &config.store)
                .await
                .context("could not open the student store")?;
            let repository: Arc<dyn StudentRepository> =
                Arc::new(PgStudentRepository::new(sessions.clone()));
            (repository, Some(sessions))
        }
        None => {
            log::warn!("No database URL configured, students are kept in memory only");
            let repository: Arc<dyn StudentRepository> = Arc::new(MemoryStudentRepository::new());
            (repository, None)
        }
    };

    let app = studentapp::app(StudentService::new(repository));

    studentapp::run(app, config.server.bind, sessions, shutdown_signal()).await?;
    log::info!("StudentApp HTTP Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("Could not listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}
