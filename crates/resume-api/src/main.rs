//! Resume API server.
//!
//! - Visit counter: GET|POST /api/getResumeFunction
//! - Contact form: POST /api/contact
//! - Health: GET /api/health, metrics: GET /metrics
//!
//! Config is read from `$RESUME_CONFIG` (default `resume.yaml`).

use std::net::SocketAddr;
use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use resume_api::{app_state, config, router};

#[tokio::main]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "resume-api exited with error");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let path = config::config_path();
    let cfg = config::load_from_file(&path)?;
    let listen = cfg.server.listen_addr()?;

    let state = app_state::AppState::bootstrap(cfg).await?;
    let app = router::build_router(state);

    tracing::info!(%listen, config = %path, "resume-api starting");
    let listener = tokio::net::TcpListener::bind(listen).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("resume-api stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler failed; shutting down");
    }
}
