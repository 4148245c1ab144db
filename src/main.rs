use anyhow::Context;
use tracing_subscriber::EnvFilter;

use icp_dashboard::config::ServiceConfig;
use icp_dashboard::onboarding::{WizardSessions, spawn_pruning_task};
use icp_dashboard::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::from_env();

    // Initialize tracing; keep the guard alive so buffered file logs flush on exit
    let env_filter =
        || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _log_guard = match config.log_dir {
        Some(ref dir) => {
            let appender = tracing_appender::rolling::daily(dir, "icp-dashboard.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .init();
            None
        }
    };

    let addr = format!("{}:{}", config.bind, config.port);

    eprintln!("ICP Dashboard v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   API: http://{addr}/api");
    eprintln!("   Wizard WS: ws://{addr}/ws/onboarding/{{session_id}}");
    eprintln!(
        "   Ingestion: {}",
        config.ingest_url.as_deref().unwrap_or("log only")
    );
    eprintln!(
        "   Require company info on submit: {}",
        config.submission.require_company_info
    );
    eprintln!(
        "   Idle wizard sessions pruned after: {}s",
        config.session_idle_timeout.as_secs()
    );
    if let Some(ref dir) = config.log_dir {
        eprintln!("   Logs: {dir}");
    }

    let deps = server::wizard_deps(&config).context("failed to set up wizard collaborators")?;
    let sessions = WizardSessions::new(deps);
    let pruning_handle = spawn_pruning_task(sessions.clone(), config.session_idle_timeout);
    let app = server::app(sessions, config.ui);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(addr = %addr, "ICP dashboard server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pruning_handle.abort();

    tracing::info!("ICP dashboard server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
