use anyhow::Context;
use lettre::message::Mailbox;
use patient_report::api::{self, app_state::AppState};
use patient_report::config::loader::ConfigLoader;
use patient_report::observability::{
    AppMetrics, ObservabilityState, create_observability_router, init_tracing,
};
use patient_report::services::{ReportRenderer, SmtpMailer};
use patient_report::storage::factory::StorageFactory;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load().context("failed to load configuration")?;
    ConfigLoader::validate(&config)?;

    let _log_guard = init_tracing(&config.logging).map_err(|e| anyhow::anyhow!(e))?;
    info!(
        "Starting {} ({} environment)...",
        config.app_name, config.environment
    );

    let store = StorageFactory::create(&config.database).await?;
    info!("Patient store initialized ({:?} backend)", config.database.backend);

    let renderer = ReportRenderer::from_config(&config.report)?;
    info!("Report renderer ready ({:?})", renderer);

    let sender: Mailbox = config
        .mail
        .from
        .parse()
        .with_context(|| format!("invalid sender address {}", config.mail.from))?;
    let mailer = Arc::new(SmtpMailer::new(&config.mail)?);
    info!(
        "Mail transport configured for {}:{}",
        config.mail.smtp_host, config.mail.smtp_port
    );

    let metrics = Arc::new(AppMetrics::default());
    let app_state = AppState::new(store, renderer, mailer, sender, metrics.clone());
    info!("Application state created");

    let observability_state = Arc::new(ObservabilityState::new(
        env!("CARGO_PKG_VERSION").to_string(),
        metrics,
    ));
    let router =
        create_observability_router(observability_state).merge(api::create_router(app_state));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
