mod compose;
mod config;
mod downtime;
mod error;
mod normalize;
mod notifier;
mod scheduler;
mod source;
mod targets;
mod tracker;
mod types;

use anyhow::Result;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Inicializa o sistema de logging (tracing), respeitando RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Carrega e valida a configuração (fixa durante toda a execução)
    let config = config::Config::load()?;
    config.validate().map_err(anyhow::Error::msg)?;
    info!("Configuração carregada: ciclo de {}s", config.cycle_interval_secs);

    // Sensores monitorados: arquivo ilegível vira conjunto vazio
    let targets = targets::load_objids(&config.sensor_ids_file);

    // Cliente HTTP único, com timeout para não travar o loop
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()?;
    let source = source::PrtgSource::new(config.prtg_api_url.clone(), client.clone());
    let notifier =
        notifier::WebhookNotifier::new(config.webhook_url.clone(), config.bot_username.clone(), client);

    info!("Iniciando os trabalhos");
    scheduler::run_scheduler(
        &source,
        &notifier,
        targets,
        Duration::from_secs(config.cycle_interval_secs),
    )
    .await;

    Ok(())
}
