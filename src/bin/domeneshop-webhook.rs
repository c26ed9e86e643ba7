use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::{Context, Result, bail};
use axum::Router;
use clap::Parser;
use domeneshop_webhook::{
    AppState, api, config::AppConfig, domeneshop::client::DEFAULT_API_URL,
    endpoint::DomainFilter,
};
use tokio::{net::TcpListener, signal};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about, rename_all = "kebab-case")]
struct Cli {
    /// Domeneshop API token
    #[arg(long, env = "TOKEN", value_name = "TOKEN", hide_env_values = true)]
    token: String,
    /// Domeneshop API secret
    #[arg(long, env = "SECRET", value_name = "SECRET", hide_env_values = true)]
    secret: String,
    /// Base URL of the Domeneshop API
    #[arg(long, env = "DOMENESHOP_API_URL", value_name = "URL", default_value = DEFAULT_API_URL)]
    api_url: String,
    /// Listen address for the external-dns webhook
    #[arg(long, env = "WEBHOOK_LISTEN", value_name = "ADDR", default_value = "127.0.0.1:8888")]
    listen: SocketAddr,
    /// Listen address for the health check
    #[arg(long, env = "HEALTH_LISTEN", value_name = "ADDR", default_value = "0.0.0.0:8080")]
    health_listen: SocketAddr,
    /// Domains to manage (repeat or comma separate; default all)
    #[arg(long, env = "DOMAIN_FILTER", value_name = "DOMAIN", value_delimiter = ',')]
    domain_filter: Vec<String>,
    /// Domains to leave alone even when included
    #[arg(long, env = "EXCLUDE_DOMAINS", value_name = "DOMAIN", value_delimiter = ',')]
    exclude_domain: Vec<String>,
    /// Timeout for each Domeneshop API request, in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    request_timeout_secs: u64,
    /// Create MX records with wire type TXT instead of rejecting them
    #[arg(long, env = "MX_AS_TXT")]
    mx_as_txt: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = build_app_config(&cli)?;
    info!(?config, "starting domeneshop webhook");

    let state = Arc::new(AppState::from_config(&config).context("failed to build API client")?);

    let webhook = serve(api::create_router(state), cli.listen, "webhook");
    let health = serve(api::health_router(), cli.health_listen, "health check");
    tokio::try_join!(webhook, health)?;

    Ok(())
}

async fn serve(app: Router, addr: SocketAddr, name: &'static str) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {name} listener to {addr}"))?;

    info!("{name} server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .with_context(|| format!("{name} server exited with error"))
}

fn build_app_config(cli: &Cli) -> Result<AppConfig> {
    if cli.token.trim().is_empty() {
        bail!("TOKEN must not be empty");
    }
    if cli.secret.trim().is_empty() {
        bail!("SECRET must not be empty");
    }
    if cli.request_timeout_secs == 0 {
        bail!("--request-timeout-secs must be at least 1");
    }

    let mut config = AppConfig::new(cli.token.trim(), cli.secret.trim());
    config.api_url = cli.api_url.clone();
    config.request_timeout = Duration::from_secs(cli.request_timeout_secs);
    config.mx_as_txt = cli.mx_as_txt;
    config.domain_filter = DomainFilter::new(cli.domain_filter.clone(), cli.exclude_domain.clone());
    Ok(config)
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        error!("failed to install CTRL+C handler: {err}");
    }
    info!("shutdown signal received");
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}
