//! Crate entrypoint wiring together configuration, the Domeneshop client,
//! the reconciliation engine, and the webhook API.

pub mod api;
pub mod config;
pub mod domeneshop;
pub mod endpoint;
pub mod error;
pub mod provider;
pub mod registrar;
pub mod validation;

use config::AppConfig;
use domeneshop::DomeneshopClient;
use provider::DomeneshopProvider;

use std::sync::Arc;

/// Complete application dependencies shared across handlers.
pub struct AppState {
    pub provider: DomeneshopProvider<DomeneshopClient>,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> error::Result<Self> {
        let client = DomeneshopClient::new(
            config.api_base(),
            &config.api_token,
            &config.api_secret,
            config.request_timeout,
        )?
        .with_mx_as_txt(config.mx_as_txt);

        Ok(Self {
            provider: DomeneshopProvider::new(client, config.domain_filter.clone()),
        })
    }
}

/// Arc-wrapped version of `AppState` passed into Axum extensions.
pub type SharedState = Arc<AppState>;
