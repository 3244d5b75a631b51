use std::sync::Arc;

use reqwest::Client;

use crate::config::Config;
use crate::core::AppServices;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http_client: Client,
    pub services: AppServices,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::with_client(config, http_client))
    }

    pub fn with_client(config: Config, http_client: Client) -> Self {
        let services = AppServices::new(&config.feed_url);
        Self {
            config: Arc::new(config),
            http_client,
            services,
        }
    }
}
