use std::time::Duration;

use anyhow::{Error, Result, anyhow};
use dotenvy::dotenv;
use reqwest::Client;
use serde::Deserialize;

pub const FCM_SERVICE_URL: &str = "https://fcm.googleapis.com/fcm/send";

#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    pub fcm_api_key: String,

    #[serde(default = "default_service_url")]
    pub fcm_service_url: String,

    #[serde(default = "default_timeout_seconds")]
    pub fcm_request_timeout_seconds: u64,
}

impl Config {
    pub fn load() -> Result<Self, Error> {
        dotenv().ok();

        let config = envy::from_env::<Self>()
            .map_err(|_| anyhow!("Invalid or missing environmental variable"))?;
        Ok(config)
    }

    /// Transport for the notifier; the timeout lives here, not in the sender.
    pub fn http_client(&self) -> Result<Client, Error> {
        Client::builder()
            .timeout(Duration::from_secs(self.fcm_request_timeout_seconds))
            .build()
            .map_err(|_| anyhow!("Failed to create HTTP client"))
    }
}

fn default_service_url() -> String {
    FCM_SERVICE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}
