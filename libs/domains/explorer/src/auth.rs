//! QR code login
//!
//! The API hands out a session token that the user scans in the mobile app;
//! the exchange endpoint is then polled until it yields tokens.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, instrument};

use crate::error::{ExplorerError, ExplorerResult};
use crate::settings::{Settings, SettingsStore};
use crate::transport::{ApiRequest, HttpTransport};

pub const CLIENT_TYPE: &str = "integration";

pub const DEFAULT_POLL_ATTEMPTS: u32 = 600;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Deserialize)]
struct TriggerResponse {
    session_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ExchangeResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
}

pub struct QrAuthenticator<T: HttpTransport> {
    transport: T,
    host: String,
    poll_attempts: u32,
    poll_interval: Duration,
}

impl<T: HttpTransport> QrAuthenticator<T> {
    pub fn new(transport: T, host: impl Into<String>) -> Self {
        Self {
            transport,
            host: host.into().trim_end_matches('/').to_string(),
            poll_attempts: DEFAULT_POLL_ATTEMPTS,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_polling(mut self, attempts: u32, interval: Duration) -> Self {
        self.poll_attempts = attempts;
        self.poll_interval = interval;
        self
    }

    fn trigger_url(&self) -> String {
        format!("{}/qr_login/trigger/", self.host)
    }

    fn exchange_url(&self) -> String {
        format!("{}/qr_login/exchange/", self.host)
    }

    /// Request a new login session token
    pub async fn start_session(&self) -> ExplorerResult<String> {
        let url = self.trigger_url();
        let response = self
            .transport
            .send(ApiRequest::post(&url, json!({ "client_type": CLIENT_TYPE })))
            .await?;

        if !response.is_success() {
            return Err(ExplorerError::Api {
                status: response.status,
                url,
            });
        }

        let trigger: TriggerResponse = serde_json::from_str(&response.body)?;
        trigger
            .session_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ExplorerError::Auth("login trigger returned no session token".to_string()))
    }

    /// Run the full login: start a session, show its token via `show_session`,
    /// poll for tokens and persist them in `store`.
    #[instrument(skip_all)]
    pub async fn authenticate<S, F>(&self, store: &S, show_session: F) -> ExplorerResult<Settings>
    where
        S: SettingsStore + ?Sized,
        F: FnOnce(&str),
    {
        info!("Starting QR authentication");
        let session_token = self.start_session().await?;
        show_session(&session_token);

        let mut settings = store.load().await;
        for attempt in 1..=self.poll_attempts {
            let exchange = self.exchange(&session_token).await?;
            if let Some(access_token) = exchange.access_token.filter(|t| !t.is_empty()) {
                settings.access_token = Some(access_token);
                settings.refresh_token = exchange.refresh_token;
                store.save(&settings).await?;
                info!(attempt, "Authentication successful");
                return Ok(settings);
            }

            debug!(attempt, "Login not confirmed yet");
            if attempt < self.poll_attempts {
                tokio::time::sleep(self.poll_interval).await;
            }
        }

        Err(ExplorerError::AuthTimeout(self.poll_attempts))
    }

    /// Responses without tokens, including error bodies, mean "not yet"
    async fn exchange(&self, session_token: &str) -> ExplorerResult<ExchangeResponse> {
        let response = self
            .transport
            .send(ApiRequest::post(
                self.exchange_url(),
                json!({ "session_token": session_token }),
            ))
            .await?;

        Ok(serde_json::from_str(&response.body).unwrap_or_default())
    }
}
