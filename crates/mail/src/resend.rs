//! Transactional email through the Resend REST API.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::MailError;
use crate::message::OutgoingEmail;
use crate::transport::TransactionalMailer;

const DEFAULT_BASE_URL: &str = "https://api.resend.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct ResendConfig {
    pub api_key: String,
    pub base_url: String,
}

impl ResendConfig {
    /// Load from `RESEND_API_KEY`. Returns `None` when unset.
    /// `RESEND_BASE_URL` overrides the API root.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("RESEND_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())?;
        Some(Self {
            api_key,
            base_url: std::env::var("RESEND_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        })
    }
}

pub struct ResendClient {
    client: reqwest::Client,
    config: ResendConfig,
}

impl ResendClient {
    pub fn new(config: ResendConfig) -> Result<Self, MailError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    /// `POST /emails`. The JSON body is the [`OutgoingEmail`] itself.
    fn request(&self, email: &OutgoingEmail) -> reqwest::RequestBuilder {
        self.client
            .post(format!(
                "{}/emails",
                self.config.base_url.trim_end_matches('/')
            ))
            .bearer_auth(&self.config.api_key)
            .json(email)
    }
}

#[async_trait]
impl TransactionalMailer for ResendClient {
    fn name(&self) -> &'static str {
        "resend"
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let response = self.request(email).send().await?;
        if !response.status().is_success() {
            return Err(MailError::from_response("Resend", response).await);
        }
        tracing::info!(to = ?email.to, subject = %email.subject, "Email sent via Resend");
        Ok(())
    }
}
