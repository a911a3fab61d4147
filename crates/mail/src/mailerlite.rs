//! MailerLite newsletter API: subscribers and bulk campaigns.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::MailError;
use crate::message::CampaignDraft;

const DEFAULT_BASE_URL: &str = "https://connect.mailerlite.com/api";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

const SERVICE: &str = "MailerLite";

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct MailerLiteConfig {
    pub api_key: String,
    pub base_url: String,
    /// Group new subscribers join and campaigns are sent to.
    pub group_id: Option<String>,
    /// Sender shown on campaigns. Must be a verified MailerLite sender.
    pub from_email: String,
    pub from_name: String,
}

impl MailerLiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` when `MAILERLITE_API_KEY` is unset, which disables the
    /// newsletter.
    ///
    /// | Variable                | Required | Default                               |
    /// |-------------------------|----------|---------------------------------------|
    /// | `MAILERLITE_API_KEY`    | yes      | --                                    |
    /// | `MAILERLITE_GROUP_ID`   | no       | --                                    |
    /// | `MAILERLITE_FROM_EMAIL` | no       | `newsletter@moviehunt.app`            |
    /// | `MAILERLITE_FROM_NAME`  | no       | `MovieHunt`                           |
    /// | `MAILERLITE_BASE_URL`   | no       | `https://connect.mailerlite.com/api`  |
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("MAILERLITE_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())?;
        Some(Self {
            api_key,
            base_url: std::env::var("MAILERLITE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            group_id: std::env::var("MAILERLITE_GROUP_ID")
                .ok()
                .filter(|g| !g.trim().is_empty()),
            from_email: std::env::var("MAILERLITE_FROM_EMAIL")
                .unwrap_or_else(|_| "newsletter@moviehunt.app".to_string()),
            from_name: std::env::var("MAILERLITE_FROM_NAME")
                .unwrap_or_else(|_| "MovieHunt".to_string()),
        })
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct SubscriberRequest<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<SubscriberFields<'a>>,
    #[serde(skip_serializing_if = "no_groups")]
    groups: &'a [String],
}

#[derive(Debug, Serialize)]
struct SubscriberFields<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct CampaignRequest<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    emails: [CampaignEmail<'a>; 1],
    #[serde(skip_serializing_if = "no_groups")]
    groups: &'a [String],
}

#[derive(Debug, Serialize)]
struct CampaignEmail<'a> {
    subject: &'a str,
    from_name: &'a str,
    from: &'a str,
    content: &'a str,
}

fn no_groups(groups: &&[String]) -> bool {
    groups.is_empty()
}

#[derive(Debug, Serialize)]
struct ScheduleRequest {
    delivery: &'static str,
}

#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

/// Subscriber record as returned by MailerLite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscriber {
    pub id: String,
    pub email: String,
    pub status: Option<String>,
}

/// Campaign record as returned by MailerLite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct MailerLiteClient {
    client: reqwest::Client,
    config: MailerLiteConfig,
}

impl MailerLiteClient {
    pub fn new(config: MailerLiteConfig) -> Result<Self, MailError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    /// Groups configured for signups and campaigns.
    fn default_groups(&self) -> Vec<String> {
        self.config.group_id.iter().cloned().collect()
    }

    /// `POST /subscribers`. MailerLite treats this as an upsert keyed on email,
    /// so signing up twice is not an error.
    pub async fn upsert_subscriber(
        &self,
        email: &str,
        name: Option<&str>,
        groups: &[String],
    ) -> Result<Subscriber, MailError> {
        let envelope: DataEnvelope<Subscriber> =
            self.execute(self.subscriber_request(email, name, groups)).await?;
        tracing::info!(subscriber_id = %envelope.data.id, "Newsletter subscriber upserted");
        Ok(envelope.data)
    }

    /// Subscribe to the configured default group.
    pub async fn subscribe(
        &self,
        email: &str,
        name: Option<&str>,
    ) -> Result<Subscriber, MailError> {
        self.upsert_subscriber(email, name, &self.default_groups())
            .await
    }

    /// `POST /campaigns` as a regular campaign addressed to the default group.
    pub async fn create_campaign(&self, draft: &CampaignDraft) -> Result<Campaign, MailError> {
        let groups = self.default_groups();
        let envelope: DataEnvelope<Campaign> =
            self.execute(self.campaign_request(draft, &groups)).await?;
        tracing::info!(campaign_id = %envelope.data.id, name = %draft.name, "Campaign created");
        Ok(envelope.data)
    }

    /// `POST /campaigns/{id}/schedule` with instant delivery.
    pub async fn schedule_now(&self, campaign_id: &str) -> Result<(), MailError> {
        let response = self.schedule_request(campaign_id).send().await?;
        if !response.status().is_success() {
            return Err(MailError::from_response(SERVICE, response).await);
        }
        tracing::info!(campaign_id, "Campaign scheduled for instant delivery");
        Ok(())
    }

    /// Create the campaign and send it immediately.
    pub async fn announce(&self, draft: &CampaignDraft) -> Result<Campaign, MailError> {
        let campaign = self.create_campaign(draft).await?;
        self.schedule_now(&campaign.id).await?;
        Ok(campaign)
    }

    // ---- private helpers ----

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn subscriber_request(
        &self,
        email: &str,
        name: Option<&str>,
        groups: &[String],
    ) -> reqwest::RequestBuilder {
        let body = SubscriberRequest {
            email,
            fields: name
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(|name| SubscriberFields { name }),
            groups,
        };
        self.client
            .post(self.url("/subscribers"))
            .bearer_auth(&self.config.api_key)
            .json(&body)
    }

    fn campaign_request(
        &self,
        draft: &CampaignDraft,
        groups: &[String],
    ) -> reqwest::RequestBuilder {
        let body = CampaignRequest {
            name: &draft.name,
            kind: "regular",
            emails: [CampaignEmail {
                subject: &draft.subject,
                from_name: &self.config.from_name,
                from: &self.config.from_email,
                content: &draft.content,
            }],
            groups,
        };
        self.client
            .post(self.url("/campaigns"))
            .bearer_auth(&self.config.api_key)
            .json(&body)
    }

    fn schedule_request(&self, campaign_id: &str) -> reqwest::RequestBuilder {
        self.client
            .post(self.url(&format!("/campaigns/{campaign_id}/schedule")))
            .bearer_auth(&self.config.api_key)
            .json(&ScheduleRequest {
                delivery: "instant",
            })
    }

    async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, MailError> {
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(MailError::from_response(SERVICE, response).await);
        }
        Ok(response.json::<T>().await?)
    }
}
