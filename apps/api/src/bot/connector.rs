//! Bot Framework connector: posts reply activities back to the channel's service URL.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::bot::activity::Activity;

const TOKEN_URL: &str = "https://login.microsoftonline.com/botframework.com/oauth2/v2.0/token";
const TOKEN_SCOPE: &str = "https://api.botframework.com/.default";

#[derive(Debug, Error)]
pub enum BotError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Connector error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Bot authentication failed: {0}")]
    Auth(String),

    #[error("Activity cannot be answered: {0}")]
    Unroutable(&'static str),
}

/// Delivers bot replies to the conversation an activity came from.
#[async_trait]
pub trait ActivitySender: Send + Sync {
    async fn send_reply(&self, incoming: &Activity, text: &str) -> Result<(), BotError>;
}

/// Microsoft app registration used to obtain connector tokens.
#[derive(Debug, Clone)]
pub struct AppCredentials {
    pub app_id: String,
    pub app_password: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Connector REST client. Sends unauthenticated when no credentials are configured (emulator).
#[derive(Clone)]
pub struct ConnectorClient {
    client: Client,
    credentials: Option<AppCredentials>,
}

impl ConnectorClient {
    pub fn new(credentials: Option<AppCredentials>) -> Result<Self, BotError> {
        Ok(Self {
            client: Client::builder().timeout(Duration::from_secs(30)).build()?,
            credentials,
        })
    }

    async fn access_token(&self, credentials: &AppCredentials) -> Result<String, BotError> {
        let response = self
            .client
            .post(TOKEN_URL)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", credentials.app_id.as_str()),
                ("client_secret", credentials.app_password.as_str()),
                ("scope", TOKEN_SCOPE),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BotError::Auth(format!("token endpoint returned {status}: {body}")));
        }
        Ok(response.json::<TokenResponse>().await?.access_token)
    }
}

#[async_trait]
impl ActivitySender for ConnectorClient {
    async fn send_reply(&self, incoming: &Activity, text: &str) -> Result<(), BotError> {
        let url = reply_url(incoming)?;
        let reply = incoming.reply(text);

        let mut request = self.client.post(&url).json(&reply);
        if let Some(credentials) = &self.credentials {
            request = request.bearer_auth(self.access_token(credentials).await?);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BotError::Api {
                status: status.as_u16(),
                message,
            });
        }

        debug!("Reply delivered to {url}");
        Ok(())
    }
}

/// `{serviceUrl}/v3/conversations/{conversationId}/activities[/{activityId}]`
fn reply_url(incoming: &Activity) -> Result<String, BotError> {
    let service_url = incoming
        .service_url
        .as_deref()
        .ok_or(BotError::Unroutable("missing serviceUrl"))?
        .trim_end_matches('/');
    let conversation = incoming
        .conversation
        .as_ref()
        .ok_or(BotError::Unroutable("missing conversation"))?;

    let mut url = format!(
        "{service_url}/v3/conversations/{}/activities",
        conversation.id
    );
    if let Some(id) = &incoming.id {
        url.push('/');
        url.push_str(id);
    }
    Ok(url)
}
