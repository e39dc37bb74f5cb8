use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::config::BrevoSettings;

const BREVO_SEND_URL: &str = "https://api.brevo.com/v3/smtp/email";

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Notification send failed: {0}")]
    Send(String),
}

/// Outbound delivery of activation messages.
///
/// The workflows depend only on this contract; the transport behind it is
/// interchangeable. Sends are one-shot: a failure is terminal for the call,
/// with no retry and no rollback of already-persisted rows.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    /// Deliver an activation code to the given address
    async fn send_activation(
        &self,
        to: &str,
        display_name: &str,
        code: &str,
        activation_url: &str,
        subject: &str,
    ) -> Result<(), NotificationError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BrevoEmailAddress {
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BrevoSendEmailBody {
    sender: BrevoEmailAddress,
    to: Vec<BrevoEmailAddress>,
    subject: String,
    text_content: String,
}

/// Sends activation emails through the Brevo transactional API
pub struct BrevoGateway {
    http: reqwest::Client,
    settings: BrevoSettings,
}

impl BrevoGateway {
    pub fn new(settings: BrevoSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
        }
    }
}

#[async_trait]
impl NotificationGateway for BrevoGateway {
    async fn send_activation(
        &self,
        to: &str,
        display_name: &str,
        code: &str,
        activation_url: &str,
        subject: &str,
    ) -> Result<(), NotificationError> {
        let body = BrevoSendEmailBody {
            sender: BrevoEmailAddress {
                email: self.settings.sender_email.clone(),
                name: self.settings.sender_name.clone(),
            },
            to: vec![BrevoEmailAddress {
                email: to.to_string(),
                name: Some(display_name.to_string()),
            }],
            subject: subject.to_string(),
            text_content: format!(
                "Hello {display_name},\n\n\
                 Your activation code is {code}.\n\
                 It is valid for 15 minutes.\n\n\
                 Activate your account at {activation_url}\n",
            ),
        };

        let response = self
            .http
            .post(BREVO_SEND_URL)
            .header("api-key", &self.settings.api_key)
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| NotificationError::Send(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(NotificationError::Send(format!(
            "Brevo send failed (status={status}): {body}"
        )))
    }
}

/// Development fallback used when no email transport is configured: the
/// activation code is written to the application log instead.
pub struct ConsoleGateway;

#[async_trait]
impl NotificationGateway for ConsoleGateway {
    async fn send_activation(
        &self,
        to: &str,
        display_name: &str,
        code: &str,
        activation_url: &str,
        subject: &str,
    ) -> Result<(), NotificationError> {
        tracing::info!(
            to,
            display_name,
            code,
            activation_url,
            subject,
            "activation notification (console gateway)"
        );
        Ok(())
    }
}
