use async_trait::async_trait;

use blog_core::ports::{MailError, Mailer, OutboundEmail};

use super::mask_email;

/// Mailer that hands messages to an HTTP mail API as JSON.
///
/// The payload is the serialized [`OutboundEmail`]; any non-success status
/// is reported as a rejection.
pub struct WebhookMailer {
    url: String,
    client: reqwest::Client,
}

impl WebhookMailer {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Mailer for WebhookMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
        let response = self
            .client
            .post(&self.url)
            .json(&email)
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MailError::Rejected(format!("status {}", status)));
        }

        let recipients: Vec<String> = email.to.iter().map(|to| mask_email(to)).collect();
        tracing::debug!(to = ?recipients, "Email handed to mail API");
        Ok(())
    }
}
