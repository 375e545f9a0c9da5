use async_trait::async_trait;

use blog_core::ports::{MailError, Mailer, OutboundEmail};

use super::mask_email;

/// Mailer that writes messages to the log instead of delivering them.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
        let recipients: Vec<String> = email.to.iter().map(|to| mask_email(to)).collect();
        tracing::info!(
            from = %email.from,
            to = ?recipients,
            subject = %email.subject,
            "Email not delivered (log transport)\n{}",
            email.body
        );
        Ok(())
    }
}
