use async_trait::async_trait;

use super::{to_message, EmailMessage, MailError, Mailer};

/// Writes each message to the log instead of delivering it.
pub struct ConsoleMailer;

#[async_trait]
impl Mailer for ConsoleMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailError> {
        let email = to_message(message)?;
        tracing::info!(
            recipients = message.to.len(),
            "Outgoing mail (console backend):\n{}",
            String::from_utf8_lossy(&email.formatted())
        );
        Ok(())
    }
}
