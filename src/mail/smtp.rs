use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};

use super::{to_message, EmailMessage, MailError, Mailer};
use crate::config::SmtpConfig;

/// Plaintext SMTP relay delivery. One connection per message.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Self {
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(config.host.as_str())
                .port(config.port);
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }
        Self {
            transport: builder.build(),
        }
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailError> {
        let email = to_message(message)?;
        self.transport.send(email).await?;
        tracing::info!(
            recipients = message.to.len(),
            "Delivered mail \"{}\" via SMTP",
            message.subject
        );
        Ok(())
    }
}
