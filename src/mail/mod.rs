//! Outgoing email. Handlers build an [`EmailMessage`] and hand it to the
//! configured [`Mailer`]; delivery happens inside the request.

pub mod console;
pub mod file;
pub mod memory;
pub mod smtp;

use std::sync::Arc;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::Message;

use crate::config::{Config, MailBackend};

pub use console::ConsoleMailer;
pub use file::FileMailer;
pub use memory::MemoryMailer;
pub use smtp::SmtpMailer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub subject: String,
    pub body: String,
    pub from: String,
    pub to: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Invalid address: {0}")]
    Address(String),

    #[error("Message build error: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("Outbox error: {0}")]
    File(#[from] lettre::transport::file::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one message. Errors are not retried.
    async fn send(&self, message: &EmailMessage) -> Result<(), MailError>;
}

/// Build the mail backend named in config.
pub fn build_mailer(config: &Config) -> Arc<dyn Mailer> {
    match config.mail.backend {
        MailBackend::Console => Arc::new(ConsoleMailer),
        MailBackend::File => Arc::new(FileMailer::new(config.outbox_path())),
        MailBackend::Smtp => Arc::new(SmtpMailer::new(&config.mail.smtp)),
    }
}

fn mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .parse::<Mailbox>()
        .map_err(|e| MailError::Address(format!("{address}: {e}")))
}

/// Convert to a lettre message with a plain-text body. Every backend goes
/// through here so header values are always encoded the same way.
pub(crate) fn to_message(message: &EmailMessage) -> Result<Message, MailError> {
    let mut builder = Message::builder()
        .from(mailbox(&message.from)?)
        .subject(message.subject.as_str())
        .header(ContentType::TEXT_PLAIN);
    for to in &message.to {
        builder = builder.to(mailbox(to)?);
    }
    Ok(builder.body(message.body.clone())?)
}
