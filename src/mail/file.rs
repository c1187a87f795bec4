use std::path::PathBuf;

use async_trait::async_trait;
use lettre::{AsyncFileTransport, AsyncTransport, Tokio1Executor};

use super::{to_message, EmailMessage, MailError, Mailer};

/// Drops one `<message-id>.eml` file per message into an outbox directory.
pub struct FileMailer {
    dir: PathBuf,
    transport: AsyncFileTransport<Tokio1Executor>,
}

impl FileMailer {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            transport: AsyncFileTransport::new(&dir),
            dir,
        }
    }
}

#[async_trait]
impl Mailer for FileMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailError> {
        let email = to_message(message)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        let id = self.transport.send(email).await?;
        tracing::info!("Wrote mail {} to {}", id, self.dir.display());
        Ok(())
    }
}
