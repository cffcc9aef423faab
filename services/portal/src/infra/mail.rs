use anyhow::Context as _;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::domain::repository::EmailSender;
use crate::domain::types::OutgoingEmail;
use crate::error::PortalError;

// ── SMTP ─────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Authenticated TLS relay. The sender address is the SMTP user.
    pub fn new(host: &str, user: &str, password: &str) -> anyhow::Result<Self> {
        let from: Mailbox = user.parse().context("invalid EMAIL_USER address")?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(host)
            .context("invalid SMTP_HOST")?
            .credentials(Credentials::new(user.to_owned(), password.to_owned()))
            .build();
        Ok(Self { transport, from })
    }
}

impl EmailSender for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), PortalError> {
        let to: Mailbox = email
            .to
            .parse()
            .map_err(|e| PortalError::Mail(anyhow::Error::new(e).context("invalid recipient")))?;
        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(email.body.clone())
            .map_err(|e| PortalError::Mail(e.into()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| PortalError::Mail(e.into()))?;
        tracing::info!(to = %email.to, subject = %email.subject, "email sent");
        Ok(())
    }
}

// ── Log only ─────────────────────────────────────────────────────────────────

/// Writes outgoing mail to the log instead of delivering it.
#[derive(Clone, Default)]
pub struct LogMailer;

impl EmailSender for LogMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), PortalError> {
        tracing::warn!(
            to = %email.to,
            subject = %email.subject,
            body = %email.body,
            "SMTP not configured, email not delivered"
        );
        Ok(())
    }
}

// ── Mailer ───────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub enum Mailer {
    Smtp(SmtpMailer),
    Log(LogMailer),
}

impl EmailSender for Mailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), PortalError> {
        match self {
            Self::Smtp(m) => m.send(email).await,
            Self::Log(m) => m.send(email).await,
        }
    }
}
