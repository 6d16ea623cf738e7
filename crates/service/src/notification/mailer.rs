use std::time::Duration;

use async_trait::async_trait;
use configs::{MailConfig, MailTls};
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail transport disabled: no SMTP host configured")]
    Disabled,
    #[error("invalid address: {0}")]
    Address(String),
    #[error("cannot build message: {0}")]
    Build(String),
    #[error("delivery failed: {0}")]
    Transport(String),
}

/// A rendered HTML email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError>;
}

/// SMTP delivery through lettre's tokio transport.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn from_config(cfg: &MailConfig) -> Result<Self, MailError> {
        let host = cfg.host.as_deref().filter(|h| !h.trim().is_empty()).ok_or(MailError::Disabled)?;
        let builder = match cfg.tls {
            MailTls::Starttls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                .map_err(|e| MailError::Transport(e.to_string()))?,
            MailTls::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                .map_err(|e| MailError::Transport(e.to_string()))?,
            MailTls::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host),
        };
        let mut builder = builder
            .port(cfg.port)
            .timeout(Some(Duration::from_secs(cfg.timeout_secs)));
        if let (Some(user), Some(pass)) = (&cfg.user, &cfg.pass) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }
        let from = cfg.from.parse::<Mailbox>().map_err(|e| MailError::Address(e.to_string()))?;
        info!(%host, port = cfg.port, tls = ?cfg.tls, "smtp mailer configured");
        Ok(Self { transport: builder.build(), from })
    }

    fn build_message(&self, mail: &OutgoingMail) -> Result<Message, MailError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(mail.subject.clone())
            .header(ContentType::TEXT_HTML);
        for to in &mail.to {
            let mailbox = to.parse::<Mailbox>().map_err(|e| MailError::Address(format!("{to}: {e}")))?;
            builder = builder.to(mailbox);
        }
        builder.body(mail.html.clone()).map_err(|e| MailError::Build(e.to_string()))
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        let message = self.build_message(mail)?;
        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;
        Ok(())
    }
}

/// Used when no SMTP host is configured; every send fails.
pub struct DisabledMailer;

#[async_trait]
impl MailTransport for DisabledMailer {
    async fn send(&self, _mail: &OutgoingMail) -> Result<(), MailError> {
        Err(MailError::Disabled)
    }
}

/// In-memory transport that records every message, for tests.
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::{Mutex, Notify};

    #[derive(Default)]
    pub struct RecordingMailer {
        sent: Mutex<Vec<OutgoingMail>>,
        fail: bool,
        gate: Option<Arc<Notify>>,
    }

    impl RecordingMailer {
        /// Records attempts but reports every delivery as failed.
        pub fn failing() -> Self {
            Self { sent: Mutex::default(), fail: true, gate: None }
        }

        /// Holds every delivery until the returned handle is notified.
        pub fn gated() -> (Self, Arc<Notify>) {
            let gate = Arc::new(Notify::new());
            (Self { sent: Mutex::default(), fail: false, gate: Some(gate.clone()) }, gate)
        }

        pub async fn sent(&self) -> Vec<OutgoingMail> {
            self.sent.lock().await.clone()
        }

        /// Poll until at least `count` messages were attempted or `within` elapses.
        pub async fn wait_for(&self, count: usize, within: Duration) -> Vec<OutgoingMail> {
            let deadline = tokio::time::Instant::now() + within;
            loop {
                let sent = self.sent().await;
                if sent.len() >= count || tokio::time::Instant::now() >= deadline {
                    return sent;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        }
    }

    #[async_trait]
    impl MailTransport for RecordingMailer {
        async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.sent.lock().await.push(mail.clone());
            if self.fail {
                return Err(MailError::Transport("550 mailbox unavailable".into()));
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smtp_config() -> MailConfig {
        MailConfig {
            host: Some("smtp.example.com".into()),
            from: "Registry <noreply@example.com>".into(),
            ..Default::default()
        }
    }

    #[test]
    fn smtp_mailer_requires_host() {
        let err = SmtpMailer::from_config(&MailConfig::default()).err();
        assert!(matches!(err, Some(MailError::Disabled)));
    }

    #[test]
    fn smtp_mailer_rejects_bad_sender() {
        let cfg = MailConfig { from: "not an address".into(), ..smtp_config() };
        assert!(matches!(SmtpMailer::from_config(&cfg).err(), Some(MailError::Address(_))));
    }

    #[test]
    fn builds_html_message_for_every_recipient() {
        let mailer = SmtpMailer::from_config(&smtp_config()).unwrap();
        let mail = OutgoingMail {
            to: vec!["a@x.com".into(), "b@x.com".into()],
            subject: "Nova empresa cadastrada: Acme".into(),
            html: "<p>hi</p>".into(),
        };
        let message = mailer.build_message(&mail).unwrap();
        let to: Vec<String> = message.envelope().to().iter().map(|a| a.to_string()).collect();
        assert_eq!(to, vec!["a@x.com", "b@x.com"]);

        let bad = OutgoingMail { to: vec!["nope".into()], ..mail };
        assert!(matches!(mailer.build_message(&bad), Err(MailError::Address(_))));
    }

    #[tokio::test]
    async fn disabled_mailer_always_fails() {
        let mail = OutgoingMail { to: vec!["a@x.com".into()], subject: "s".into(), html: "h".into() };
        assert!(matches!(DisabledMailer.send(&mail).await, Err(MailError::Disabled)));
    }
}
