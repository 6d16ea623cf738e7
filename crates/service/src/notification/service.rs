use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use super::mailer::{MailTransport, OutgoingMail};
use crate::company::domain::Company;

/// Sends the "company created" email to a fixed recipient list.
pub struct NotificationService {
    mailer: Arc<dyn MailTransport>,
    recipients: Vec<String>,
}

impl NotificationService {
    /// `recipients` should already be trimmed; blank entries are dropped here too.
    pub fn new(mailer: Arc<dyn MailTransport>, recipients: Vec<String>) -> Self {
        let recipients = recipients
            .into_iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect();
        Self { mailer, recipients }
    }

    pub fn recipients(&self) -> &[String] {
        &self.recipients
    }

    /// Never fails: delivery problems are logged and swallowed.
    #[instrument(skip(self, company), fields(tax_id = %company.tax_id))]
    pub async fn notify_company_created(&self, company: &Company) {
        if self.recipients.is_empty() {
            warn!("no recipients configured in NOTIFICATION_EMAILS; skipping company notification");
            return;
        }
        debug!(recipients = ?self.recipients, "sending company notification");

        let mail = compose_company_created(company, &self.recipients);
        match self.mailer.send(&mail).await {
            Ok(()) => info!(recipients = %self.recipients.join(", "), "company notification sent"),
            Err(e) => error!(err = %e, "failed to send company notification"),
        }
    }
}

pub fn compose_company_created(company: &Company, recipients: &[String]) -> OutgoingMail {
    let address = company.address.as_deref().unwrap_or("");
    let html = format!(
        "<p>Uma nova empresa foi cadastrada:</p>\n\
         <ul>\n\
         <li><strong>Nome:</strong> {}</li>\n\
         <li><strong>CNPJ:</strong> {}</li>\n\
         <li><strong>Nome Fantasia:</strong> {}</li>\n\
         <li><strong>Endereço:</strong> {}</li>\n\
         </ul>\n",
        escape_html(&company.name),
        escape_html(&company.tax_id),
        escape_html(&company.trade_name),
        escape_html(address),
    );
    OutgoingMail {
        to: recipients.to_vec(),
        subject: format!("Nova empresa cadastrada: {}", company.name),
        html,
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::mailer::mock::RecordingMailer;
    use chrono::Utc;

    fn company() -> Company {
        let now = Utc::now();
        Company {
            id: 1,
            tax_id: "12345678901234".into(),
            name: "Acme".into(),
            trade_name: "Acme <Corp>".into(),
            address: Some("1 Main St".into()),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn sends_one_message_to_all_recipients() {
        let mailer = Arc::new(RecordingMailer::default());
        let svc = NotificationService::new(mailer.clone(), configs::parse_recipients("a@x.com, b@x.com"));
        svc.notify_company_created(&company()).await;

        let sent = mailer.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, vec!["a@x.com", "b@x.com"]);
        assert_eq!(sent[0].subject, "Nova empresa cadastrada: Acme");
        assert!(sent[0].html.contains("<strong>CNPJ:</strong> 12345678901234"));
        assert!(sent[0].html.contains("Acme &lt;Corp&gt;"));
    }

    #[tokio::test]
    async fn skips_when_no_recipients() {
        let mailer = Arc::new(RecordingMailer::default());
        let svc = NotificationService::new(mailer.clone(), vec![" ".into(), String::new()]);
        assert!(svc.recipients().is_empty());
        svc.notify_company_created(&company()).await;
        assert!(mailer.sent().await.is_empty());
    }

    #[tokio::test]
    async fn delivery_failure_is_absorbed() {
        let mailer = Arc::new(RecordingMailer::failing());
        let svc = NotificationService::new(mailer.clone(), vec!["a@x.com".into()]);
        svc.notify_company_created(&company()).await;
        assert_eq!(mailer.sent().await.len(), 1);
    }

    #[test]
    fn missing_address_renders_empty() {
        let mut c = company();
        c.address = None;
        let mail = compose_company_created(&c, &["a@x.com".to_string()]);
        assert!(mail.html.contains("<strong>Endereço:</strong> </li>"));
    }
}
