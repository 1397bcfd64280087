//! Sequential receipt delivery.

use std::sync::Arc;

use ceiba_shared::types::UnitId;
use ceiba_shared::{CondominiumConfig, OutgoingAttachment};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::error::DispatchError;
use super::mailer::{ReceiptMailer, ReceiptRenderer};
use crate::finalize::IssuedReceipt;
use crate::period::BillingPeriod;
use crate::property::Unit;
use crate::receipt::{ReceiptView, attachment_file_name, email_body, email_subject};

/// A receipt that could not be delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchFailure {
    /// Unit the receipt belongs to.
    pub unit_id: UnitId,
    /// Owner address, when known.
    pub recipient: Option<String>,
    /// Error code.
    pub code: &'static str,
    /// Error message.
    pub reason: String,
}

/// Outcome of a dispatch batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    /// Mails accepted by the relay.
    pub sent: usize,
    /// Receipts not delivered.
    pub failed: usize,
    /// Details of every undelivered receipt.
    pub failures: Vec<DispatchFailure>,
}

/// Mails issued receipts to unit owners.
pub struct DispatchService {
    condominium: CondominiumConfig,
    decimal_places: u32,
    renderer: Option<Arc<dyn ReceiptRenderer>>,
}

impl DispatchService {
    /// Creates a dispatch service without document attachments.
    #[must_use]
    pub fn new(condominium: CondominiumConfig, decimal_places: u32) -> Self {
        Self {
            condominium,
            decimal_places,
            renderer: None,
        }
    }

    /// Attaches a rendered document to every mail.
    #[must_use]
    pub fn with_renderer(mut self, renderer: Arc<dyn ReceiptRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Sends one mail per receipt, one after the other.
    ///
    /// A missing owner email, a render failure or a rejected send is recorded
    /// in the report and the batch moves on to the next receipt.
    pub async fn send_all<M>(
        &self,
        period: &BillingPeriod,
        receipts: &[IssuedReceipt],
        owners: &[Unit],
        mailer: &M,
    ) -> DispatchReport
    where
        M: ReceiptMailer + ?Sized,
    {
        let mut report = DispatchReport::default();

        for issued in receipts {
            let unit_id = issued.receipt.unit_id;
            let recipient = owners
                .iter()
                .find(|u| u.id == unit_id)
                .map(|u| u.owner.email.trim())
                .filter(|email| !email.is_empty());

            let result = match recipient {
                Some(to) => self.send_one(period, issued, to, mailer).await,
                None => Err(DispatchError::MissingEmail(unit_id)),
            };

            match result {
                Ok(()) => {
                    debug!(%unit_id, to = recipient.unwrap_or_default(), "Receipt sent");
                    report.sent += 1;
                }
                Err(e) => {
                    warn!(%unit_id, error = %e, "Receipt not delivered");
                    report.failed += 1;
                    report.failures.push(DispatchFailure {
                        unit_id,
                        recipient: recipient.map(str::to_string),
                        code: e.error_code(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            period_id = %period.id,
            sent = report.sent,
            failed = report.failed,
            "Receipt dispatch completed"
        );
        report
    }

    async fn send_one<M>(
        &self,
        period: &BillingPeriod,
        issued: &IssuedReceipt,
        to: &str,
        mailer: &M,
    ) -> Result<(), DispatchError>
    where
        M: ReceiptMailer + ?Sized,
    {
        let view = ReceiptView::from_receipt(&issued.receipt, self.decimal_places);
        let subject = email_subject(period);
        let body = email_body(&view, period, &self.condominium, self.decimal_places);

        let attachment = match &self.renderer {
            Some(renderer) => Some(OutgoingAttachment {
                file_name: attachment_file_name(&view.unit_label, period),
                content_type: renderer.content_type().to_string(),
                content: renderer.render(&view, period)?,
            }),
            None => None,
        };

        mailer.send(to, &subject, &body, attachment).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::Contact;
    use crate::settlement::{Receipt, UnitSnapshot};
    use ceiba_shared::EmailError;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct SentMail {
        to: String,
        subject: String,
        attachment: Option<String>,
    }

    #[derive(Default)]
    struct RecordingMailer {
        reject: Option<String>,
        sent: Mutex<Vec<SentMail>>,
    }

    impl ReceiptMailer for RecordingMailer {
        async fn send(
            &self,
            to: &str,
            subject: &str,
            _body: &str,
            attachment: Option<OutgoingAttachment>,
        ) -> Result<(), EmailError> {
            if self.reject.as_deref() == Some(to) {
                return Err(EmailError::SendError("mailbox unavailable".to_string()));
            }
            self.sent.lock().unwrap().push(SentMail {
                to: to.to_string(),
                subject: subject.to_string(),
                attachment: attachment.map(|a| a.file_name),
            });
            Ok(())
        }
    }

    struct StubRenderer {
        fail: bool,
    }

    impl ReceiptRenderer for StubRenderer {
        fn content_type(&self) -> &str {
            "application/pdf"
        }

        fn render(&self, view: &ReceiptView, _period: &BillingPeriod) -> Result<Vec<u8>, DispatchError> {
            if self.fail {
                return Err(DispatchError::Render("font missing".to_string()));
            }
            Ok(format!("%PDF {}", view.unit_label).into_bytes())
        }
    }

    fn owner(label: &str, email: &str) -> Unit {
        Unit {
            id: UnitId::new(),
            label: label.to_string(),
            owner: Contact {
                name: format!("Owner {label}"),
                email: email.to_string(),
                phone: None,
            },
            tenant: None,
            share: dec!(25),
            prior_balance: dec!(0),
            active: true,
        }
    }

    fn issued(period: &BillingPeriod, unit: &Unit) -> IssuedReceipt {
        IssuedReceipt::issue(
            Receipt {
                period_id: period.id,
                unit_id: unit.id,
                unit: UnitSnapshot {
                    label: unit.label.clone(),
                    owner_name: unit.owner.name.clone(),
                    share: unit.share,
                },
                common_breakdown: Vec::new(),
                common_share: dec!(250),
                fund_shares: Vec::new(),
                subtotal: dec!(250),
                prior_balance: dec!(0),
                total_due: dec!(250),
            },
            Utc::now(),
        )
    }

    fn period() -> BillingPeriod {
        BillingPeriod::new(7, 2025).unwrap()
    }

    #[tokio::test]
    async fn test_sends_one_mail_per_receipt() {
        let period = period();
        let owners = vec![owner("1A", "a@ceiba.test"), owner("1B", "b@ceiba.test")];
        let receipts: Vec<_> = owners.iter().map(|u| issued(&period, u)).collect();
        let mailer = RecordingMailer::default();

        let report = DispatchService::new(CondominiumConfig::default(), 2)
            .send_all(&period, &receipts, &owners, &mailer)
            .await;

        assert_eq!(report.sent, 2);
        assert_eq!(report.failed, 0);
        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent[0].to, "a@ceiba.test");
        assert_eq!(sent[0].subject, "Recibo de Condominio: Julio 2025");
        assert_eq!(sent[0].attachment, None);
    }

    #[tokio::test]
    async fn test_failures_do_not_abort_batch() {
        let period = period();
        let owners = vec![
            owner("1A", "a@ceiba.test"),
            owner("1B", "   "),
            owner("1C", "bounce@ceiba.test"),
            owner("1D", "d@ceiba.test"),
        ];
        let mut receipts: Vec<_> = owners.iter().map(|u| issued(&period, u)).collect();
        let orphan = owner("9Z", "z@ceiba.test");
        receipts.push(issued(&period, &orphan));

        let mailer = RecordingMailer {
            reject: Some("bounce@ceiba.test".to_string()),
            ..RecordingMailer::default()
        };

        let report = DispatchService::new(CondominiumConfig::default(), 2)
            .send_all(&period, &receipts, &owners, &mailer)
            .await;

        assert_eq!(report.sent, 2);
        assert_eq!(report.failed, 3);
        let codes: Vec<&str> = report.failures.iter().map(|f| f.code).collect();
        assert_eq!(codes, vec!["MISSING_EMAIL", "EMAIL_FAILED", "MISSING_EMAIL"]);
        assert_eq!(report.failures[1].recipient.as_deref(), Some("bounce@ceiba.test"));
        assert_eq!(report.failures[2].unit_id, orphan.id);
    }

    #[tokio::test]
    async fn test_rendered_document_is_attached() {
        let period = period();
        let owners = vec![owner("2A", "a@ceiba.test")];
        let receipts = vec![issued(&period, &owners[0])];
        let mailer = RecordingMailer::default();

        let report = DispatchService::new(CondominiumConfig::default(), 2)
            .with_renderer(Arc::new(StubRenderer { fail: false }))
            .send_all(&period, &receipts, &owners, &mailer)
            .await;

        assert_eq!(report.sent, 1);
        assert_eq!(
            mailer.sent.lock().unwrap()[0].attachment.as_deref(),
            Some("recibo-2A-Julio-2025.pdf")
        );
    }

    #[tokio::test]
    async fn test_render_failure_is_counted() {
        let period = period();
        let owners = vec![owner("2A", "a@ceiba.test")];
        let receipts = vec![issued(&period, &owners[0])];
        let mailer = RecordingMailer::default();

        let report = DispatchService::new(CondominiumConfig::default(), 2)
            .with_renderer(Arc::new(StubRenderer { fail: true }))
            .send_all(&period, &receipts, &owners, &mailer)
            .await;

        assert_eq!(report.failed, 1);
        assert_eq!(report.failures[0].code, "RENDER_FAILED");
        assert!(mailer.sent.lock().unwrap().is_empty());
    }
}
