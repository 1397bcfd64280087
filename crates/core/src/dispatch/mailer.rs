//! Mail delivery and document rendering ports.

use std::future::Future;

use ceiba_shared::{EmailError, EmailService, OutgoingAttachment};

use super::error::DispatchError;
use crate::period::BillingPeriod;
use crate::receipt::ReceiptView;

/// Sends one receipt mail.
pub trait ReceiptMailer: Send + Sync {
    /// Delivers a mail, optionally with the rendered receipt attached.
    fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        attachment: Option<OutgoingAttachment>,
    ) -> impl Future<Output = Result<(), EmailError>> + Send;
}

impl ReceiptMailer for EmailService {
    fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        attachment: Option<OutgoingAttachment>,
    ) -> impl Future<Output = Result<(), EmailError>> + Send {
        self.send_email(to, subject, body, attachment)
    }
}

/// Renders a receipt document (e.g. PDF) to attach to its mail.
pub trait ReceiptRenderer: Send + Sync {
    /// MIME type of rendered documents.
    fn content_type(&self) -> &str;

    /// Renders one receipt.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::Render` if the document cannot be produced.
    fn render(&self, view: &ReceiptView, period: &BillingPeriod) -> Result<Vec<u8>, DispatchError>;
}
