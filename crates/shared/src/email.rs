//! Email service for delivering receipts to unit owners.
//!
//! Uses `lettre` for SMTP transport.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Attachment, MultiPart, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use thiserror::Error;
use tracing::debug;

use crate::config::EmailConfig;

/// Email service errors.
#[derive(Debug, Error)]
pub enum EmailError {
    /// Failed to build email message.
    #[error("Failed to build email: {0}")]
    BuildError(String),
    /// Failed to send email.
    #[error("Failed to send email: {0}")]
    SendError(String),
    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

/// A file attached to an outgoing mail (the rendered receipt PDF).
#[derive(Debug, Clone)]
pub struct OutgoingAttachment {
    /// File name shown to the recipient.
    pub file_name: String,
    /// MIME type, e.g. `application/pdf`.
    pub content_type: String,
    /// Raw file bytes.
    pub content: Vec<u8>,
}

/// Email service for sending receipt emails.
#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    /// Creates a new email service.
    #[must_use]
    pub const fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Returns the address a mail for `to_email` is actually delivered to.
    #[must_use]
    pub fn delivery_address<'a>(&'a self, to_email: &'a str) -> &'a str {
        self.config.redirect_to.as_deref().unwrap_or(to_email)
    }

    fn create_transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, EmailError> {
        let creds = Credentials::new(
            self.config.smtp_username.clone(),
            self.config.smtp_password.clone(),
        );

        Ok(
            AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.smtp_host)
                .map_err(|e| EmailError::SendError(e.to_string()))?
                .port(self.config.smtp_port)
                .credentials(creds)
                .build(),
        )
    }

    /// Builds the message without sending it.
    ///
    /// # Errors
    ///
    /// Returns an error if an address or the attachment content type is invalid.
    pub fn build_message(
        &self,
        to_email: &str,
        subject: &str,
        body: &str,
        attachment: Option<OutgoingAttachment>,
    ) -> Result<Message, EmailError> {
        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);

        let builder = Message::builder()
            .from(
                from.parse()
                    .map_err(|e| EmailError::InvalidAddress(format!("{e}")))?,
            )
            .to(self
                .delivery_address(to_email)
                .parse()
                .map_err(|e| EmailError::InvalidAddress(format!("{e}")))?)
            .subject(subject);

        let message = match attachment {
            None => builder
                .header(ContentType::TEXT_PLAIN)
                .body(body.to_string()),
            Some(file) => {
                let content_type = ContentType::parse(&file.content_type)
                    .map_err(|e| EmailError::BuildError(e.to_string()))?;
                builder.multipart(
                    MultiPart::mixed()
                        .singlepart(SinglePart::plain(body.to_string()))
                        .singlepart(Attachment::new(file.file_name).body(file.content, content_type)),
                )
            }
        };

        message.map_err(|e| EmailError::BuildError(e.to_string()))
    }

    /// Sends a receipt email, optionally with the rendered receipt attached.
    ///
    /// # Errors
    ///
    /// Returns an error if the email cannot be built or sent.
    pub async fn send_email(
        &self,
        to_email: &str,
        subject: &str,
        body: &str,
        attachment: Option<OutgoingAttachment>,
    ) -> Result<(), EmailError> {
        let email = self.build_message(to_email, subject, body, attachment)?;

        let transport = self.create_transport()?;
        transport
            .send(email)
            .await
            .map_err(|e| EmailError::SendError(e.to_string()))?;

        debug!(to = %self.delivery_address(to_email), subject, "Email delivered to relay");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(redirect_to: Option<&str>) -> EmailService {
        EmailService::new(EmailConfig {
            from_name: "Condominio Ceiba".to_string(),
            from_email: "admin@ceiba.test".to_string(),
            redirect_to: redirect_to.map(str::to_string),
            ..EmailConfig::default()
        })
    }

    #[test]
    fn test_message_goes_to_owner() {
        let message = service(None)
            .build_message("owner@ceiba.test", "Recibo", "Hola", None)
            .unwrap();
        let to: Vec<String> = message.envelope().to().iter().map(ToString::to_string).collect();
        assert_eq!(to, vec!["owner@ceiba.test".to_string()]);
    }

    #[test]
    fn test_redirect_overrides_recipient() {
        let svc = service(Some("dev@ceiba.test"));
        assert_eq!(svc.delivery_address("owner@ceiba.test"), "dev@ceiba.test");

        let message = svc
            .build_message("owner@ceiba.test", "Recibo", "Hola", None)
            .unwrap();
        let to: Vec<String> = message.envelope().to().iter().map(ToString::to_string).collect();
        assert_eq!(to, vec!["dev@ceiba.test".to_string()]);
    }

    #[test]
    fn test_invalid_recipient_rejected() {
        let result = service(None).build_message("not an address", "Recibo", "Hola", None);
        assert!(matches!(result, Err(EmailError::InvalidAddress(_))));
    }

    #[test]
    fn test_message_with_pdf_attachment() {
        let attachment = OutgoingAttachment {
            file_name: "recibo-2A-Julio-2025.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            content: b"%PDF-1.4".to_vec(),
        };
        let message = service(None)
            .build_message("owner@ceiba.test", "Recibo", "Hola", Some(attachment))
            .unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("recibo-2A-Julio-2025.pdf"));
        assert!(raw.contains("application/pdf"));
    }
}
