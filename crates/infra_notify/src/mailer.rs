//! Outbound email dispatch

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::Deserialize;
use std::sync::Mutex;
use thiserror::Error;
use tracing::{info, warn};

use domain_claims::DocumentKind;

/// SMTP and addressing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NotifyConfig {
    /// SMTP relay host
    pub smtp_host: String,
    /// SMTP username
    pub smtp_username: String,
    /// SMTP password
    pub smtp_password: String,
    /// From address on outbound mail
    pub from_address: String,
    /// The fixed claims-inbox recipient for all generated documents
    pub claims_inbox: String,
}

/// A rendered document attached to an outbound message
#[derive(Debug, Clone)]
pub struct DocumentAttachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// An outbound message, optionally carrying a rendered document
#[derive(Debug, Clone)]
pub struct OutboundDocument {
    pub subject: String,
    pub body: String,
    pub attachment: Option<DocumentAttachment>,
}

impl OutboundDocument {
    /// Builds the standard message for a rendered claim document
    pub fn for_document(kind: DocumentKind, pdf_bytes: Vec<u8>) -> Self {
        let subject = match kind {
            DocumentKind::CrownClaim => "New Crown Claim Submission",
            DocumentKind::SrpPreAuth => "SRP Pre-Authorization Request",
            DocumentKind::OcclusalGuardPreAuth => "Occlusal Guard Pre-Authorization Request",
        };
        Self {
            subject: subject.to_string(),
            body: format!(
                "Please find the attached document: {}.",
                kind.title()
            ),
            attachment: Some(DocumentAttachment {
                file_name: kind.attachment_name().to_string(),
                bytes: pdf_bytes,
            }),
        }
    }

    /// Builds the body-only occlusal-guard delivery note
    pub fn occlusal_guard_note(note: String) -> Self {
        Self {
            subject: "Occlusal Guard Delivery Note".to_string(),
            body: note,
            attachment: None,
        }
    }
}

/// Result of a dispatch attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent { recipient: String },
    Failed { reason: String },
}

impl DispatchOutcome {
    /// Human-readable status line shown to clinic staff
    pub fn describe(&self) -> String {
        match self {
            DispatchOutcome::Sent { recipient } => {
                format!("Email sent successfully to {recipient}.")
            }
            DispatchOutcome::Failed { reason } => format!("Failed to send email: {reason}"),
        }
    }

    pub fn is_sent(&self) -> bool {
        matches!(self, DispatchOutcome::Sent { .. })
    }
}

/// Errors raised while constructing the notifier or a message
///
/// These surface at startup (bad configuration) or are folded into a
/// [`DispatchOutcome::Failed`]; they never abort a request.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("SMTP transport setup failed: {0}")]
    TransportSetup(String),

    #[error("Message assembly failed: {0}")]
    MessageAssembly(String),
}

/// Port for dispatching outbound documents
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &OutboundDocument) -> DispatchOutcome;
}

/// SMTP-backed notifier
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    recipient: Mailbox,
}

impl SmtpNotifier {
    /// Builds the transport from configuration
    ///
    /// Address parse and relay setup failures surface here so a
    /// misconfigured deployment fails at startup, not at first claim.
    pub fn new(config: &NotifyConfig) -> Result<Self, NotifyError> {
        let from: Mailbox = config
            .from_address
            .parse()
            .map_err(|e| NotifyError::InvalidAddress(format!("from address: {e}")))?;
        let recipient: Mailbox = config
            .claims_inbox
            .parse()
            .map_err(|e| NotifyError::InvalidAddress(format!("claims inbox: {e}")))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| NotifyError::TransportSetup(e.to_string()))?
            .credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from,
            recipient,
        })
    }

    fn build_message(&self, message: &OutboundDocument) -> Result<Message, NotifyError> {
        let builder = Message::builder()
            .from(self.from.clone())
            .to(self.recipient.clone())
            .subject(&message.subject);

        let result = match &message.attachment {
            Some(attachment) => {
                let content_type = ContentType::parse("application/pdf")
                    .map_err(|e| NotifyError::MessageAssembly(e.to_string()))?;
                builder.multipart(
                    MultiPart::mixed()
                        .singlepart(SinglePart::plain(message.body.clone()))
                        .singlepart(
                            Attachment::new(attachment.file_name.clone())
                                .body(attachment.bytes.clone(), content_type),
                        ),
                )
            }
            None => builder.body(message.body.clone()),
        };

        result.map_err(|e| NotifyError::MessageAssembly(e.to_string()))
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, message: &OutboundDocument) -> DispatchOutcome {
        let email = match self.build_message(message) {
            Ok(email) => email,
            Err(e) => {
                warn!(subject = %message.subject, error = %e, "notification not sent");
                return DispatchOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };

        match self.transport.send(email).await {
            Ok(_) => {
                info!(subject = %message.subject, recipient = %self.recipient, "notification sent");
                DispatchOutcome::Sent {
                    recipient: self.recipient.to_string(),
                }
            }
            Err(e) => {
                warn!(subject = %message.subject, error = %e, "notification transport failed");
                DispatchOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// Test notifier that records every message and always reports success
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<OutboundDocument>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages dispatched so far
    pub fn sent(&self) -> Vec<OutboundDocument> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, message: &OutboundDocument) -> DispatchOutcome {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(message.clone());
        }
        DispatchOutcome::Sent {
            recipient: "recorded@localhost".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_describe_matches_staff_facing_strings() {
        let sent = DispatchOutcome::Sent {
            recipient: "claims@practice.example".to_string(),
        };
        assert_eq!(
            sent.describe(),
            "Email sent successfully to claims@practice.example."
        );

        let failed = DispatchOutcome::Failed {
            reason: "connection refused".to_string(),
        };
        assert!(failed.describe().starts_with("Failed to send email:"));
    }

    #[test]
    fn document_message_names_the_procedure_kind() {
        let message = OutboundDocument::for_document(DocumentKind::CrownClaim, vec![1, 2, 3]);
        assert_eq!(message.subject, "New Crown Claim Submission");
        let attachment = message.attachment.unwrap();
        assert_eq!(attachment.file_name, "crown_claim.pdf");
    }

    #[tokio::test]
    async fn recording_notifier_captures_messages() {
        let notifier = RecordingNotifier::new();
        let outcome = notifier
            .notify(&OutboundDocument::occlusal_guard_note("note".to_string()))
            .await;
        assert!(outcome.is_sent());
        assert_eq!(notifier.sent().len(), 1);
    }
}
