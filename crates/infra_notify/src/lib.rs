//! Notification Infrastructure
//!
//! Wraps generated claim documents in outbound email to the practice's
//! claims inbox.
//!
//! # Delivery semantics
//!
//! Delivery is best-effort and synchronous with the request that triggered
//! it: a transport failure is logged and reported as a
//! [`DispatchOutcome::Failed`], never raised to the caller, and there is no
//! retry or durable outbox. A message lost at send time is lost.

pub mod mailer;

pub use mailer::{
    DispatchOutcome, DocumentAttachment, Notifier, NotifyConfig, NotifyError, OutboundDocument,
    RecordingNotifier, SmtpNotifier,
};
