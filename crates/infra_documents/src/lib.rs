//! Document Infrastructure
//!
//! Renders the practice's claim and pre-authorization paperwork as
//! single-page PDF documents. Documents are generated on demand and never
//! persisted; callers either stream them back to the browser or hand them
//! to the notification dispatcher as attachments.
//!
//! # Failure policy
//!
//! A missing or unreadable x-ray never fails a render: the page carries a
//! bracketed placeholder naming the problem instead. Only structural PDF
//! failures surface as [`DocumentError`].

pub mod error;
pub mod renderer;

pub use error::DocumentError;
pub use renderer::{ClaimDocument, ClaimDocumentRenderer};
