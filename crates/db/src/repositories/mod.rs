//! Repositories, one per aggregate.
//!
//! Each repository is a unit struct with async associated functions that
//! take the shared [`DbPool`](crate::DbPool). Lookups return `Option` and
//! let the caller decide how to report absence; domain rule violations
//! come back as [`CoreError`](eventdesk_core::error::CoreError).

pub mod event_repo;
pub mod field_repo;
pub mod form_repo;
pub mod notification_repo;
pub mod terms_repo;
pub mod ticket_repo;

pub use event_repo::EventRepo;
pub use field_repo::FieldRepo;
pub use form_repo::FormRepo;
pub use notification_repo::{NotificationHistoryRepo, NotificationTemplateRepo};
pub use terms_repo::TermsRepo;
pub use ticket_repo::TicketRepo;
