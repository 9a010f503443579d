//! Domain logic for the EventDesk admin console.
//!
//! Everything in this crate is free of I/O: repositories in `eventdesk-db`
//! own the data and call into these types to validate and mutate it.

pub mod debounce;
pub mod error;
pub mod field;
pub mod field_library;
pub mod form;
pub mod form_editor;
pub mod listing;
pub mod notification;
pub mod overlay;
pub mod recommendation;
pub mod terms;
pub mod tickets;
pub mod types;
pub mod validation;
