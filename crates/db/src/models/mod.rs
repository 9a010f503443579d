//! Records owned by the store and the request DTOs that create or update
//! them.
//!
//! Domain records with behaviour live in `eventdesk_core`; this module
//! adds the store-only records and the validated request payloads.

pub mod event;
pub mod field;
pub mod form;
pub mod notification;
pub mod terms;
pub mod ticket;

use serde::{Deserialize, Deserializer};

/// Deserialize a present-but-`null` attribute as `Some(None)` so partial
/// updates can tell "clear" from "leave unchanged". Pair with
/// `#[serde(default)]`.
pub(crate) fn nullable<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}
