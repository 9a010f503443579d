//! In-memory backing store.

use std::collections::BTreeMap;

use eventdesk_core::error::CoreError;
use eventdesk_core::field::EventField;
use eventdesk_core::field_library::FieldLibrary;
use eventdesk_core::form::Form;
use eventdesk_core::notification::{NotificationRecord, NotificationTemplate};
use eventdesk_core::terms::TermsDocument;
use eventdesk_core::tickets::TicketType;
use eventdesk_core::types::DbId;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::models::event::Event;
use crate::seed::Seed;

/// Every table of the store.
#[derive(Debug, Default)]
pub struct StoreData {
    next_id: DbId,
    pub events: Vec<Event>,
    /// One library per event, keyed by event id.
    pub libraries: BTreeMap<DbId, FieldLibrary>,
    pub forms: Vec<Form>,
    pub terms: Vec<TermsDocument>,
    pub templates: Vec<NotificationTemplate>,
    pub history: Vec<NotificationRecord>,
    pub tickets: Vec<TicketType>,
}

impl StoreData {
    /// Allocate the next id. Ids are unique across all tables.
    pub fn next_id(&mut self) -> DbId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn event(&self, event_id: DbId) -> Result<&Event, CoreError> {
        self.events
            .iter()
            .find(|e| e.id == event_id)
            .ok_or_else(|| CoreError::not_found("Event", event_id))
    }

    pub fn library(&self, event_id: DbId) -> Result<&FieldLibrary, CoreError> {
        self.libraries
            .get(&event_id)
            .ok_or_else(|| CoreError::not_found("Event", event_id))
    }

    pub fn library_mut(&mut self, event_id: DbId) -> Result<&mut FieldLibrary, CoreError> {
        self.libraries
            .get_mut(&event_id)
            .ok_or_else(|| CoreError::not_found("Event", event_id))
    }

    pub fn form_mut(&mut self, form_id: DbId) -> Result<&mut Form, CoreError> {
        self.forms
            .iter_mut()
            .find(|f| f.id == form_id)
            .ok_or_else(|| CoreError::not_found("Form", form_id))
    }
}

/// The store itself. Share it as [`DbPool`](crate::DbPool).
#[derive(Debug)]
pub struct Store {
    data: RwLock<StoreData>,
}

impl Store {
    /// Load `seed` into a fresh store.
    ///
    /// Fails if seed records reference unknown events or reuse ids.
    pub fn new(seed: Seed) -> Result<Self, CoreError> {
        let Seed {
            events,
            fields,
            forms,
            terms,
            templates,
            history,
            tickets,
        } = seed;

        let mut ids: Vec<DbId> = events.iter().map(|e| e.id).collect();
        ids.extend(fields.iter().map(|f| f.id));
        ids.extend(forms.iter().map(|f| f.id));
        ids.extend(terms.iter().map(|t| t.id));
        ids.extend(templates.iter().map(|t| t.id));
        ids.extend(history.iter().map(|h| h.id));
        ids.extend(tickets.iter().map(|t| t.id));
        let max_id = ids.iter().copied().max().unwrap_or(0);
        ids.sort_unstable();
        if let Some(pair) = ids.windows(2).find(|w| w[0] == w[1]) {
            return Err(CoreError::Validation(format!(
                "Seed reuses id {}",
                pair[0]
            )));
        }

        let mut by_event: BTreeMap<DbId, Vec<EventField>> =
            events.iter().map(|e| (e.id, Vec::new())).collect();
        for field in fields {
            by_event
                .get_mut(&field.event_id)
                .ok_or_else(|| CoreError::not_found("Event", field.event_id))?
                .push(field);
        }
        let libraries = by_event
            .into_iter()
            .map(|(event_id, fields)| {
                FieldLibrary::with_fields(event_id, fields).map(|l| (event_id, l))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        let known_event = |id: DbId| events.iter().any(|e| e.id == id);
        let stray = forms
            .iter()
            .map(|f| f.event_id)
            .chain(terms.iter().map(|t| t.event_id))
            .chain(tickets.iter().map(|t| t.event_id))
            .find(|id| !known_event(*id));
        if let Some(event_id) = stray {
            return Err(CoreError::not_found("Event", event_id));
        }

        tracing::debug!(
            events = events.len(),
            forms = forms.len(),
            next_id = max_id + 1,
            "Store loaded from seed"
        );

        Ok(Self {
            data: RwLock::new(StoreData {
                next_id: max_id + 1,
                events,
                libraries,
                forms,
                terms,
                templates,
                history,
                tickets,
            }),
        })
    }

    /// An empty store.
    pub fn empty() -> Self {
        Self {
            data: RwLock::new(StoreData {
                next_id: 1,
                ..Default::default()
            }),
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, StoreData> {
        self.data.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, StoreData> {
        self.data.write().await
    }
}
