//! Server-held form editor sessions.
//!
//! Opening the editor on a form creates a session holding a
//! [`FormEditor`] and the latest field suggestions. Every buffer change
//! schedules a suggestion refresh through the session's [`Debouncer`], so
//! a burst of edits costs a single recomputation once the editor goes
//! quiet. Sessions that are opened and then abandoned are swept once they
//! have been idle for the configured timeout.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use std::time::Duration;

use eventdesk_core::debounce::Debouncer;
use eventdesk_core::error::CoreError;
use eventdesk_core::form::Form;
use eventdesk_core::form_editor::FormEditor;
use eventdesk_core::recommendation::{recommend, Recommendations};
use eventdesk_core::types::DbId;
use eventdesk_db::DbPool;
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use uuid::Uuid;

/// Suggestions computed for one buffer revision.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Suggestions {
    /// Editor revision the lists were computed from.
    pub revision: u64,
    #[serde(flatten)]
    pub recommendations: Recommendations,
}

/// One open editor.
#[derive(Debug)]
pub struct EditorSession {
    pub id: Uuid,
    pub event_id: DbId,
    pub editor: FormEditor,
    suggestions: Arc<StdMutex<Suggestions>>,
    debouncer: Debouncer,
}

impl EditorSession {
    /// Latest computed suggestions.
    pub fn suggestions(&self) -> Suggestions {
        self.suggestions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether a refresh is still waiting for the editor to go quiet.
    pub fn refresh_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Schedule a suggestion refresh for the current buffer, replacing any
    /// refresh that has not run yet.
    pub fn buffer_changed(&self, pool: &DbPool) {
        let pool = Arc::clone(pool);
        let buffer = self.editor.fields().to_vec();
        let revision = self.editor.revision();
        let event_id = self.event_id;
        let session_id = self.id;
        let slot = Arc::clone(&self.suggestions);

        self.debouncer.schedule(async move {
            let data = pool.read().await;
            let library = match data.library(event_id) {
                Ok(library) => library,
                Err(e) => {
                    tracing::warn!(%session_id, event_id, error = %e, "Suggestion refresh skipped");
                    return;
                }
            };
            let recommendations = recommend(&buffer, library.fields());
            drop(data);

            tracing::debug!(
                %session_id,
                revision,
                existing = recommendations.existing.len(),
                new = recommendations.new.len(),
                "Suggestions refreshed",
            );
            *slot.lock().unwrap_or_else(PoisonError::into_inner) = Suggestions {
                revision,
                recommendations,
            };
        });
    }

    /// Drop any refresh that has not run yet.
    pub fn cancel_refresh(&self) {
        self.debouncer.cancel();
    }
}

pub type SharedSession = Arc<Mutex<EditorSession>>;

/// How often [`start_idle_sweep`] looks for abandoned sessions.
pub const IDLE_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug)]
struct SessionEntry {
    session: SharedSession,
    last_touched: Instant,
}

/// Registry of open editor sessions.
///
/// Every lookup through [`EditorSessions::get`] counts as activity. A
/// session nobody has looked up for the idle timeout is dropped by
/// [`EditorSessions::evict_idle`], the same as a discard.
#[derive(Debug)]
pub struct EditorSessions {
    delay: Duration,
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
}

impl EditorSessions {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Open an editor on `form`. The first suggestions are computed
    /// immediately.
    pub async fn open(&self, pool: &DbPool, form: &Form) -> Result<SharedSession, CoreError> {
        let mut editor = FormEditor::new();
        editor.open_editor(form);

        let recommendations = {
            let data = pool.read().await;
            recommend(editor.fields(), data.library(form.event_id)?.fields())
        };

        let id = Uuid::now_v7();
        let session = Arc::new(Mutex::new(EditorSession {
            id,
            event_id: form.event_id,
            suggestions: Arc::new(StdMutex::new(Suggestions {
                revision: editor.revision(),
                recommendations,
            })),
            editor,
            debouncer: Debouncer::new(self.delay),
        }));
        self.sessions.write().await.insert(
            id,
            SessionEntry {
                session: Arc::clone(&session),
                last_touched: Instant::now(),
            },
        );
        Ok(session)
    }

    /// Look up a session and mark it active.
    pub async fn get(&self, id: Uuid) -> Result<SharedSession, CoreError> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions
            .get_mut(&id)
            .ok_or_else(|| CoreError::not_found("EditorSession", id))?;
        entry.last_touched = Instant::now();
        Ok(Arc::clone(&entry.session))
    }

    /// Forget a session. Does not lock it, so callers may hold its guard.
    pub async fn remove(&self, id: Uuid) -> Option<SharedSession> {
        self.sessions.write().await.remove(&id).map(|e| e.session)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop every session untouched for at least `idle`, cancelling any
    /// pending suggestion refresh. Returns how many were dropped.
    pub async fn evict_idle(&self, idle: Duration) -> usize {
        let now = Instant::now();
        let evicted: Vec<(Uuid, SharedSession)> = {
            let mut sessions = self.sessions.write().await;
            let stale: Vec<Uuid> = sessions
                .iter()
                .filter(|(_, e)| now.duration_since(e.last_touched) >= idle)
                .map(|(id, _)| *id)
                .collect();
            stale
                .into_iter()
                .filter_map(|id| sessions.remove(&id).map(|e| (id, e.session)))
                .collect()
        };

        for (id, session) in &evicted {
            let session = session.lock().await;
            session.cancel_refresh();
            tracing::info!(
                session_id = %id,
                form_id = ?session.editor.form_id(),
                "Idle form editor dropped",
            );
        }
        evicted.len()
    }

    /// Drop every session. Returns how many were open.
    pub async fn close_all(&self) -> usize {
        let drained: Vec<SharedSession> = self
            .sessions
            .write()
            .await
            .drain()
            .map(|(_, e)| e.session)
            .collect();
        for session in &drained {
            session.lock().await.cancel_refresh();
        }
        drained.len()
    }
}

/// Spawn a background task that drops sessions idle for longer than
/// `idle`, checking every `every`.
///
/// The task runs until aborted through the returned handle.
pub fn start_idle_sweep(
    sessions: Arc<EditorSessions>,
    idle: Duration,
    every: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            let evicted = sessions.evict_idle(idle).await;
            if evicted > 0 {
                tracing::debug!(evicted, "Editor idle sweep");
            }
        }
    })
}
