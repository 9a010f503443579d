//! Terms & conditions documents attendees accept during registration.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::listing::{contains_ci, ActiveStatus, Listable};
use crate::types::{DbId, Timestamp};
use crate::validation::{require_text, MAX_NAME_LEN, MAX_TEXT_LEN};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermsDocument {
    pub id: DbId,
    pub event_id: DbId,
    pub title: String,
    pub content: String,
    /// Starts at 1 and increases whenever the content changes.
    pub version: u32,
    pub is_required: bool,
    pub is_active: bool,
    pub acceptance_count: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Partial update for a [`TermsDocument`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermsPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_required: Option<bool>,
}

impl TermsDocument {
    pub fn new(
        id: DbId,
        event_id: DbId,
        title: &str,
        content: &str,
        is_required: bool,
        now: Timestamp,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            id,
            event_id,
            title: require_text("Terms title", title, MAX_NAME_LEN)?.to_string(),
            content: require_text("Terms content", content, MAX_TEXT_LEN)?.to_string(),
            version: 1,
            is_required,
            is_active: true,
            acceptance_count: 0,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn apply(&mut self, patch: TermsPatch, now: Timestamp) -> Result<(), CoreError> {
        let title = patch
            .title
            .as_deref()
            .map(|t| require_text("Terms title", t, MAX_NAME_LEN).map(str::to_string))
            .transpose()?;
        let content = patch
            .content
            .as_deref()
            .map(|c| require_text("Terms content", c, MAX_TEXT_LEN).map(str::to_string))
            .transpose()?;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(content) = content {
            if content != self.content {
                self.content = content;
                self.version += 1;
            }
        }
        if let Some(is_required) = patch.is_required {
            self.is_required = is_required;
        }
        self.updated_at = now;
        Ok(())
    }

    pub fn toggle_active(&mut self, now: Timestamp) {
        self.is_active = !self.is_active;
        self.updated_at = now;
    }

    /// Documents that attendees have already accepted cannot be deleted;
    /// deactivate them instead.
    pub fn ensure_deletable(&self) -> Result<(), CoreError> {
        if self.acceptance_count > 0 {
            return Err(CoreError::Conflict(format!(
                "Terms '{}' have been accepted {} time(s) and cannot be deleted; deactivate them instead",
                self.title, self.acceptance_count
            )));
        }
        Ok(())
    }
}

impl Listable for TermsDocument {
    type Status = ActiveStatus;
    const SORT_KEYS: &'static [&'static str] = &["title", "version", "created_at", "updated_at"];
    const DEFAULT_SORT: &'static str = "-updated_at";

    fn parse_status(value: &str) -> Result<ActiveStatus, CoreError> {
        ActiveStatus::parse(value)
    }

    fn status(&self) -> ActiveStatus {
        ActiveStatus::from_flag(self.is_active)
    }

    fn matches_search(&self, needle: &str) -> bool {
        contains_ci(&self.title, needle) || contains_ci(&self.content, needle)
    }

    fn compare_by(&self, other: &Self, key: &str) -> Ordering {
        match key {
            "title" => self.title.to_lowercase().cmp(&other.title.to_lowercase()),
            "version" => self.version.cmp(&other.version),
            "created_at" => self.created_at.cmp(&other.created_at),
            _ => self.updated_at.cmp(&other.updated_at),
        }
    }
}
