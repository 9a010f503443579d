//! Notification templates and delivery history.
//!
//! Templates carry `{{placeholder}}` tokens that are substituted when a
//! notification is rendered. History records are read-only here; they are
//! produced by whatever sends the notifications.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::listing::{contains_ci, ActiveStatus, Listable};
use crate::types::{DbId, Timestamp};
use crate::validation::{optional_text, require_text, MAX_NAME_LEN, MAX_TEXT_LEN};

/// Regex pattern matching `{{ key }}` tokens. Keys may contain dots.
pub const PLACEHOLDER_PATTERN: &str = r"\{\{\s*([a-zA-Z_][a-zA-Z0-9_.]*)\s*\}\}";

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PLACEHOLDER_PATTERN).expect("valid regex"));

/// Maximum length of an SMS body.
pub const MAX_SMS_LEN: usize = 480;

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Email,
    Sms,
    Push,
}

impl Channel {
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "email" => Ok(Self::Email),
            "sms" => Ok(Self::Sms),
            "push" => Ok(Self::Push),
            _ => Err(CoreError::Validation(format!(
                "Invalid channel '{value}'. Must be one of: email, sms, push"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Sms => "sms",
            Self::Push => "push",
        }
    }

    /// Email is the only channel with a subject line.
    pub fn has_subject(self) -> bool {
        self == Self::Email
    }
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationTemplate {
    pub id: DbId,
    pub name: String,
    pub channel: Channel,
    /// Event key that fires the notification, e.g. `registration.confirmed`.
    pub trigger: String,
    pub subject: Option<String>,
    pub body: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Attributes supplied when creating a template.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateInput {
    pub name: String,
    pub channel: Channel,
    pub trigger: String,
    pub subject: Option<String>,
    pub body: String,
}

/// Partial update for a template.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplatePatch {
    pub name: Option<String>,
    pub channel: Option<Channel>,
    pub trigger: Option<String>,
    pub subject: Option<Option<String>>,
    pub body: Option<String>,
}

/// Subject and body after placeholder substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedNotification {
    pub subject: Option<String>,
    pub body: String,
    /// Placeholders that had no value and were left in place.
    pub missing: Vec<String>,
}

impl NotificationTemplate {
    pub fn new(id: DbId, input: TemplateInput, now: Timestamp) -> Result<Self, CoreError> {
        let mut template = Self {
            id,
            name: String::new(),
            channel: input.channel,
            trigger: String::new(),
            subject: None,
            body: String::new(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        template.apply(
            TemplatePatch {
                name: Some(input.name),
                channel: None,
                trigger: Some(input.trigger),
                subject: Some(input.subject),
                body: Some(input.body),
            },
            now,
        )?;
        Ok(template)
    }

    /// Merge a patch, then re-check the channel-dependent rules on the
    /// result. A failing patch leaves the template unchanged.
    pub fn apply(&mut self, patch: TemplatePatch, now: Timestamp) -> Result<(), CoreError> {
        let mut next = self.clone();
        if let Some(name) = patch.name.as_deref() {
            next.name = require_text("Template name", name, MAX_NAME_LEN)?.to_string();
        }
        if let Some(channel) = patch.channel {
            next.channel = channel;
        }
        if let Some(trigger) = patch.trigger.as_deref() {
            next.trigger = validate_trigger(trigger)?;
        }
        if let Some(subject) = patch.subject {
            next.subject = optional_text("Subject", subject.as_deref(), MAX_NAME_LEN)?;
        }
        if let Some(body) = patch.body.as_deref() {
            next.body = require_text("Template body", body, MAX_TEXT_LEN)?.to_string();
        }

        if next.channel.has_subject() {
            if next.subject.is_none() {
                return Err(CoreError::Validation(
                    "Email templates require a subject".to_string(),
                ));
            }
        } else {
            next.subject = None;
        }
        if next.channel == Channel::Sms && next.body.chars().count() > MAX_SMS_LEN {
            return Err(CoreError::Validation(format!(
                "SMS body too long: {} chars (max {MAX_SMS_LEN})",
                next.body.chars().count()
            )));
        }

        next.updated_at = now;
        *self = next;
        Ok(())
    }

    pub fn toggle_active(&mut self, now: Timestamp) {
        self.is_active = !self.is_active;
        self.updated_at = now;
    }

    /// Substitute `vars` into subject and body.
    pub fn render_preview(&self, vars: &HashMap<String, String>) -> RenderedNotification {
        let mut missing = Vec::new();
        let subject = self
            .subject
            .as_deref()
            .map(|s| render(s, vars, &mut missing));
        let body = render(&self.body, vars, &mut missing);
        RenderedNotification {
            subject,
            body,
            missing,
        }
    }

    /// Distinct placeholder keys across subject and body, in order of
    /// first appearance.
    pub fn placeholders(&self) -> Vec<String> {
        let mut keys = self.subject.as_deref().map(placeholders).unwrap_or_default();
        for key in placeholders(&self.body) {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }
}

/// Distinct `{{key}}` placeholders in `text`, in order of first appearance.
pub fn placeholders(text: &str) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for caps in PLACEHOLDER_RE.captures_iter(text) {
        let key = caps[1].to_string();
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}

/// Replace known placeholders; unknown ones stay verbatim and are
/// recorded in `missing`.
fn render(text: &str, vars: &HashMap<String, String>, missing: &mut Vec<String>) -> String {
    PLACEHOLDER_RE
        .replace_all(text, |caps: &Captures<'_>| match vars.get(&caps[1]) {
            Some(value) => value.clone(),
            None => {
                let key = caps[1].to_string();
                if !missing.contains(&key) {
                    missing.push(key);
                }
                caps[0].to_string()
            }
        })
        .into_owned()
}

/// Triggers are dotted lowercase keys such as `ticket.purchased`.
pub fn validate_trigger(trigger: &str) -> Result<String, CoreError> {
    let trigger = require_text("Trigger", trigger, MAX_NAME_LEN)?;
    let valid = trigger
        .split('.')
        .all(|part| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        });
    if !valid {
        return Err(CoreError::Validation(format!(
            "Invalid trigger '{trigger}'. Use dotted lowercase keys like 'registration.confirmed'"
        )));
    }
    Ok(trigger.to_string())
}

/// Reject a template name already used by another template
/// (case-insensitive).
pub fn ensure_unique_name<'a>(
    existing: impl IntoIterator<Item = &'a NotificationTemplate>,
    name: &str,
    exclude_id: Option<DbId>,
) -> Result<(), CoreError> {
    let wanted = name.trim().to_lowercase();
    let clash = existing
        .into_iter()
        .any(|t| Some(t.id) != exclude_id && t.name.to_lowercase() == wanted);
    if clash {
        return Err(CoreError::Conflict(format!(
            "A notification template named '{}' already exists",
            name.trim()
        )));
    }
    Ok(())
}

impl Listable for NotificationTemplate {
    type Status = ActiveStatus;
    const SORT_KEYS: &'static [&'static str] = &["name", "channel", "trigger", "updated_at"];
    const DEFAULT_SORT: &'static str = "name";

    fn parse_status(value: &str) -> Result<ActiveStatus, CoreError> {
        ActiveStatus::parse(value)
    }

    fn status(&self) -> ActiveStatus {
        ActiveStatus::from_flag(self.is_active)
    }

    fn matches_search(&self, needle: &str) -> bool {
        contains_ci(&self.name, needle)
            || contains_ci(&self.trigger, needle)
            || self.subject.as_deref().is_some_and(|s| contains_ci(s, needle))
    }

    fn compare_by(&self, other: &Self, key: &str) -> Ordering {
        match key {
            "channel" => self.channel.as_str().cmp(other.channel.as_str()),
            "trigger" => self.trigger.cmp(&other.trigger),
            "updated_at" => self.updated_at.cmp(&other.updated_at),
            _ => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
        }
    }
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Pending,
    Sent,
    Delivered,
    Failed,
}

impl DeliveryStatus {
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "pending" => Ok(Self::Pending),
            "sent" => Ok(Self::Sent),
            "delivered" => Ok(Self::Delivered),
            "failed" => Ok(Self::Failed),
            _ => Err(CoreError::Validation(format!(
                "Invalid delivery status '{value}'. Must be one of: all, pending, sent, delivered, failed"
            ))),
        }
    }
}

/// One sent (or attempted) notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub id: DbId,
    pub template_id: Option<DbId>,
    pub recipient: String,
    pub channel: Channel,
    pub subject: Option<String>,
    pub status: DeliveryStatus,
    pub sent_at: Timestamp,
    pub error: Option<String>,
}

impl Listable for NotificationRecord {
    type Status = DeliveryStatus;
    const SORT_KEYS: &'static [&'static str] = &["sent_at", "recipient", "status"];
    const DEFAULT_SORT: &'static str = "-sent_at";

    fn parse_status(value: &str) -> Result<DeliveryStatus, CoreError> {
        DeliveryStatus::parse(value)
    }

    fn status(&self) -> DeliveryStatus {
        self.status
    }

    fn matches_search(&self, needle: &str) -> bool {
        contains_ci(&self.recipient, needle)
            || self.subject.as_deref().is_some_and(|s| contains_ci(s, needle))
    }

    fn compare_by(&self, other: &Self, key: &str) -> Ordering {
        match key {
            "recipient" => self.recipient.cmp(&other.recipient),
            "status" => (self.status as u8).cmp(&(other.status as u8)),
            _ => self.sent_at.cmp(&other.sent_at),
        }
    }
}
