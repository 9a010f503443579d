//! Field suggestions shown next to the form canvas.
//!
//! Two lists are produced from the current buffer:
//!
//! - **existing**: library fields not yet on the form, ranked by which gap
//!   they fill (company, contact, description) and then by popularity;
//! - **new**: entries from a fixed catalog of common registration fields
//!   whose keyword does not appear in any current label.
//!
//! The ranking is a cosmetic heuristic with no ordering guarantees beyond
//! the ones tested here.

use std::collections::HashSet;

use serde::Serialize;

use crate::field::{EventField, FieldType};
use crate::form::FormField;
use crate::types::DbId;

/// Maximum number of existing-field suggestions.
pub const MAX_EXISTING_SUGGESTIONS: usize = 4;

/// Maximum number of new-field suggestions.
pub const MAX_NEW_SUGGESTIONS: usize = 3;

/// Why a library field is suggested. Variants are declared in ranking
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionReason {
    MissingCompany,
    MissingContact,
    MissingDescription,
    Popular,
}

impl SuggestionReason {
    pub fn message(self) -> &'static str {
        match self {
            Self::MissingCompany => "Capture the attendee's organisation",
            Self::MissingContact => "Add a way to contact the attendee",
            Self::MissingDescription => "Let attendees describe themselves",
            Self::Popular => "Frequently used in this event",
        }
    }
}

/// A library field proposed for reuse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExistingSuggestion {
    pub event_field_id: DbId,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub usage_count: u32,
    pub reason: SuggestionReason,
    pub message: &'static str,
}

/// A brand-new field proposed for creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSuggestion {
    pub label: &'static str,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub options: &'static [&'static str],
    pub message: &'static str,
}

/// Both suggestion lists for one buffer state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Recommendations {
    pub existing: Vec<ExistingSuggestion>,
    pub new: Vec<NewSuggestion>,
}

struct CatalogEntry {
    /// Lowercase keyword; the entry is offered only while no current label
    /// contains it.
    keyword: &'static str,
    suggestion: NewSuggestion,
}

const NEW_FIELD_CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        keyword: "linkedin",
        suggestion: NewSuggestion {
            label: "LinkedIn Profile",
            field_type: FieldType::Text,
            options: &[],
            message: "Helps attendees network after the event",
        },
    },
    CatalogEntry {
        keyword: "dietary",
        suggestion: NewSuggestion {
            label: "Dietary Requirements",
            field_type: FieldType::Select,
            options: &["None", "Vegetarian", "Vegan", "Gluten-free", "Halal", "Kosher"],
            message: "Needed for catering headcounts",
        },
    },
    CatalogEntry {
        keyword: "emergency",
        suggestion: NewSuggestion {
            label: "Emergency Contact",
            field_type: FieldType::Phone,
            options: &[],
            message: "Recommended for in-person events",
        },
    },
    CatalogEntry {
        keyword: "size",
        suggestion: NewSuggestion {
            label: "T-Shirt Size",
            field_type: FieldType::Select,
            options: &["XS", "S", "M", "L", "XL", "XXL"],
            message: "Useful when handing out merchandise",
        },
    },
    CatalogEntry {
        keyword: "hear about",
        suggestion: NewSuggestion {
            label: "How did you hear about us?",
            field_type: FieldType::Radio,
            options: &["Social media", "Email", "Friend or colleague", "Search", "Other"],
            message: "Tracks which channels drive registrations",
        },
    },
    CatalogEntry {
        keyword: "accessib",
        suggestion: NewSuggestion {
            label: "Accessibility Needs",
            field_type: FieldType::Textarea,
            options: &[],
            message: "Lets you plan venue accommodations",
        },
    },
];

/// Compute suggestions for `buffer` against the event's `library`.
pub fn recommend(buffer: &[FormField], library: &[EventField]) -> Recommendations {
    let labels: Vec<String> = buffer.iter().map(|f| f.label.to_lowercase()).collect();
    let any_label = |needle: &str| labels.iter().any(|l| l.contains(needle));

    let has_company = any_label("company");
    let has_contact = buffer.iter().any(|f| f.field_type.is_contact());
    let has_description =
        any_label("description") || buffer.iter().any(|f| f.field_type == FieldType::Textarea);

    let used: HashSet<DbId> = buffer.iter().map(|f| f.event_field_id).collect();

    let mut existing: Vec<ExistingSuggestion> = library
        .iter()
        .filter(|f| !used.contains(&f.id))
        .map(|f| {
            let label = f.label.to_lowercase();
            let reason = if !has_company && label.contains("company") {
                SuggestionReason::MissingCompany
            } else if !has_contact && f.field_type.is_contact() {
                SuggestionReason::MissingContact
            } else if !has_description
                && (f.field_type == FieldType::Textarea || label.contains("description"))
            {
                SuggestionReason::MissingDescription
            } else {
                SuggestionReason::Popular
            };
            ExistingSuggestion {
                event_field_id: f.id,
                label: f.label.clone(),
                field_type: f.field_type,
                usage_count: f.usage_count,
                reason,
                message: reason.message(),
            }
        })
        .collect();

    existing.sort_by(|a, b| {
        a.reason
            .cmp(&b.reason)
            .then_with(|| b.usage_count.cmp(&a.usage_count))
            .then_with(|| a.label.to_lowercase().cmp(&b.label.to_lowercase()))
    });
    existing.truncate(MAX_EXISTING_SUGGESTIONS);

    let library_labels: HashSet<String> = library.iter().map(|f| f.label.to_lowercase()).collect();
    let new = NEW_FIELD_CATALOG
        .iter()
        .filter(|entry| !any_label(entry.keyword))
        .filter(|entry| !library_labels.contains(&entry.suggestion.label.to_lowercase()))
        .take(MAX_NEW_SUGGESTIONS)
        .map(|entry| entry.suggestion.clone())
        .collect();

    Recommendations { existing, new }
}
