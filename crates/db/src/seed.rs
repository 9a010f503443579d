//! Seed fixtures injected into the [`Store`](crate::Store) at construction.
//!
//! `Seed::default()` is empty. `Seed::demo(now)` is the sample workspace
//! the admin console ships with for local development; its timestamps are
//! relative to `now` so the data always looks current.

use chrono::Duration;
use eventdesk_core::field::{EventField, FieldType, FieldWidth};
use eventdesk_core::form::{Form, FormField, FormStatus};
use eventdesk_core::notification::{
    Channel, DeliveryStatus, NotificationRecord, NotificationTemplate,
};
use eventdesk_core::terms::TermsDocument;
use eventdesk_core::tickets::{PricingTier, TicketType};
use eventdesk_core::types::{DbId, Timestamp};

use crate::models::event::Event;

/// Initial contents of a store.
#[derive(Debug, Clone, Default)]
pub struct Seed {
    pub events: Vec<Event>,
    pub fields: Vec<EventField>,
    pub forms: Vec<Form>,
    pub terms: Vec<TermsDocument>,
    pub templates: Vec<NotificationTemplate>,
    pub history: Vec<NotificationRecord>,
    pub tickets: Vec<TicketType>,
}

/// Event ids used by [`Seed::demo`].
pub const DEMO_EVENT_ID: DbId = 1;
pub const DEMO_SIBLING_EVENT_ID: DbId = 2;
pub const DEMO_OTHER_WORKSPACE_EVENT_ID: DbId = 3;

struct FieldSpec {
    id: DbId,
    event_id: DbId,
    field_type: FieldType,
    label: &'static str,
    placeholder: Option<&'static str>,
    options: &'static [&'static str],
    width: FieldWidth,
    required: bool,
    usage_count: u32,
    tags: &'static [&'static str],
}

const FIELD_SPECS: &[FieldSpec] = &[
    FieldSpec {
        id: 10,
        event_id: DEMO_EVENT_ID,
        field_type: FieldType::Text,
        label: "Full Name",
        placeholder: Some("Jane Doe"),
        options: &[],
        width: FieldWidth::Full,
        required: true,
        usage_count: 12,
        tags: &["contact"],
    },
    FieldSpec {
        id: 11,
        event_id: DEMO_EVENT_ID,
        field_type: FieldType::Email,
        label: "Email Address",
        placeholder: Some("jane@example.com"),
        options: &[],
        width: FieldWidth::Half,
        required: true,
        usage_count: 11,
        tags: &["contact"],
    },
    FieldSpec {
        id: 12,
        event_id: DEMO_EVENT_ID,
        field_type: FieldType::Phone,
        label: "Phone Number",
        placeholder: Some("+1 555 0100"),
        options: &[],
        width: FieldWidth::Half,
        required: false,
        usage_count: 6,
        tags: &["contact"],
    },
    FieldSpec {
        id: 13,
        event_id: DEMO_EVENT_ID,
        field_type: FieldType::Text,
        label: "Company Name",
        placeholder: None,
        options: &[],
        width: FieldWidth::Half,
        required: false,
        usage_count: 4,
        tags: &["business"],
    },
    FieldSpec {
        id: 14,
        event_id: DEMO_EVENT_ID,
        field_type: FieldType::Text,
        label: "Job Title",
        placeholder: None,
        options: &[],
        width: FieldWidth::Half,
        required: false,
        usage_count: 3,
        tags: &["business"],
    },
    FieldSpec {
        id: 15,
        event_id: DEMO_EVENT_ID,
        field_type: FieldType::Textarea,
        label: "Session Description",
        placeholder: Some("What will you talk about?"),
        options: &[],
        width: FieldWidth::Full,
        required: true,
        usage_count: 2,
        tags: &["speaker"],
    },
    FieldSpec {
        id: 16,
        event_id: DEMO_EVENT_ID,
        field_type: FieldType::Select,
        label: "Experience Level",
        placeholder: None,
        options: &["Beginner", "Intermediate", "Advanced"],
        width: FieldWidth::Half,
        required: false,
        usage_count: 1,
        tags: &[],
    },
    FieldSpec {
        id: 17,
        event_id: DEMO_EVENT_ID,
        field_type: FieldType::Heading,
        label: "About You",
        placeholder: None,
        options: &[],
        width: FieldWidth::Full,
        required: false,
        usage_count: 2,
        tags: &["layout"],
    },
    FieldSpec {
        id: 20,
        event_id: DEMO_SIBLING_EVENT_ID,
        field_type: FieldType::Select,
        label: "T-Shirt Size",
        placeholder: None,
        options: &["S", "M", "L", "XL"],
        width: FieldWidth::Half,
        required: false,
        usage_count: 9,
        tags: &["merch"],
    },
    FieldSpec {
        id: 21,
        event_id: DEMO_SIBLING_EVENT_ID,
        field_type: FieldType::Checkbox,
        label: "Workshops",
        placeholder: None,
        options: &["Figma basics", "Design systems", "Accessibility"],
        width: FieldWidth::Full,
        required: false,
        usage_count: 5,
        tags: &[],
    },
    FieldSpec {
        id: 22,
        event_id: DEMO_SIBLING_EVENT_ID,
        field_type: FieldType::Text,
        label: "Portfolio URL",
        placeholder: Some("https://"),
        options: &[],
        width: FieldWidth::Full,
        required: false,
        usage_count: 7,
        tags: &["speaker"],
    },
    FieldSpec {
        id: 30,
        event_id: DEMO_OTHER_WORKSPACE_EVENT_ID,
        field_type: FieldType::Text,
        label: "Partner ID",
        placeholder: None,
        options: &[],
        width: FieldWidth::Half,
        required: true,
        usage_count: 3,
        tags: &[],
    },
];

impl Seed {
    /// The demo workspace: two sibling events sharing workspace 1 and one
    /// unrelated event in workspace 2.
    pub fn demo(now: Timestamp) -> Self {
        let events = vec![
            Event {
                id: DEMO_EVENT_ID,
                workspace_id: 1,
                name: "TechConf 2026".into(),
                starts_at: now + Duration::days(60),
            },
            Event {
                id: DEMO_SIBLING_EVENT_ID,
                workspace_id: 1,
                name: "Design Summit 2025".into(),
                starts_at: now - Duration::days(120),
            },
            Event {
                id: DEMO_OTHER_WORKSPACE_EVENT_ID,
                workspace_id: 2,
                name: "Partner Meetup".into(),
                starts_at: now + Duration::days(14),
            },
        ];

        let fields: Vec<EventField> = FIELD_SPECS
            .iter()
            .map(|s| EventField {
                id: s.id,
                event_id: s.event_id,
                field_type: s.field_type,
                label: s.label.to_string(),
                placeholder: s.placeholder.map(str::to_string),
                description: None,
                options: s.options.iter().map(|o| o.to_string()).collect(),
                default_width: s.width,
                default_required: s.required,
                usage_count: s.usage_count,
                created_at: now - Duration::days(90),
                tags: s.tags.iter().map(|t| t.to_string()).collect(),
            })
            .collect();

        let place = |ids: &[DbId]| -> Vec<FormField> {
            ids.iter()
                .filter_map(|id| fields.iter().find(|f| f.id == *id))
                .map(FormField::from_event_field)
                .collect()
        };

        let forms = vec![
            Form {
                id: 100,
                event_id: DEMO_EVENT_ID,
                name: "Attendee Registration".into(),
                fields: place(&[17, 10, 11, 13, 14]),
                status: FormStatus::Active,
                last_modified: now - Duration::days(3),
                used_in: vec!["General Admission".into(), "VIP".into()],
            },
            Form {
                id: 101,
                event_id: DEMO_EVENT_ID,
                name: "Speaker Application".into(),
                fields: place(&[10, 11, 15, 16]),
                status: FormStatus::Draft,
                last_modified: now - Duration::days(1),
                used_in: Vec::new(),
            },
        ];

        let terms = vec![
            TermsDocument {
                id: 200,
                event_id: DEMO_EVENT_ID,
                title: "Code of Conduct".into(),
                content: "All attendees, speakers and sponsors are required to agree to the \
                          code of conduct."
                    .into(),
                version: 2,
                is_required: true,
                is_active: true,
                acceptance_count: 342,
                created_at: now - Duration::days(80),
                updated_at: now - Duration::days(10),
            },
            TermsDocument {
                id: 201,
                event_id: DEMO_EVENT_ID,
                title: "Photo & Video Consent".into(),
                content: "Sessions may be recorded and photographs taken for promotional use.".into(),
                version: 1,
                is_required: false,
                is_active: true,
                acceptance_count: 0,
                created_at: now - Duration::days(20),
                updated_at: now - Duration::days(20),
            },
        ];

        let templates = vec![
            NotificationTemplate {
                id: 300,
                name: "Registration Confirmation".into(),
                channel: Channel::Email,
                trigger: "registration.confirmed".into(),
                subject: Some("You're registered for {{event.name}}".into()),
                body: "Hi {{first_name}},\n\nThanks for registering for {{event.name}} on \
                       {{event.date}}."
                    .into(),
                is_active: true,
                created_at: now - Duration::days(60),
                updated_at: now - Duration::days(5),
            },
            NotificationTemplate {
                id: 301,
                name: "Event Reminder".into(),
                channel: Channel::Sms,
                trigger: "event.reminder_24h".into(),
                subject: None,
                body: "{{event.name}} starts tomorrow at {{event.time}}. See you there!".into(),
                is_active: true,
                created_at: now - Duration::days(60),
                updated_at: now - Duration::days(60),
            },
            NotificationTemplate {
                id: 302,
                name: "Ticket Purchased".into(),
                channel: Channel::Push,
                trigger: "ticket.purchased".into(),
                subject: None,
                body: "Your {{ticket.name}} ticket is confirmed.".into(),
                is_active: false,
                created_at: now - Duration::days(30),
                updated_at: now - Duration::days(30),
            },
        ];

        let statuses = [
            DeliveryStatus::Delivered,
            DeliveryStatus::Sent,
            DeliveryStatus::Delivered,
            DeliveryStatus::Failed,
            DeliveryStatus::Pending,
        ];
        let history = (0..25)
            .map(|i: i64| {
                let status = statuses[(i as usize) % statuses.len()];
                NotificationRecord {
                    id: 400 + i,
                    template_id: Some(300),
                    recipient: format!("attendee{:02}@example.com", i + 1),
                    channel: Channel::Email,
                    subject: Some("You're registered for TechConf 2026".into()),
                    status,
                    sent_at: now - Duration::hours(i + 1),
                    error: (status == DeliveryStatus::Failed)
                        .then(|| "Mailbox unavailable".to_string()),
                }
            })
            .collect();

        let tickets = vec![
            TicketType {
                id: 500,
                event_id: DEMO_EVENT_ID,
                name: "General Admission".into(),
                description: Some("Access to all talks and the expo hall.".into()),
                currency: "USD".into(),
                quantity: 500,
                sold: 212,
                is_active: true,
                sales_start: now - Duration::days(30),
                sales_end: Some(now + Duration::days(59)),
                tiers: vec![
                    PricingTier {
                        name: "Early bird".into(),
                        price_cents: 19_900,
                        valid_until: Some(now - Duration::days(1)),
                    },
                    PricingTier {
                        name: "Regular".into(),
                        price_cents: 29_900,
                        valid_until: None,
                    },
                ],
                created_at: now - Duration::days(45),
                updated_at: now - Duration::days(2),
            },
            TicketType {
                id: 501,
                event_id: DEMO_EVENT_ID,
                name: "Workshop Pass".into(),
                description: None,
                currency: "USD".into(),
                quantity: 40,
                sold: 0,
                is_active: false,
                sales_start: now + Duration::days(7),
                sales_end: None,
                tiers: vec![PricingTier {
                    name: "Standard".into(),
                    price_cents: 9_900,
                    valid_until: None,
                }],
                created_at: now - Duration::days(5),
                updated_at: now - Duration::days(5),
            },
        ];

        Self {
            events,
            fields,
            forms,
            terms,
            templates,
            history,
            tickets,
        }
    }
}
