//! Notification template DTOs.

use std::collections::HashMap;

use eventdesk_core::notification::{Channel, TemplateInput, TemplatePatch};
use serde::Deserialize;
use validator::Validate;

use super::nullable;

/// DTO for creating a notification template.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTemplate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub channel: Channel,
    #[validate(length(min = 1, max = 200))]
    pub trigger: String,
    #[validate(length(max = 200))]
    pub subject: Option<String>,
    #[validate(length(min = 1, max = 50000))]
    pub body: String,
}

impl From<CreateTemplate> for TemplateInput {
    fn from(dto: CreateTemplate) -> Self {
        Self {
            name: dto.name,
            channel: dto.channel,
            trigger: dto.trigger,
            subject: dto.subject,
            body: dto.body,
        }
    }
}

/// DTO for partially updating a template. `"subject": null` clears the
/// subject; omitting it leaves it unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTemplate {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub channel: Option<Channel>,
    #[validate(length(min = 1, max = 200))]
    pub trigger: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub subject: Option<Option<String>>,
    #[validate(length(min = 1, max = 50000))]
    pub body: Option<String>,
}

impl From<UpdateTemplate> for TemplatePatch {
    fn from(dto: UpdateTemplate) -> Self {
        Self {
            name: dto.name,
            channel: dto.channel,
            trigger: dto.trigger,
            subject: dto.subject,
            body: dto.body,
        }
    }
}

/// DTO for rendering a template with sample values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreviewTemplate {
    #[serde(default)]
    pub variables: HashMap<String, String>,
}

/// Query parameters for the notification history list, on top of the
/// shared list parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryFilter {
    pub channel: Option<String>,
}
