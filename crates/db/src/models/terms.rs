//! Terms document DTOs.

use eventdesk_core::terms::TermsPatch;
use serde::Deserialize;
use validator::Validate;

/// DTO for creating a terms document.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTerms {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 50000))]
    pub content: String,
    #[serde(default)]
    pub is_required: bool,
}

/// DTO for partially updating a terms document.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTerms {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 50000))]
    pub content: Option<String>,
    pub is_required: Option<bool>,
}

impl From<UpdateTerms> for TermsPatch {
    fn from(dto: UpdateTerms) -> Self {
        Self {
            title: dto.title,
            content: dto.content,
            is_required: dto.is_required,
        }
    }
}
