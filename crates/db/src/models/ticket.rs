//! Ticket type DTOs.

use eventdesk_core::tickets::{PricingTier, TicketInput, TicketPatch};
use eventdesk_core::types::Timestamp;
use serde::Deserialize;
use validator::Validate;

use super::nullable;

/// DTO for creating a ticket type.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTicketType {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(length(equal = 3))]
    pub currency: String,
    pub quantity: u32,
    pub sales_start: Timestamp,
    pub sales_end: Option<Timestamp>,
    #[validate(length(min = 1, max = 10))]
    pub tiers: Vec<PricingTier>,
}

impl From<CreateTicketType> for TicketInput {
    fn from(dto: CreateTicketType) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            currency: dto.currency,
            quantity: dto.quantity,
            sales_start: dto.sales_start,
            sales_end: dto.sales_end,
            tiers: dto.tiers,
        }
    }
}

/// DTO for partially updating a ticket type. Nullable attributes accept
/// `null` to clear them.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTicketType {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[validate(length(equal = 3))]
    pub currency: Option<String>,
    pub quantity: Option<u32>,
    pub sales_start: Option<Timestamp>,
    #[serde(default, deserialize_with = "nullable")]
    pub sales_end: Option<Option<Timestamp>>,
    #[validate(length(min = 1, max = 10))]
    pub tiers: Option<Vec<PricingTier>>,
}

impl From<UpdateTicketType> for TicketPatch {
    fn from(dto: UpdateTicketType) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            currency: dto.currency,
            quantity: dto.quantity,
            sales_start: dto.sales_start,
            sales_end: dto.sales_end,
            tiers: dto.tiers,
        }
    }
}
