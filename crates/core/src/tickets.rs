//! Ticket types and their pricing tiers.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::listing::{contains_ci, Listable};
use crate::types::{DbId, Timestamp};
use crate::validation::{optional_text, require_text, MAX_NAME_LEN, MAX_TEXT_LEN};

/// Maximum number of pricing tiers per ticket type.
pub const MAX_TIERS: usize = 10;

/// A named price valid until an optional cut-off (e.g. "Early bird").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTier {
    pub name: String,
    pub price_cents: i64,
    pub valid_until: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketType {
    pub id: DbId,
    pub event_id: DbId,
    pub name: String,
    pub description: Option<String>,
    /// ISO 4217 code, uppercase.
    pub currency: String,
    pub quantity: u32,
    pub sold: u32,
    pub is_active: bool,
    pub sales_start: Timestamp,
    pub sales_end: Option<Timestamp>,
    pub tiers: Vec<PricingTier>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Attributes supplied when creating a ticket type.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketInput {
    pub name: String,
    pub description: Option<String>,
    pub currency: String,
    pub quantity: u32,
    pub sales_start: Timestamp,
    pub sales_end: Option<Timestamp>,
    pub tiers: Vec<PricingTier>,
}

/// Partial update for a ticket type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub currency: Option<String>,
    pub quantity: Option<u32>,
    pub sales_start: Option<Timestamp>,
    pub sales_end: Option<Option<Timestamp>>,
    pub tiers: Option<Vec<PricingTier>>,
}

/// Derived availability used by the status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Active,
    Inactive,
    SoldOut,
}

impl TicketStatus {
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "sold_out" => Ok(Self::SoldOut),
            _ => Err(CoreError::Validation(format!(
                "Invalid ticket status '{value}'. Must be one of: all, active, inactive, sold_out"
            ))),
        }
    }
}

impl TicketType {
    pub fn new(
        id: DbId,
        event_id: DbId,
        input: TicketInput,
        now: Timestamp,
    ) -> Result<Self, CoreError> {
        let mut ticket = Self {
            id,
            event_id,
            name: String::new(),
            description: None,
            currency: String::new(),
            quantity: input.quantity,
            sold: 0,
            is_active: true,
            sales_start: input.sales_start,
            sales_end: None,
            tiers: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        ticket.apply(
            TicketPatch {
                name: Some(input.name),
                description: Some(input.description),
                currency: Some(input.currency),
                quantity: None,
                sales_start: None,
                sales_end: Some(input.sales_end),
                tiers: Some(input.tiers),
            },
            now,
        )?;
        Ok(ticket)
    }

    /// Merge a patch and re-validate the whole record. A failing patch
    /// leaves the ticket unchanged.
    pub fn apply(&mut self, patch: TicketPatch, now: Timestamp) -> Result<(), CoreError> {
        let mut next = self.clone();
        if let Some(name) = patch.name.as_deref() {
            next.name = require_text("Ticket name", name, MAX_NAME_LEN)?.to_string();
        }
        if let Some(description) = patch.description {
            next.description = optional_text("Description", description.as_deref(), MAX_TEXT_LEN)?;
        }
        if let Some(currency) = patch.currency.as_deref() {
            next.currency = validate_currency(currency)?;
        }
        if let Some(quantity) = patch.quantity {
            next.quantity = quantity;
        }
        if let Some(start) = patch.sales_start {
            next.sales_start = start;
        }
        if let Some(end) = patch.sales_end {
            next.sales_end = end;
        }
        if let Some(tiers) = patch.tiers {
            next.tiers = tiers;
        }

        if next.quantity < next.sold {
            return Err(CoreError::Validation(format!(
                "Quantity {} is below the {} tickets already sold",
                next.quantity, next.sold
            )));
        }
        if let Some(end) = next.sales_end {
            if end <= next.sales_start {
                return Err(CoreError::Validation(
                    "Sales end must be after sales start".to_string(),
                ));
            }
        }
        validate_tiers(&mut next.tiers)?;

        next.updated_at = now;
        *self = next;
        Ok(())
    }

    pub fn toggle_active(&mut self, now: Timestamp) {
        self.is_active = !self.is_active;
        self.updated_at = now;
    }

    /// Tickets still on sale.
    pub fn available(&self) -> u32 {
        self.quantity.saturating_sub(self.sold)
    }

    pub fn ticket_status(&self) -> TicketStatus {
        if !self.is_active {
            TicketStatus::Inactive
        } else if self.available() == 0 {
            TicketStatus::SoldOut
        } else {
            TicketStatus::Active
        }
    }

    /// The first tier, in listed order, whose cut-off has not passed.
    pub fn current_tier(&self, now: Timestamp) -> Option<&PricingTier> {
        self.tiers
            .iter()
            .find(|t| t.valid_until.map_or(true, |until| until > now))
    }

    pub fn current_price(&self, now: Timestamp) -> Option<i64> {
        self.current_tier(now).map(|t| t.price_cents)
    }

    /// Whether purchases are accepted at `now`.
    pub fn on_sale(&self, now: Timestamp) -> bool {
        self.ticket_status() == TicketStatus::Active
            && now >= self.sales_start
            && self.sales_end.map_or(true, |end| now < end)
            && self.current_tier(now).is_some()
    }

    /// Ticket types with sales cannot be deleted.
    pub fn ensure_deletable(&self) -> Result<(), CoreError> {
        if self.sold > 0 {
            return Err(CoreError::Conflict(format!(
                "Ticket type '{}' has {} sold ticket(s) and cannot be deleted; deactivate it instead",
                self.name, self.sold
            )));
        }
        Ok(())
    }
}

/// Uppercase a three-letter currency code.
pub fn validate_currency(code: &str) -> Result<String, CoreError> {
    let code = code.trim();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(CoreError::Validation(format!(
            "Invalid currency '{code}'. Use a three-letter ISO 4217 code"
        )));
    }
    Ok(code.to_ascii_uppercase())
}

/// At least one tier, non-negative prices, non-blank names, and dated
/// cut-offs in ascending order ahead of any open-ended tier.
fn validate_tiers(tiers: &mut [PricingTier]) -> Result<(), CoreError> {
    if tiers.is_empty() {
        return Err(CoreError::Validation(
            "A ticket type needs at least one pricing tier".to_string(),
        ));
    }
    if tiers.len() > MAX_TIERS {
        return Err(CoreError::Validation(format!(
            "Too many pricing tiers: {} (max {MAX_TIERS})",
            tiers.len()
        )));
    }
    let mut last_cutoff: Option<Timestamp> = None;
    let mut open_ended_seen = false;
    for tier in tiers.iter_mut() {
        tier.name = require_text("Tier name", &tier.name, MAX_NAME_LEN)?.to_string();
        if tier.price_cents < 0 {
            return Err(CoreError::Validation(format!(
                "Tier '{}' has a negative price",
                tier.name
            )));
        }
        match tier.valid_until {
            Some(until) => {
                if open_ended_seen || last_cutoff.is_some_and(|prev| until <= prev) {
                    return Err(CoreError::Validation(
                        "Tier cut-offs must be in ascending order, before any open-ended tier"
                            .to_string(),
                    ));
                }
                last_cutoff = Some(until);
            }
            None => open_ended_seen = true,
        }
    }
    Ok(())
}

impl Listable for TicketType {
    type Status = TicketStatus;
    const SORT_KEYS: &'static [&'static str] = &["name", "sold", "quantity", "sales_start", "created_at"];
    const DEFAULT_SORT: &'static str = "sales_start";

    fn parse_status(value: &str) -> Result<TicketStatus, CoreError> {
        TicketStatus::parse(value)
    }

    fn status(&self) -> TicketStatus {
        self.ticket_status()
    }

    fn matches_search(&self, needle: &str) -> bool {
        contains_ci(&self.name, needle)
            || self.description.as_deref().is_some_and(|d| contains_ci(d, needle))
    }

    fn compare_by(&self, other: &Self, key: &str) -> Ordering {
        match key {
            "name" => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
            "sold" => self.sold.cmp(&other.sold),
            "quantity" => self.quantity.cmp(&other.quantity),
            "created_at" => self.created_at.cmp(&other.created_at),
            _ => self.sales_start.cmp(&other.sales_start),
        }
    }
}
