//! Repositories for notification templates and delivery history.

use chrono::Utc;
use eventdesk_core::error::CoreError;
use eventdesk_core::listing::{self, ListQuery, Page, STATUS_ALL};
use eventdesk_core::notification::{
    ensure_unique_name, Channel, NotificationRecord, NotificationTemplate, RenderedNotification,
};
use eventdesk_core::types::DbId;

use crate::models::notification::{CreateTemplate, HistoryFilter, PreviewTemplate, UpdateTemplate};
use crate::DbPool;

/// Provides data access for notification templates.
pub struct NotificationTemplateRepo;

impl NotificationTemplateRepo {
    pub async fn list(
        pool: &DbPool,
        query: &ListQuery,
    ) -> Result<Page<NotificationTemplate>, CoreError> {
        let data = pool.read().await;
        listing::apply(data.templates.clone(), query)
    }

    pub async fn find_by_id(
        pool: &DbPool,
        id: DbId,
    ) -> Result<Option<NotificationTemplate>, CoreError> {
        let data = pool.read().await;
        Ok(data.templates.iter().find(|t| t.id == id).cloned())
    }

    /// Create a template. Names are unique ignoring case.
    pub async fn create(
        pool: &DbPool,
        dto: CreateTemplate,
    ) -> Result<NotificationTemplate, CoreError> {
        let mut data = pool.write().await;
        ensure_unique_name(&data.templates, &dto.name, None)?;
        let id = data.next_id();
        let template = NotificationTemplate::new(id, dto.into(), Utc::now())?;
        data.templates.push(template.clone());
        Ok(template)
    }

    pub async fn update(
        pool: &DbPool,
        id: DbId,
        dto: UpdateTemplate,
    ) -> Result<Option<NotificationTemplate>, CoreError> {
        let mut data = pool.write().await;
        if let Some(name) = &dto.name {
            ensure_unique_name(&data.templates, name, Some(id))?;
        }
        let Some(template) = data.templates.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        template.apply(dto.into(), Utc::now())?;
        Ok(Some(template.clone()))
    }

    pub async fn toggle_active(
        pool: &DbPool,
        id: DbId,
    ) -> Result<Option<NotificationTemplate>, CoreError> {
        let mut data = pool.write().await;
        let Some(template) = data.templates.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        template.toggle_active(Utc::now());
        Ok(Some(template.clone()))
    }

    /// Delete a template. History records keep their `template_id`.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, CoreError> {
        let mut data = pool.write().await;
        let before = data.templates.len();
        data.templates.retain(|t| t.id != id);
        Ok(data.templates.len() != before)
    }

    /// Render a template with sample values without sending anything.
    pub async fn preview(
        pool: &DbPool,
        id: DbId,
        dto: &PreviewTemplate,
    ) -> Result<Option<RenderedNotification>, CoreError> {
        let data = pool.read().await;
        Ok(data
            .templates
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.render_preview(&dto.variables)))
    }
}

/// Provides read access to sent notifications.
pub struct NotificationHistoryRepo;

impl NotificationHistoryRepo {
    /// Delivery history, newest first unless `query.sort` says otherwise.
    pub async fn list(
        pool: &DbPool,
        query: &ListQuery,
        filter: &HistoryFilter,
    ) -> Result<Page<NotificationRecord>, CoreError> {
        let channel = match filter.channel.as_deref().map(str::trim) {
            None | Some("") | Some(STATUS_ALL) => None,
            Some(value) => Some(Channel::parse(value)?),
        };
        let data = pool.read().await;
        let records = data
            .history
            .iter()
            .filter(|r| channel.map_or(true, |c| r.channel == c))
            .cloned()
            .collect();
        listing::apply(records, query)
    }
}
