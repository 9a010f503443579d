//! Repository for terms documents.

use chrono::Utc;
use eventdesk_core::error::CoreError;
use eventdesk_core::listing::{self, ListQuery, Page};
use eventdesk_core::terms::TermsDocument;
use eventdesk_core::types::DbId;

use crate::models::terms::{CreateTerms, UpdateTerms};
use crate::DbPool;

/// Provides data access for terms documents.
pub struct TermsRepo;

impl TermsRepo {
    pub async fn list(
        pool: &DbPool,
        event_id: DbId,
        query: &ListQuery,
    ) -> Result<Page<TermsDocument>, CoreError> {
        let data = pool.read().await;
        data.event(event_id)?;
        let docs = data
            .terms
            .iter()
            .filter(|t| t.event_id == event_id)
            .cloned()
            .collect();
        listing::apply(docs, query)
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<TermsDocument>, CoreError> {
        let data = pool.read().await;
        Ok(data.terms.iter().find(|t| t.id == id).cloned())
    }

    pub async fn create(
        pool: &DbPool,
        event_id: DbId,
        dto: &CreateTerms,
    ) -> Result<TermsDocument, CoreError> {
        let mut data = pool.write().await;
        data.event(event_id)?;
        let id = data.next_id();
        let doc = TermsDocument::new(
            id,
            event_id,
            &dto.title,
            &dto.content,
            dto.is_required,
            Utc::now(),
        )?;
        data.terms.push(doc.clone());
        Ok(doc)
    }

    pub async fn update(
        pool: &DbPool,
        id: DbId,
        dto: UpdateTerms,
    ) -> Result<Option<TermsDocument>, CoreError> {
        let mut data = pool.write().await;
        let Some(doc) = data.terms.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        doc.apply(dto.into(), Utc::now())?;
        Ok(Some(doc.clone()))
    }

    pub async fn toggle_active(
        pool: &DbPool,
        id: DbId,
    ) -> Result<Option<TermsDocument>, CoreError> {
        let mut data = pool.write().await;
        let Some(doc) = data.terms.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        doc.toggle_active(Utc::now());
        Ok(Some(doc.clone()))
    }

    /// Delete a document. Accepted documents are refused with `Conflict`.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, CoreError> {
        let mut data = pool.write().await;
        let Some(index) = data.terms.iter().position(|t| t.id == id) else {
            return Ok(false);
        };
        data.terms[index].ensure_deletable()?;
        data.terms.remove(index);
        Ok(true)
    }
}
