use chrono::Utc;
use tokio::sync::RwLock;

use crate::core::error::{AppError, Result};
use crate::features::documents::dtos::{
    CreateDocumentDto, DocumentResponseDto, DocumentSummaryDto, ListDocumentsQuery,
    ShareDocumentDto, UpdateDocumentDto,
};
use crate::features::documents::filter;
use crate::features::documents::models::{Document, NewDocument};
use crate::features::documents::registry::{DocumentRegistry, DocumentSummary};
use crate::shared::constants::DOCUMENT_DATE_FORMAT;

/// Service binding the document registry to an authenticated viewer
pub struct DocumentService {
    registry: RwLock<DocumentRegistry>,
}

fn today() -> String {
    Utc::now().format(DOCUMENT_DATE_FORMAT).to_string()
}

fn project(documents: Vec<&Document>, viewer: &str) -> Vec<DocumentResponseDto> {
    documents
        .into_iter()
        .map(|d| DocumentResponseDto::for_viewer(d.clone(), viewer))
        .collect()
}

/// Look up a document the viewer may modify.
///
/// Documents the viewer cannot see are reported as missing; documents shared
/// with the viewer are visible but read-only.
fn owned_document(registry: &DocumentRegistry, id: u64, viewer: &str) -> Result<Document> {
    match registry.get(id) {
        Some(d) if d.is_owned_by(viewer) => Ok(d.clone()),
        Some(d) if d.is_shared_with(viewer) => Err(AppError::Forbidden(
            "Only the owner can modify this document".to_string(),
        )),
        _ => Err(AppError::NotFound(format!("Document {} not found", id))),
    }
}

impl DocumentService {
    pub fn new() -> Self {
        Self::with_registry(DocumentRegistry::new())
    }

    pub fn with_registry(registry: DocumentRegistry) -> Self {
        Self {
            registry: RwLock::new(registry),
        }
    }

    /// Viewer's own documents through the filter pipeline, paginated.
    /// Returns the page and the total after filtering.
    pub async fn list(
        &self,
        viewer: &str,
        query: &ListDocumentsQuery,
    ) -> (Vec<DocumentResponseDto>, usize) {
        let owned: Vec<Document> = {
            let registry = self.registry.read().await;
            registry.owned_by(viewer).into_iter().cloned().collect()
        };

        let filtered = filter::apply(owned, &query.list_params());
        let total = filtered.len();
        let page = query
            .pagination()
            .apply(filtered)
            .into_iter()
            .map(|d| DocumentResponseDto::for_viewer(d, viewer))
            .collect();

        (page, total)
    }

    pub async fn create(&self, viewer: &str, dto: CreateDocumentDto) -> DocumentResponseDto {
        let new_document = NewDocument {
            name: dto.name,
            encrypted: dto.encrypted,
            classification: dto.classification,
            shared_with: Vec::new(),
            size: dto.size,
            doc_type: dto.doc_type,
            last_modified: dto.last_modified.unwrap_or_else(today),
            owner: viewer.to_string(),
            shared_by: None,
            shared_date: None,
            access_level: None,
        };

        let document = {
            let mut registry = self.registry.write().await;
            let document = registry.add(new_document);
            tracing::debug!(summary = ?registry.summary(), "Document registry updated");
            document
        };

        tracing::info!(
            "Document {} '{}' added by {}",
            document.id,
            document.name,
            viewer
        );
        DocumentResponseDto::for_viewer(document, viewer)
    }

    /// A document the viewer owns or that has been shared with them
    pub async fn get(&self, viewer: &str, id: u64) -> Result<DocumentResponseDto> {
        let registry = self.registry.read().await;
        registry
            .get(id)
            .filter(|d| d.is_owned_by(viewer) || d.is_shared_with(viewer))
            .map(|d| DocumentResponseDto::for_viewer(d.clone(), viewer))
            .ok_or_else(|| AppError::NotFound(format!("Document {} not found", id)))
    }

    pub async fn update(
        &self,
        viewer: &str,
        id: u64,
        dto: UpdateDocumentDto,
    ) -> Result<DocumentResponseDto> {
        let mut registry = self.registry.write().await;
        let mut document = owned_document(&registry, id, viewer)?;

        document.name = dto.name;
        document.classification = dto.classification;
        document.encrypted = dto.encrypted;
        document.size = dto.size;
        document.doc_type = dto.doc_type;
        document.last_modified = dto.last_modified.unwrap_or_else(today);

        registry.update(document.clone());
        tracing::info!("Document {} updated by {}", id, viewer);
        Ok(DocumentResponseDto::for_viewer(document, viewer))
    }

    pub async fn delete(&self, viewer: &str, id: u64) -> Result<()> {
        let mut registry = self.registry.write().await;
        owned_document(&registry, id, viewer)?;

        registry.remove(id);
        tracing::info!(
            "Document {} removed by {} ({} remaining)",
            id,
            viewer,
            registry.len()
        );
        Ok(())
    }

    /// Flip the encryption flag. Only a flag changes; content is untouched.
    pub async fn set_encrypted(
        &self,
        viewer: &str,
        id: u64,
        value: bool,
    ) -> Result<DocumentResponseDto> {
        let mut registry = self.registry.write().await;
        owned_document(&registry, id, viewer)?;

        registry.set_encrypted(id, value);
        tracing::info!(
            "Document {} {} by {}",
            id,
            if value { "encrypted" } else { "decrypted" },
            viewer
        );

        let document = owned_document(&registry, id, viewer)?;
        Ok(DocumentResponseDto::for_viewer(document, viewer))
    }

    /// Append recipients and stamp the share date and access level
    pub async fn share(
        &self,
        viewer: &str,
        id: u64,
        dto: ShareDocumentDto,
    ) -> Result<DocumentResponseDto> {
        let mut registry = self.registry.write().await;
        let owner = owned_document(&registry, id, viewer)?.owner;

        let count = dto.recipients.len();
        registry.share(id, dto.recipients);

        let mut document = owned_document(&registry, id, viewer)?;
        document.shared_by = Some(owner);
        document.shared_date = Some(today());
        document.access_level = Some(dto.access_level.unwrap_or_default());
        registry.update(document.clone());

        tracing::info!(
            "Document {} shared with {} recipient(s) by {}",
            id,
            count,
            viewer
        );
        Ok(DocumentResponseDto::for_viewer(document, viewer))
    }

    pub async fn encrypted(&self, viewer: &str) -> Vec<DocumentResponseDto> {
        let registry = self.registry.read().await;
        let documents = registry
            .encrypted()
            .into_iter()
            .filter(|d| d.is_owned_by(viewer))
            .collect();
        project(documents, viewer)
    }

    pub async fn decrypted(&self, viewer: &str) -> Vec<DocumentResponseDto> {
        let registry = self.registry.read().await;
        let documents = registry
            .decrypted()
            .into_iter()
            .filter(|d| d.is_owned_by(viewer))
            .collect();
        project(documents, viewer)
    }

    pub async fn security_risks(&self, viewer: &str) -> Vec<DocumentResponseDto> {
        let registry = self.registry.read().await;
        let documents = registry
            .security_risk()
            .into_iter()
            .filter(|d| d.is_owned_by(viewer))
            .collect();
        project(documents, viewer)
    }

    pub async fn shared_with_me(&self, viewer: &str) -> Vec<DocumentResponseDto> {
        let registry = self.registry.read().await;
        project(registry.shared_with_me(viewer), viewer)
    }

    pub async fn shared_by_me(&self, viewer: &str) -> Vec<DocumentResponseDto> {
        let registry = self.registry.read().await;
        project(registry.shared_by_me(viewer), viewer)
    }

    /// Counts over the viewer's own documents
    pub async fn summary(&self, viewer: &str) -> DocumentSummaryDto {
        let registry = self.registry.read().await;
        DocumentSummary::of(registry.owned_by(viewer)).into()
    }
}

impl Default for DocumentService {
    fn default() -> Self {
        Self::new()
    }
}
