use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::documents::filter::{ListParams, SortKey, StatusFilter};
use crate::features::documents::models::{AccessLevel, Classification, Document};
use crate::features::documents::registry::DocumentSummary;
use crate::shared::types::PaginationQuery;
use crate::shared::validation::validate_recipients;

/// Request DTO for adding a document
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateDocumentDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    pub classification: Classification,

    #[serde(default)]
    pub encrypted: bool,

    #[validate(length(min = 1, max = 32, message = "Size must be 1-32 characters"))]
    pub size: String,

    #[validate(length(min = 1, max = 32, message = "Type must be 1-32 characters"))]
    #[serde(rename = "type")]
    pub doc_type: String,

    /// Defaults to today (YYYY-MM-DD)
    #[validate(length(min = 1, max = 32, message = "Last modified must be 1-32 characters"))]
    pub last_modified: Option<String>,
}

/// Request DTO for replacing a document's descriptive fields.
/// Owner and recipients are kept.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateDocumentDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    pub classification: Classification,

    pub encrypted: bool,

    #[validate(length(min = 1, max = 32, message = "Size must be 1-32 characters"))]
    pub size: String,

    #[validate(length(min = 1, max = 32, message = "Type must be 1-32 characters"))]
    #[serde(rename = "type")]
    pub doc_type: String,

    #[validate(length(min = 1, max = 32, message = "Last modified must be 1-32 characters"))]
    pub last_modified: Option<String>,
}

/// Request DTO for sharing a document
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ShareDocumentDto {
    #[validate(
        length(min = 1, message = "At least one recipient is required"),
        custom(function = "validate_recipients")
    )]
    pub recipients: Vec<String>,

    /// Defaults to "View Only"
    pub access_level: Option<AccessLevel>,
}

/// Query params for listing documents
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListDocumentsQuery {
    /// all | encrypted | decrypted (default: all)
    pub status: Option<StatusFilter>,

    /// Case-insensitive match on name or classification
    pub search: Option<String>,

    /// name | type | classification | status
    pub sort: Option<SortKey>,

    /// Page number (1-indexed)
    #[param(minimum = 1)]
    pub page: Option<i64>,

    /// Number of items per page (default: 10, max: 100)
    #[param(minimum = 1, maximum = 100)]
    pub page_size: Option<i64>,
}

impl ListDocumentsQuery {
    pub fn list_params(&self) -> ListParams {
        ListParams {
            status: self.status.unwrap_or_default(),
            search: self.search.clone().unwrap_or_default(),
            sort: self.sort,
        }
    }

    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// Response DTO for a document as seen by one viewer.
///
/// `shared_by`, `shared_date` and `access_level` are only filled in on
/// documents the viewer does not own.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DocumentResponseDto {
    pub id: u64,
    pub name: String,
    pub encrypted: bool,
    pub classification: Classification,
    pub shared_with: Vec<String>,
    pub size: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub last_modified: String,
    pub owner: String,
    pub security_risk: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_level: Option<AccessLevel>,
}

impl DocumentResponseDto {
    pub fn for_viewer(document: Document, viewer: &str) -> Self {
        let owned = document.is_owned_by(viewer);
        let security_risk = document.is_security_risk();
        let (shared_by, shared_date, access_level) = if owned {
            (None, None, None)
        } else {
            (
                document.shared_by.or_else(|| Some(document.owner.clone())),
                document.shared_date,
                Some(document.access_level.unwrap_or_default()),
            )
        };

        Self {
            id: document.id,
            name: document.name,
            encrypted: document.encrypted,
            classification: document.classification,
            shared_with: document.shared_with,
            size: document.size,
            doc_type: document.doc_type,
            last_modified: document.last_modified,
            owner: document.owner,
            security_risk,
            shared_by,
            shared_date,
            access_level,
        }
    }
}

/// Response DTO for document counts
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DocumentSummaryDto {
    pub total: usize,
    pub encrypted: usize,
    pub decrypted: usize,
    pub shared: usize,
    pub security_risk: usize,
}

impl From<DocumentSummary> for DocumentSummaryDto {
    fn from(s: DocumentSummary) -> Self {
        Self {
            total: s.total,
            encrypted: s.encrypted,
            decrypted: s.decrypted,
            shared: s.shared,
            security_risk: s.security_risk,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::documents::models::NewDocument;
    use serde_json::json;

    fn document(owner: &str) -> Document {
        NewDocument {
            name: "plan.docx".to_string(),
            encrypted: false,
            classification: Classification::Confidential,
            shared_with: vec!["bob@example.com".to_string()],
            size: "2.4 MB".to_string(),
            doc_type: "DOCX".to_string(),
            last_modified: "2024-02-10".to_string(),
            owner: owner.to_string(),
            shared_by: Some(owner.to_string()),
            shared_date: Some("2024-02-11".to_string()),
            access_level: Some(AccessLevel::FullAccess),
        }
        .into_document(7)
    }

    #[test]
    fn test_owner_view_hides_share_details() {
        let dto = DocumentResponseDto::for_viewer(document("ada@example.com"), "ada@example.com");
        let value = serde_json::to_value(&dto).unwrap();

        assert_eq!(value["type"], json!("DOCX"));
        assert_eq!(value["security_risk"], json!(true));
        assert!(value.get("shared_by").is_none());
        assert!(value.get("access_level").is_none());
    }

    #[test]
    fn test_recipient_view_shows_share_details() {
        let dto = DocumentResponseDto::for_viewer(document("ada@example.com"), "bob@example.com");
        let value = serde_json::to_value(&dto).unwrap();

        assert_eq!(value["shared_by"], json!("ada@example.com"));
        assert_eq!(value["shared_date"], json!("2024-02-11"));
        assert_eq!(value["access_level"], json!("Full Access"));
    }

    #[test]
    fn test_create_dto_defaults_and_validation() {
        let dto: CreateDocumentDto = serde_json::from_value(json!({
            "name": "",
            "classification": "Internal",
            "size": "1 KB",
            "type": "TXT"
        }))
        .unwrap();

        assert!(!dto.encrypted);
        assert!(dto.last_modified.is_none());
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_share_dto_rejects_bad_recipients() {
        let empty = ShareDocumentDto {
            recipients: vec![],
            access_level: None,
        };
        assert!(empty.validate().is_err());

        let bad = ShareDocumentDto {
            recipients: vec!["not-an-email".to_string()],
            access_level: None,
        };
        assert!(bad.validate().is_err());

        let good = ShareDocumentDto {
            recipients: vec!["bob@example.com".to_string()],
            access_level: Some(AccessLevel::ViewAndComment),
        };
        assert!(good.validate().is_ok());
    }

    #[test]
    fn test_list_query_defaults() {
        let query = ListDocumentsQuery::default();
        assert_eq!(query.list_params(), ListParams::default());
        assert!(!query.pagination().is_requested());
    }
}
