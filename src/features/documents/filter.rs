//! Status filter, search and sort applied to document lists.
//!
//! Works on owned copies so the registry is never touched.

use serde::Deserialize;
use utoipa::ToSchema;

use crate::features::documents::models::Document;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Encrypted,
    Decrypted,
}

impl StatusFilter {
    fn accepts(&self, document: &Document) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Encrypted => document.encrypted,
            StatusFilter::Decrypted => !document.encrypted,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Name,
    Type,
    Classification,
    /// Encrypted documents first
    Status,
}

/// View parameters of a document list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub status: StatusFilter,
    pub search: String,
    pub sort: Option<SortKey>,
}

fn matches_search(document: &Document, needle: &str) -> bool {
    document.name.to_lowercase().contains(needle)
        || document
            .classification
            .as_str()
            .to_lowercase()
            .contains(needle)
}

/// Filter by status, then by search text, then sort.
///
/// Sorting is stable, so documents comparing equal keep their input order,
/// and without a sort key the input order is kept entirely.
pub fn apply(documents: Vec<Document>, params: &ListParams) -> Vec<Document> {
    let needle = params.search.to_lowercase();

    let mut result: Vec<Document> = documents
        .into_iter()
        .filter(|d| params.status.accepts(d))
        .filter(|d| needle.is_empty() || matches_search(d, &needle))
        .collect();

    match params.sort {
        Some(SortKey::Name) => result.sort_by(|a, b| a.name.cmp(&b.name)),
        Some(SortKey::Type) => result.sort_by(|a, b| a.doc_type.cmp(&b.doc_type)),
        Some(SortKey::Classification) => result.sort_by(|a, b| {
            a.classification
                .as_str()
                .cmp(b.classification.as_str())
        }),
        Some(SortKey::Status) => result.sort_by(|a, b| b.encrypted.cmp(&a.encrypted)),
        None => {}
    }

    result
}
