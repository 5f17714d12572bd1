//! Authoritative in-memory set of documents.
//!
//! The registry is a plain single-writer structure; callers that share it
//! across tasks wrap it in a lock (see `DocumentService`).

use crate::features::documents::models::{Document, NewDocument};

/// Counts over a set of documents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentSummary {
    pub total: usize,
    pub encrypted: usize,
    pub decrypted: usize,
    pub shared: usize,
    pub security_risk: usize,
}

impl DocumentSummary {
    pub fn of<'a>(documents: impl IntoIterator<Item = &'a Document>) -> Self {
        documents
            .into_iter()
            .fold(DocumentSummary::default(), |mut summary, doc| {
                summary.total += 1;
                if doc.encrypted {
                    summary.encrypted += 1;
                } else {
                    summary.decrypted += 1;
                }
                if doc.is_shared() {
                    summary.shared += 1;
                }
                if doc.is_security_risk() {
                    summary.security_risk += 1;
                }
                summary
            })
    }
}

#[derive(Debug, Default)]
pub struct DocumentRegistry {
    documents: Vec<Document>,
    /// Highest id ever issued; ids are never reused
    last_id: u64,
}

impl DocumentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry around existing records, keeping their ids
    #[allow(dead_code)]
    pub fn from_documents(documents: Vec<Document>) -> Self {
        let last_id = documents.iter().map(|d| d.id).max().unwrap_or(0);
        Self { documents, last_id }
    }

    /// Store a new document under the next id
    pub fn add(&mut self, document: NewDocument) -> Document {
        let max_existing = self.documents.iter().map(|d| d.id).max().unwrap_or(0);
        let id = max_existing.max(self.last_id) + 1;
        self.last_id = id;

        let stored = document.into_document(id);
        self.documents.push(stored.clone());
        stored
    }

    /// Replace the record with the same id. Unknown ids are ignored.
    pub fn update(&mut self, document: Document) -> bool {
        match self.documents.iter_mut().find(|d| d.id == document.id) {
            Some(slot) => {
                *slot = document;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: u64) -> Option<Document> {
        let index = self.documents.iter().position(|d| d.id == id)?;
        Some(self.documents.remove(index))
    }

    pub fn set_encrypted(&mut self, id: u64, value: bool) -> bool {
        match self.get(id).cloned() {
            Some(mut document) => {
                document.encrypted = value;
                self.update(document)
            }
            None => false,
        }
    }

    /// Append recipients in order. Repeated recipients are kept as duplicates.
    pub fn share<I, S>(&mut self, id: u64, recipients: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self.get(id).cloned() {
            Some(mut document) => {
                document
                    .shared_with
                    .extend(recipients.into_iter().map(Into::into));
                self.update(document)
            }
            None => false,
        }
    }

    pub fn get(&self, id: u64) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    #[allow(dead_code)]
    pub fn all(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn matching(&self, predicate: impl Fn(&Document) -> bool) -> Vec<&Document> {
        self.documents.iter().filter(|&d| predicate(d)).collect()
    }

    pub fn encrypted(&self) -> Vec<&Document> {
        self.matching(|d| d.encrypted)
    }

    pub fn decrypted(&self) -> Vec<&Document> {
        self.matching(|d| !d.encrypted)
    }

    /// Any document with at least one recipient, regardless of who is asking
    #[allow(dead_code)]
    pub fn shared(&self) -> Vec<&Document> {
        self.matching(Document::is_shared)
    }

    /// Documents whose recipients include `viewer`
    pub fn shared_with_me(&self, viewer: &str) -> Vec<&Document> {
        self.matching(|d| d.is_shared_with(viewer))
    }

    /// Documents owned by `viewer` that have at least one recipient
    pub fn shared_by_me(&self, viewer: &str) -> Vec<&Document> {
        self.matching(|d| d.is_owned_by(viewer) && d.is_shared())
    }

    /// Unencrypted documents labelled Confidential or Restricted
    pub fn security_risk(&self) -> Vec<&Document> {
        self.matching(Document::is_security_risk)
    }

    pub fn owned_by(&self, viewer: &str) -> Vec<&Document> {
        self.matching(|d| d.is_owned_by(viewer))
    }

    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary::of(&self.documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::documents::models::Classification;

    fn new_doc(name: &str, classification: Classification, encrypted: bool) -> NewDocument {
        NewDocument {
            name: name.to_string(),
            encrypted,
            classification,
            shared_with: Vec::new(),
            size: "1.2 MB".to_string(),
            doc_type: "PDF".to_string(),
            last_modified: "2024-01-15".to_string(),
            owner: "ada@example.com".to_string(),
            shared_by: None,
            shared_date: None,
            access_level: None,
        }
    }

    fn stored(id: u64) -> Document {
        new_doc(&format!("doc-{}.pdf", id), Classification::Internal, false).into_document(id)
    }

    #[test]
    fn test_add_to_empty_registry_starts_at_one() {
        let mut registry = DocumentRegistry::new();
        let doc = registry.add(new_doc("a.pdf", Classification::Public, false));
        assert_eq!(doc.id, 1);
        assert_eq!(registry.get(1), Some(&doc));
    }

    #[test]
    fn test_add_uses_max_existing_id_plus_one() {
        let mut registry = DocumentRegistry::from_documents(vec![stored(1), stored(3)]);
        let doc = registry.add(new_doc("next.pdf", Classification::Public, false));
        assert_eq!(doc.id, 4);
    }

    #[test]
    fn test_ids_are_not_reused_after_removal() {
        let mut registry = DocumentRegistry::new();
        registry.add(new_doc("a.pdf", Classification::Public, false));
        let b = registry.add(new_doc("b.pdf", Classification::Public, false));
        registry.remove(b.id);

        let c = registry.add(new_doc("c.pdf", Classification::Public, false));
        assert_eq!(c.id, 3);
    }

    #[test]
    fn test_set_encrypted_moves_between_views() {
        let mut registry = DocumentRegistry::new();
        let doc = registry.add(new_doc("a.pdf", Classification::Internal, false));

        assert!(registry.set_encrypted(doc.id, true));
        assert!(registry.encrypted().iter().any(|d| d.id == doc.id));
        assert!(!registry.decrypted().iter().any(|d| d.id == doc.id));
    }

    #[test]
    fn test_security_risk_follows_encryption_flag() {
        let mut registry = DocumentRegistry::new();
        let doc = registry.add(new_doc("plan.docx", Classification::Confidential, false));
        registry.add(new_doc("menu.pdf", Classification::Public, false));

        let risks = registry.security_risk();
        assert_eq!(risks.len(), 1);
        assert_eq!(risks[0].id, doc.id);

        registry.set_encrypted(doc.id, true);
        assert!(registry.security_risk().is_empty());
    }

    #[test]
    fn test_share_twice_keeps_duplicates() {
        let mut registry = DocumentRegistry::new();
        let doc = registry.add(new_doc("a.pdf", Classification::Public, false));

        registry.share(doc.id, ["X"]);
        registry.share(doc.id, ["X"]);

        assert_eq!(
            registry.get(doc.id).unwrap().shared_with,
            vec!["X".to_string(), "X".to_string()]
        );
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut registry = DocumentRegistry::from_documents(vec![stored(1), stored(2)]);
        let before = registry.all().to_vec();

        assert!(!registry.update(stored(99)));
        assert_eq!(registry.all(), before.as_slice());
    }

    #[test]
    fn test_update_replaces_by_id() {
        let mut registry = DocumentRegistry::from_documents(vec![stored(1)]);
        let mut changed = stored(1);
        changed.name = "renamed.pdf".to_string();

        assert!(registry.update(changed));
        assert_eq!(registry.get(1).unwrap().name, "renamed.pdf");
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut registry = DocumentRegistry::from_documents(vec![stored(1)]);
        assert!(registry.remove(5).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_shared_views_bind_to_viewer() {
        let mut registry = DocumentRegistry::new();
        let doc = registry.add(new_doc("a.pdf", Classification::Public, false));
        registry.add(new_doc("b.pdf", Classification::Public, false));
        registry.share(doc.id, ["bob@example.com"]);

        assert_eq!(registry.shared().len(), 1);
        assert_eq!(registry.shared_with_me("BOB@example.com").len(), 1);
        assert!(registry.shared_with_me("ada@example.com").is_empty());
        assert_eq!(registry.shared_by_me("ada@example.com").len(), 1);
        assert!(registry.shared_by_me("bob@example.com").is_empty());
    }

    #[test]
    fn test_summary_counts() {
        let mut registry = DocumentRegistry::new();
        let a = registry.add(new_doc("a.pdf", Classification::Restricted, false));
        registry.add(new_doc("b.pdf", Classification::Public, true));
        registry.share(a.id, ["bob@example.com"]);

        assert_eq!(
            registry.summary(),
            DocumentSummary {
                total: 2,
                encrypted: 1,
                decrypted: 1,
                shared: 1,
                security_risk: 1,
            }
        );
    }
}
