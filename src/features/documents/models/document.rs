use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Sensitivity label, ordered from least to most sensitive
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
pub enum Classification {
    Public,
    Internal,
    Confidential,
    Restricted,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Public => "Public",
            Classification::Internal => "Internal",
            Classification::Confidential => "Confidential",
            Classification::Restricted => "Restricted",
        }
    }

    /// Labels for which an unencrypted document counts as a security risk.
    /// Advisory only; nothing prevents decrypting such a document.
    pub fn expects_encryption(&self) -> bool {
        *self >= Classification::Confidential
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a recipient may do with a shared document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum AccessLevel {
    #[default]
    #[serde(rename = "View Only")]
    ViewOnly,
    #[serde(rename = "View & Comment")]
    ViewAndComment,
    #[serde(rename = "Full Access")]
    FullAccess,
}

/// A tracked file. `encrypted` is a flag only; no cryptography is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: u64,
    pub name: String,
    pub encrypted: bool,
    pub classification: Classification,
    /// Recipients in share order; duplicates are kept
    pub shared_with: Vec<String>,
    pub size: String,
    pub doc_type: String,
    pub last_modified: String,
    pub owner: String,
    pub shared_by: Option<String>,
    pub shared_date: Option<String>,
    pub access_level: Option<AccessLevel>,
}

impl Document {
    pub fn is_shared(&self) -> bool {
        !self.shared_with.is_empty()
    }

    pub fn is_security_risk(&self) -> bool {
        !self.encrypted && self.classification.expects_encryption()
    }

    pub fn is_owned_by(&self, viewer: &str) -> bool {
        self.owner.eq_ignore_ascii_case(viewer)
    }

    pub fn is_shared_with(&self, viewer: &str) -> bool {
        self.shared_with
            .iter()
            .any(|recipient| recipient.eq_ignore_ascii_case(viewer))
    }
}

/// Document fields supplied at creation; the registry assigns the id
#[derive(Debug, Clone, PartialEq)]
pub struct NewDocument {
    pub name: String,
    pub encrypted: bool,
    pub classification: Classification,
    pub shared_with: Vec<String>,
    pub size: String,
    pub doc_type: String,
    pub last_modified: String,
    pub owner: String,
    pub shared_by: Option<String>,
    pub shared_date: Option<String>,
    pub access_level: Option<AccessLevel>,
}

impl NewDocument {
    pub fn into_document(self, id: u64) -> Document {
        Document {
            id,
            name: self.name,
            encrypted: self.encrypted,
            classification: self.classification,
            shared_with: self.shared_with,
            size: self.size,
            doc_type: self.doc_type,
            last_modified: self.last_modified,
            owner: self.owner,
            shared_by: self.shared_by,
            shared_date: self.shared_date,
            access_level: self.access_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_ordering() {
        assert!(Classification::Public < Classification::Internal);
        assert!(Classification::Internal < Classification::Confidential);
        assert!(Classification::Confidential < Classification::Restricted);
    }

    #[test]
    fn test_expects_encryption() {
        assert!(!Classification::Public.expects_encryption());
        assert!(!Classification::Internal.expects_encryption());
        assert!(Classification::Confidential.expects_encryption());
        assert!(Classification::Restricted.expects_encryption());
    }

    #[test]
    fn test_access_level_wire_names() {
        assert_eq!(
            serde_json::to_string(&AccessLevel::ViewAndComment).unwrap(),
            "\"View & Comment\""
        );
        let parsed: AccessLevel = serde_json::from_str("\"Full Access\"").unwrap();
        assert_eq!(parsed, AccessLevel::FullAccess);
    }
}
