//! Document dashboard feature.
//!
//! Documents live in an in-memory registry. "Encrypting" a document only
//! flips a flag. Each document has an owner; other users see it once it has
//! been shared with them.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/documents` | List own documents (status, search, sort, paging) |
//! | POST | `/api/documents` | Add a document |
//! | GET | `/api/documents/summary` | Counts over own documents |
//! | GET | `/api/documents/encrypted` | Own encrypted documents |
//! | GET | `/api/documents/decrypted` | Own decrypted documents |
//! | GET | `/api/documents/security-risks` | Own unencrypted Confidential/Restricted documents |
//! | GET | `/api/documents/shared-with-me` | Documents others shared with me |
//! | GET | `/api/documents/shared-by-me` | Own documents with recipients |
//! | GET/PUT/DELETE | `/api/documents/{id}` | Read, replace, remove |
//! | POST | `/api/documents/{id}/encrypt` | Set encrypted |
//! | POST | `/api/documents/{id}/decrypt` | Clear encrypted |
//! | POST | `/api/documents/{id}/share` | Append recipients |

pub mod dtos;
pub mod filter;
pub mod handlers;
pub mod models;
pub mod registry;
pub mod routes;
pub mod services;

pub use services::DocumentService;
