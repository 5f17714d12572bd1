use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::documents::dtos::{
    CreateDocumentDto, DocumentResponseDto, DocumentSummaryDto, ListDocumentsQuery,
    ShareDocumentDto, UpdateDocumentDto,
};
use crate::features::documents::services::DocumentService;
use crate::shared::types::{ApiResponse, Meta};

/// List the current user's documents
///
/// Filters by status and search text, sorts, then paginates.
/// `meta.total` is the count after filtering.
#[utoipa::path(
    get,
    path = "/api/documents",
    params(ListDocumentsQuery),
    responses(
        (status = 200, description = "List of documents", body = ApiResponse<Vec<DocumentResponseDto>>),
        (status = 400, description = "Invalid query parameters"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "documents",
    security(("bearer_auth" = []))
)]
pub async fn list_documents(
    user: AuthenticatedUser,
    State(service): State<Arc<DocumentService>>,
    AppQuery(query): AppQuery<ListDocumentsQuery>,
) -> Result<Json<ApiResponse<Vec<DocumentResponseDto>>>> {
    let (documents, total) = service.list(&user.email, &query).await;
    Ok(Json(ApiResponse::success(
        Some(documents),
        None,
        Some(Meta {
            total: total as i64,
        }),
    )))
}

/// Add a document owned by the current user
#[utoipa::path(
    post,
    path = "/api/documents",
    request_body = CreateDocumentDto,
    responses(
        (status = 201, description = "Document added", body = ApiResponse<DocumentResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "documents",
    security(("bearer_auth" = []))
)]
pub async fn create_document(
    user: AuthenticatedUser,
    State(service): State<Arc<DocumentService>>,
    AppJson(dto): AppJson<CreateDocumentDto>,
) -> Result<(StatusCode, Json<ApiResponse<DocumentResponseDto>>)> {
    dto.validate()?;

    let document = service.create(&user.email, dto).await;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(document),
            Some("Document added".to_string()),
            None,
        )),
    ))
}

/// Counts over the current user's documents
#[utoipa::path(
    get,
    path = "/api/documents/summary",
    responses(
        (status = 200, description = "Document counts", body = ApiResponse<DocumentSummaryDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "documents",
    security(("bearer_auth" = []))
)]
pub async fn get_summary(
    user: AuthenticatedUser,
    State(service): State<Arc<DocumentService>>,
) -> Json<ApiResponse<DocumentSummaryDto>> {
    let summary = service.summary(&user.email).await;
    Json(ApiResponse::success(Some(summary), None, None))
}

fn list_response(documents: Vec<DocumentResponseDto>) -> Json<ApiResponse<Vec<DocumentResponseDto>>> {
    let total = documents.len() as i64;
    Json(ApiResponse::success(
        Some(documents),
        None,
        Some(Meta { total }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/documents/encrypted",
    responses(
        (status = 200, description = "Encrypted documents", body = ApiResponse<Vec<DocumentResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "documents",
    security(("bearer_auth" = []))
)]
pub async fn list_encrypted(
    user: AuthenticatedUser,
    State(service): State<Arc<DocumentService>>,
) -> Json<ApiResponse<Vec<DocumentResponseDto>>> {
    list_response(service.encrypted(&user.email).await)
}

#[utoipa::path(
    get,
    path = "/api/documents/decrypted",
    responses(
        (status = 200, description = "Decrypted documents", body = ApiResponse<Vec<DocumentResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "documents",
    security(("bearer_auth" = []))
)]
pub async fn list_decrypted(
    user: AuthenticatedUser,
    State(service): State<Arc<DocumentService>>,
) -> Json<ApiResponse<Vec<DocumentResponseDto>>> {
    list_response(service.decrypted(&user.email).await)
}

/// Unencrypted Confidential or Restricted documents
#[utoipa::path(
    get,
    path = "/api/documents/security-risks",
    responses(
        (status = 200, description = "Documents at risk", body = ApiResponse<Vec<DocumentResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "documents",
    security(("bearer_auth" = []))
)]
pub async fn list_security_risks(
    user: AuthenticatedUser,
    State(service): State<Arc<DocumentService>>,
) -> Json<ApiResponse<Vec<DocumentResponseDto>>> {
    list_response(service.security_risks(&user.email).await)
}

/// Documents other users have shared with the current user
#[utoipa::path(
    get,
    path = "/api/documents/shared-with-me",
    responses(
        (status = 200, description = "Documents shared with me", body = ApiResponse<Vec<DocumentResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "documents",
    security(("bearer_auth" = []))
)]
pub async fn list_shared_with_me(
    user: AuthenticatedUser,
    State(service): State<Arc<DocumentService>>,
) -> Json<ApiResponse<Vec<DocumentResponseDto>>> {
    list_response(service.shared_with_me(&user.email).await)
}

/// The current user's documents that have recipients
#[utoipa::path(
    get,
    path = "/api/documents/shared-by-me",
    responses(
        (status = 200, description = "Documents shared by me", body = ApiResponse<Vec<DocumentResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "documents",
    security(("bearer_auth" = []))
)]
pub async fn list_shared_by_me(
    user: AuthenticatedUser,
    State(service): State<Arc<DocumentService>>,
) -> Json<ApiResponse<Vec<DocumentResponseDto>>> {
    list_response(service.shared_by_me(&user.email).await)
}

/// Get a document by id
///
/// Visible to the owner and to recipients.
#[utoipa::path(
    get,
    path = "/api/documents/{id}",
    params(("id" = u64, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document found", body = ApiResponse<DocumentResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Document not found")
    ),
    tag = "documents",
    security(("bearer_auth" = []))
)]
pub async fn get_document(
    user: AuthenticatedUser,
    State(service): State<Arc<DocumentService>>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<DocumentResponseDto>>> {
    let document = service.get(&user.email, id).await?;
    Ok(Json(ApiResponse::success(Some(document), None, None)))
}

/// Replace a document's descriptive fields
#[utoipa::path(
    put,
    path = "/api/documents/{id}",
    params(("id" = u64, Path, description = "Document ID")),
    request_body = UpdateDocumentDto,
    responses(
        (status = 200, description = "Document updated", body = ApiResponse<DocumentResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Document not found")
    ),
    tag = "documents",
    security(("bearer_auth" = []))
)]
pub async fn update_document(
    user: AuthenticatedUser,
    State(service): State<Arc<DocumentService>>,
    Path(id): Path<u64>,
    AppJson(dto): AppJson<UpdateDocumentDto>,
) -> Result<Json<ApiResponse<DocumentResponseDto>>> {
    dto.validate()?;

    let document = service.update(&user.email, id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(document),
        Some("Document updated".to_string()),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/documents/{id}",
    params(("id" = u64, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document removed", body = ApiResponse<String>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Document not found")
    ),
    tag = "documents",
    security(("bearer_auth" = []))
)]
pub async fn delete_document(
    user: AuthenticatedUser,
    State(service): State<Arc<DocumentService>>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<String>>> {
    service.delete(&user.email, id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Document removed".to_string()),
        None,
    )))
}

/// Mark a document as encrypted
#[utoipa::path(
    post,
    path = "/api/documents/{id}/encrypt",
    params(("id" = u64, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document encrypted", body = ApiResponse<DocumentResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Document not found")
    ),
    tag = "documents",
    security(("bearer_auth" = []))
)]
pub async fn encrypt_document(
    user: AuthenticatedUser,
    State(service): State<Arc<DocumentService>>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<DocumentResponseDto>>> {
    let document = service.set_encrypted(&user.email, id, true).await?;
    Ok(Json(ApiResponse::success(Some(document), None, None)))
}

/// Mark a document as decrypted
#[utoipa::path(
    post,
    path = "/api/documents/{id}/decrypt",
    params(("id" = u64, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document decrypted", body = ApiResponse<DocumentResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Document not found")
    ),
    tag = "documents",
    security(("bearer_auth" = []))
)]
pub async fn decrypt_document(
    user: AuthenticatedUser,
    State(service): State<Arc<DocumentService>>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<DocumentResponseDto>>> {
    let document = service.set_encrypted(&user.email, id, false).await?;
    Ok(Json(ApiResponse::success(Some(document), None, None)))
}

/// Share a document with one or more recipients
///
/// Recipients are appended as given; sharing twice with the same address
/// lists it twice.
#[utoipa::path(
    post,
    path = "/api/documents/{id}/share",
    params(("id" = u64, Path, description = "Document ID")),
    request_body = ShareDocumentDto,
    responses(
        (status = 200, description = "Document shared", body = ApiResponse<DocumentResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Document not found")
    ),
    tag = "documents",
    security(("bearer_auth" = []))
)]
pub async fn share_document(
    user: AuthenticatedUser,
    State(service): State<Arc<DocumentService>>,
    Path(id): Path<u64>,
    AppJson(dto): AppJson<ShareDocumentDto>,
) -> Result<Json<ApiResponse<DocumentResponseDto>>> {
    dto.validate()?;

    let document = service.share(&user.email, id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(document),
        Some("Document shared".to_string()),
        None,
    )))
}
