use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::documents::handlers;
use crate::features::documents::services::DocumentService;

/// Create routes for the documents feature
///
/// Every route needs an authenticated user; mount behind the JWT middleware.
pub fn routes(service: Arc<DocumentService>) -> Router {
    Router::new()
        .route(
            "/api/documents",
            get(handlers::list_documents).post(handlers::create_document),
        )
        .route("/api/documents/summary", get(handlers::get_summary))
        .route("/api/documents/encrypted", get(handlers::list_encrypted))
        .route("/api/documents/decrypted", get(handlers::list_decrypted))
        .route(
            "/api/documents/security-risks",
            get(handlers::list_security_risks),
        )
        .route(
            "/api/documents/shared-with-me",
            get(handlers::list_shared_with_me),
        )
        .route(
            "/api/documents/shared-by-me",
            get(handlers::list_shared_by_me),
        )
        .route(
            "/api/documents/{id}",
            get(handlers::get_document)
                .put(handlers::update_document)
                .delete(handlers::delete_document),
        )
        .route(
            "/api/documents/{id}/encrypt",
            post(handlers::encrypt_document),
        )
        .route(
            "/api/documents/{id}/decrypt",
            post(handlers::decrypt_document),
        )
        .route("/api/documents/{id}/share", post(handlers::share_document))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::middleware::auth_middleware;
    use crate::features::auth::JwtValidator;
    use crate::shared::test_helpers::with_test_user;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn server_as(service: Arc<DocumentService>, email: &str) -> TestServer {
        TestServer::new(with_test_user(routes(service), email)).unwrap()
    }

    fn document_body(name: &str, classification: &str, encrypted: bool) -> Value {
        json!({
            "name": name,
            "classification": classification,
            "encrypted": encrypted,
            "size": "1.5 MB",
            "type": "PDF",
        })
    }

    async fn create(server: &TestServer, body: Value) -> u64 {
        let response = server.post("/api/documents").json(&body).await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        body["data"]["id"].as_u64().unwrap()
    }

    #[tokio::test]
    async fn test_create_and_list_with_filters() {
        let server = server_as(Arc::new(DocumentService::new()), "ada@example.com");
        create(&server, document_body("B.pdf", "Public", true)).await;
        create(&server, document_body("A.pdf", "Public", true)).await;
        create(&server, document_body("C.pdf", "Public", false)).await;

        let response = server
            .get("/api/documents")
            .add_query_param("status", "encrypted")
            .add_query_param("sort", "name")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["meta"]["total"], json!(2));
        assert_eq!(body["data"][0]["name"], json!("A.pdf"));
        assert_eq!(body["data"][1]["name"], json!("B.pdf"));
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty() {
        let server = server_as(Arc::new(DocumentService::new()), "ada@example.com");
        create(&server, document_body("a.pdf", "Public", false)).await;

        let response = server
            .get("/api/documents")
            .add_query_param("page", i64::MAX)
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["meta"]["total"], json!(1));
        assert!(body["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_sort_key_is_bad_request() {
        let server = server_as(Arc::new(DocumentService::new()), "ada@example.com");

        server
            .get("/api/documents")
            .add_query_param("sort", "size")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_validation_error() {
        let server = server_as(Arc::new(DocumentService::new()), "ada@example.com");

        let response = server
            .post("/api/documents")
            .json(&document_body("", "Public", false))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], json!(false));
    }

    #[tokio::test]
    async fn test_encrypt_moves_document_out_of_security_risks() {
        let server = server_as(Arc::new(DocumentService::new()), "ada@example.com");
        let id = create(&server, document_body("plan.docx", "Confidential", false)).await;

        let risks: Value = server.get("/api/documents/security-risks").await.json();
        assert_eq!(risks["data"].as_array().unwrap().len(), 1);

        server
            .post(&format!("/api/documents/{}/encrypt", id))
            .await
            .assert_status_ok();

        let risks: Value = server.get("/api/documents/security-risks").await.json();
        assert!(risks["data"].as_array().unwrap().is_empty());
        let summary: Value = server.get("/api/documents/summary").await.json();
        assert_eq!(summary["data"]["encrypted"], json!(1));
    }

    #[tokio::test]
    async fn test_share_and_recipient_permissions() {
        let service = Arc::new(DocumentService::new());
        let ada = server_as(service.clone(), "ada@example.com");
        let bob = server_as(service.clone(), "bob@example.com");
        let eve = server_as(service, "eve@example.com");

        let id = create(&ada, document_body("a.pdf", "Internal", false)).await;
        ada.post(&format!("/api/documents/{}/share", id))
            .json(&json!({ "recipients": ["bob@example.com"], "access_level": "View & Comment" }))
            .await
            .assert_status_ok();

        let shared: Value = bob.get("/api/documents/shared-with-me").await.json();
        assert_eq!(shared["data"][0]["shared_by"], json!("ada@example.com"));
        assert_eq!(shared["data"][0]["access_level"], json!("View & Comment"));

        bob.get(&format!("/api/documents/{}", id))
            .await
            .assert_status_ok();
        bob.delete(&format!("/api/documents/{}", id))
            .await
            .assert_status(StatusCode::FORBIDDEN);
        eve.get(&format!("/api/documents/{}", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_share_requires_valid_recipients() {
        let server = server_as(Arc::new(DocumentService::new()), "ada@example.com");
        let id = create(&server, document_body("a.pdf", "Public", false)).await;

        server
            .post(&format!("/api/documents/{}/share", id))
            .json(&json!({ "recipients": ["nobody"] }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_unknown_is_not_found() {
        let server = server_as(Arc::new(DocumentService::new()), "ada@example.com");

        server
            .delete("/api/documents/42")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_bearer_token_is_unauthorized() {
        let validator = Arc::new(JwtValidator::new("test-secret", "redaqt".to_string()));
        let app = routes(Arc::new(DocumentService::new())).route_layer(
            axum::middleware::from_fn_with_state(validator, auth_middleware),
        );
        let server = TestServer::new(app).unwrap();

        server
            .get("/api/documents")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
