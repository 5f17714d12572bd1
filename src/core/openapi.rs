use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers};
use crate::features::documents::{
    dtos as documents_dtos, filter as documents_filter, handlers as documents_handlers,
    models as documents_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth (public)
        auth_handlers::create_account,
        auth_handlers::check_routing,
        auth_handlers::complete_registration,
        auth_handlers::forgot_password,
        auth_handlers::reset_password,
        auth_handlers::login,
        // Auth (protected)
        auth_handlers::get_me,
        // Documents
        documents_handlers::list_documents,
        documents_handlers::create_document,
        documents_handlers::get_summary,
        documents_handlers::list_encrypted,
        documents_handlers::list_decrypted,
        documents_handlers::list_security_risks,
        documents_handlers::list_shared_with_me,
        documents_handlers::list_shared_by_me,
        documents_handlers::get_document,
        documents_handlers::update_document,
        documents_handlers::delete_document,
        documents_handlers::encrypt_document,
        documents_handlers::decrypt_document,
        documents_handlers::share_document,
    ),
    components(
        schemas(
            Meta,
            // Auth
            auth_dtos::CreateAccountRequestDto,
            auth_dtos::CreateAccountResponseDto,
            auth_dtos::RoutingStatusDto,
            auth_dtos::CompleteRegistrationRequestDto,
            auth_dtos::ForgotPasswordRequestDto,
            auth_dtos::ResetPasswordRequestDto,
            auth_dtos::LoginRequestDto,
            auth_dtos::AuthResponseDto,
            auth_dtos::MeResponseDto,
            ApiResponse<auth_dtos::CreateAccountResponseDto>,
            ApiResponse<auth_dtos::RoutingStatusDto>,
            ApiResponse<auth_dtos::AuthResponseDto>,
            ApiResponse<auth_dtos::MeResponseDto>,
            // Documents
            documents_models::Classification,
            documents_models::AccessLevel,
            documents_filter::StatusFilter,
            documents_filter::SortKey,
            documents_dtos::CreateDocumentDto,
            documents_dtos::UpdateDocumentDto,
            documents_dtos::ShareDocumentDto,
            documents_dtos::DocumentResponseDto,
            documents_dtos::DocumentSummaryDto,
            ApiResponse<documents_dtos::DocumentResponseDto>,
            ApiResponse<Vec<documents_dtos::DocumentResponseDto>>,
            ApiResponse<documents_dtos::DocumentSummaryDto>,
        )
    ),
    tags(
        (name = "auth", description = "Account creation, registration and login"),
        (name = "documents", description = "Document listing, encryption flags and sharing"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "RedaQt API",
        version = "0.1.0",
        description = "API documentation for RedaQt",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Overrides the OpenAPI info block from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_document_and_auth_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/api/auth/create-account"));
        assert!(paths.contains_key("/api/auth/check-routing"));
        assert!(paths.contains_key("/api/documents"));
        assert!(paths.contains_key("/api/documents/{id}/share"));
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }

    #[test]
    fn test_info_modifier() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Staging".to_string(),
            version: "9.9.9".to_string(),
            description: "staging build".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Staging");
        assert_eq!(doc.info.description.as_deref(), Some("staging build"));
    }
}
