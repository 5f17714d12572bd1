#[cfg(test)]
use crate::features::auth::model::AuthenticatedUser;

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
pub fn create_test_user(email: &str) -> AuthenticatedUser {
    AuthenticatedUser {
        account_id: email.to_string(),
        email: email.to_string(),
    }
}

/// Inject a fixed authenticated user, bypassing the JWT middleware
#[cfg(test)]
pub fn with_test_user(router: Router, email: &str) -> Router {
    let user = create_test_user(email);
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| {
            let user = user.clone();
            async move {
                request.extensions_mut().insert(user);
                let response: Response = next.run(request).await;
                response
            }
        },
    ))
}
