/// Client side of the auth flows; the server binary itself never calls it
#[allow(dead_code)]
pub mod auth_api_client;
