mod validator;

pub mod clients;
pub mod dtos;
pub mod handlers;
pub mod mailer;
pub mod model;
pub mod routes;
pub mod services;
pub mod store;

pub use validator::JwtValidator;
