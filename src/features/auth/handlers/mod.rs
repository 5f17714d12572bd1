pub mod auth_handler;

pub use auth_handler::{
    __path_check_routing, __path_complete_registration, __path_create_account,
    __path_forgot_password, __path_get_me, __path_login, __path_reset_password, check_routing,
    complete_registration, create_account, forgot_password, get_me, login, reset_password,
};
