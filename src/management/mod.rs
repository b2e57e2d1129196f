mod auth;

pub use auth::Grant;
pub use auth::TokenManager;
