//! # API Module
//!
//! HTTP endpoints of the short-lived local server started by `origalbum auth`.
//!
//! - [`callback`] - Receives the OAuth redirect from Spotify and exchanges the
//!   authorization code for a user token (PKCE).
//! - [`health`] - Reports that the server is up, with name and version.
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use origalbum::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
