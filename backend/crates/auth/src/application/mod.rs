//! Application Layer
//!
//! `AuthCore` and the operations it exposes.

pub mod auth_core;
pub mod config;
mod login;
mod register;
mod reset_password;
mod session;

// Re-exports
pub use auth_core::AuthCore;
pub use config::AuthConfig;
