//! User ID
//!
//! The typed UUID lives in the kernel so every crate can name it.

pub use kernel::id::UserId;
