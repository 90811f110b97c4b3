//! Shared Kernel - Domain-crossing minimal core
//!
//! The smallest vocabulary every crate in the workspace agrees on:
//! - Typed identifiers (`Id<T>`, `UserId`)
//! - The unified `AppError` / `ErrorKind` pair and its HTTP mapping
//!
//! Only things that are hard to change and mean the same thing in every
//! layer belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
