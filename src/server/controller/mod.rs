//! HTTP request handlers.
//!
//! Controllers extract a request-scoped session, call the data layer inside its
//! transaction, commit explicitly and convert domain models into DTOs.

pub mod health;
pub mod item;
