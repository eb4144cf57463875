//! API data transfer objects.
//!
//! Every DTO exposes camelCase field names and accepts the original snake_case
//! name on input through a per-field serde alias.

pub mod api;
pub mod item;
