//! SeaORM entities for the API.
//!
//! Every entity follows the same base convention: the `id` attribute is an
//! auto-incrementing integer primary key persisted in a column named
//! [`PRIMARY_KEY_COLUMN`], distinct from the attribute name.

pub mod item;
pub mod prelude;

/// Column name backing the `id` primary key of every entity.
pub const PRIMARY_KEY_COLUMN: &str = "Id";
