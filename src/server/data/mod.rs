//! Database repository layer.
//!
//! Repositories use SeaORM entity models internally and return domain models to
//! keep the data layer separate from the controllers. They are generic over the
//! connection so the same repository runs against the engine or inside a
//! [`Session`](crate::server::session::Session) transaction.

pub mod item;

#[cfg(test)]
mod test;
