//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with both a `Factory` struct for customization
//! and a `create_*` convenience function for quick default creation.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     let item = factory::item::create_item(&db).await?;
//!     let hidden = factory::item::ItemFactory::new(&db).active(false).build().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod helpers;
pub mod item;
