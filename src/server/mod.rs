//! Server-side application bootstrap and API backend.
//!
//! The backend uses Axum as the web framework and SeaORM for database
//! operations. Most of this module is the startup wiring; the example item
//! resource only exists to exercise it.
//!
//! # Bootstrap
//!
//! - **Configuration** (`config`) - Environment-based settings groups
//! - **Startup** (`startup`) - Database engine, schema creation, tracing, signals
//! - **Session** (`session`) - Session factory and request-scoped sessions
//! - **Lifecycle** (`lifecycle`) - Startup/shutdown state machine and blocking pool
//! - **Application** (`app`) - Application factory and serving
//! - **Docs** (`docs`) - API documentation routes
//!
//! # Request Handling
//!
//! - **Router** (`router`) - Business routes and their OpenAPI description
//! - **Controller Layer** (`controller/`) - HTTP request handlers and DTO conversion
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain conversion
//! - **Model Layer** (`model/`) - Domain models and parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **State** (`state`) - Shared application state

pub mod app;
pub mod config;
pub mod controller;
pub mod data;
pub mod docs;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod router;
pub mod session;
pub mod startup;
pub mod state;

#[cfg(test)]
mod test;
