//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides the concrete implementation of the provider
//! repository port backed by PostgreSQL via the Diesel ORM with async
//! support through `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: the repository only translates between Diesel models
//!   and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **Strongly typed errors**: all database errors are mapped to domain
//!   persistence error types.

mod diesel_provider_repository;
mod models;
mod pool;
mod schema;

pub use diesel_provider_repository::DieselProviderRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
