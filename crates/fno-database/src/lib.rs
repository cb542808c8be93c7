//! # fno-database
//!
//! The user-store boundary ([`UserStore`]) and its two implementations:
//! PostgreSQL repositories built on sqlx, and a process-local
//! [`MemoryUserStore`] used by tests and local development.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryUserStore;
pub use repositories::{PgUserStore, RoleRepository};
pub use store::{StoreError, StoreResult, UserStore};
