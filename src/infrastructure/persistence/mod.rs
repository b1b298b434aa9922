//! Storage implementations of the domain repository traits.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] / [`PgVisitRepository`] - PostgreSQL via SQLx
//! - [`MemoryLinkRepository`] / [`MemoryVisitRepository`] - In-process storage
//!   sharing a [`MemoryDatabase`], used by `STORAGE_BACKEND=memory` and tests

pub mod memory_repository;
pub mod pg_link_repository;
pub mod pg_visit_repository;

pub use memory_repository::{MemoryDatabase, MemoryLinkRepository, MemoryVisitRepository};
pub use pg_link_repository::PgLinkRepository;
pub use pg_visit_repository::PgVisitRepository;
