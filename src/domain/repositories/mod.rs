//! Repository trait definitions for the domain layer.
//!
//! These traits are the storage interface injected into
//! [`crate::application::services::LinkRegistry`]. Concrete implementations live
//! in `crate::infrastructure::persistence`; mocks are generated with `mockall`
//! for unit tests.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Short link storage with a unique short code
//! - [`VisitRepository`] - Append-only visit records and aggregations

pub mod link_repository;
pub mod visit_repository;

pub use link_repository::LinkRepository;
pub use visit_repository::{
    DimensionCount, SortOrder, VisitDimension, VisitQuery, VisitRepository,
};

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use visit_repository::MockVisitRepository;
