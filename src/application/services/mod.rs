//! Business logic services for the application layer.

pub mod link_registry;
pub mod visit_worker;

pub use link_registry::{
    CreateLink, LinkRegistry, LinkStats, MAX_LIST_LIMIT, RegistrySettings, SharedRegistry,
};
pub use visit_worker::run_visit_worker;
