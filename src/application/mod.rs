//! Application layer services implementing business logic.
//!
//! Services consume repository traits and give HTTP handlers and the admin
//! CLI one entry point per operation.
//!
//! # Available Services
//!
//! - [`services::link_registry::LinkRegistry`] - Code generation, alias
//!   validation, expiry rules, resolution, statistics and deactivation
//! - [`services::visit_worker::run_visit_worker`] - Asynchronous visit recording
//!   with retries

pub mod services;
