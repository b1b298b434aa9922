//! Domain layer containing business entities and storage contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Short links and visit records
//! - [`repositories`] - Storage interface implemented by the infrastructure layer
//! - [`clock`] - Injectable time source
//! - [`visit_event`] - Redirect metadata handed to the background visit worker
//!
//! # Visit Recording Flow
//!
//! 1. Redirect handler resolves the code through the registry
//! 2. A [`visit_event::VisitEvent`] is pushed onto a bounded channel
//! 3. The visit worker persists it through the registry, with retries
//! 4. Failures are logged and never reach the redirect caller

pub mod clock;
pub mod entities;
pub mod repositories;
pub mod visit_event;
