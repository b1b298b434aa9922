//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Short code generation and alias validation
//! - [`url_validator`] - Original URL validation
//! - [`expiry`] - Link expiry specification
//! - [`db_error`] - PostgreSQL constraint violation classification

pub mod code_generator;
pub mod db_error;
pub mod expiry;
pub mod url_validator;
