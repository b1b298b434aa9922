//! Core domain entities.
//!
//! - [`ShortLink`] - A short code mapped to an original URL
//! - [`VisitRecord`] - One successful redirect of a short link
//!
//! Creation inputs live in separate structs ([`NewShortLink`], [`NewVisit`])
//! since ids and defaults are assigned by storage.

pub mod link;
pub mod visit;

pub use link::{NewShortLink, ShortLink};
pub use visit::{NewVisit, VisitRecord};
