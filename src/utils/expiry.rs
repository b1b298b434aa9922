//! Expiry specification for new links.

use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use crate::error::AppError;

/// Minimum relative expiry in days.
pub const MIN_EXPIRY_DAYS: i64 = 1;

/// Maximum relative expiry in days.
pub const MAX_EXPIRY_DAYS: i64 = 365;

/// When a new link stops redirecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// Absolute instant; must lie in the future.
    At(DateTime<Utc>),
    /// Days from creation, 1-365 inclusive.
    InDays(i64),
}

impl Expiry {
    /// Computes the absolute expiry relative to `now`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidExpiry`] if the day count is out of range or
    /// the absolute instant is not after `now`.
    pub fn resolve(self, now: DateTime<Utc>) -> Result<DateTime<Utc>, AppError> {
        match self {
            Expiry::InDays(days) => {
                if !(MIN_EXPIRY_DAYS..=MAX_EXPIRY_DAYS).contains(&days) {
                    return Err(AppError::invalid_expiry(
                        format!(
                            "Expiry must be between {} and {} days",
                            MIN_EXPIRY_DAYS, MAX_EXPIRY_DAYS
                        ),
                        json!({ "expires_in_days": days }),
                    ));
                }
                Ok(now + Duration::days(days))
            }
            Expiry::At(at) => {
                if at <= now {
                    return Err(AppError::invalid_expiry(
                        "Expiry must be in the future",
                        json!({ "expires_at": at }),
                    ));
                }
                Ok(at)
            }
        }
    }
}
