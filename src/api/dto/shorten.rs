//! DTOs for the link creation endpoint.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::application::services::CreateLink;
use crate::utils::expiry::Expiry;

/// Request to shorten a single URL.
///
/// `original_url` and `custom_code` are accepted as aliases of `url` and
/// `custom_alias`. An empty alias counts as no alias. URL, alias and expiry ranges are checked by the registry so
/// they report their specific error codes; this DTO only rejects request shapes
/// that cannot be interpreted.
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_single_expiry"))]
pub struct ShortenRequest {
    #[serde(alias = "original_url")]
    pub url: String,

    #[serde(default, alias = "custom_code")]
    pub custom_alias: Option<String>,

    /// Absolute expiry instant (RFC 3339).
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,

    /// Relative expiry, 1 to 365 days from now.
    #[serde(default)]
    pub expires_in_days: Option<i64>,
}

fn validate_single_expiry(request: &ShortenRequest) -> Result<(), ValidationError> {
    if request.expires_at.is_some() && request.expires_in_days.is_some() {
        return Err(ValidationError::new("expiry_conflict")
            .with_message("Specify either expires_at or expires_in_days, not both".into()));
    }
    Ok(())
}

impl From<ShortenRequest> for CreateLink {
    fn from(request: ShortenRequest) -> Self {
        let expiry = match (request.expires_at, request.expires_in_days) {
            (Some(at), _) => Some(Expiry::At(at)),
            (None, Some(days)) => Some(Expiry::InDays(days)),
            (None, None) => None,
        };

        CreateLink {
            original_url: request.url,
            custom_alias: request.custom_alias.filter(|alias| !alias.is_empty()),
            expiry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_field_aliases() {
        let json = r#"{"original_url": "https://example.com", "custom_code": "my-link"}"#;
        let request: ShortenRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.url, "https://example.com");
        assert_eq!(request.custom_alias.as_deref(), Some("my-link"));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_minimal_request() {
        let request: ShortenRequest =
            serde_json::from_str(r#"{"url": "https://example.com"}"#).unwrap();
        let create: CreateLink = request.into();

        assert!(create.custom_alias.is_none());
        assert!(create.expiry.is_none());
    }

    #[test]
    fn test_empty_alias_is_treated_as_absent() {
        let request: ShortenRequest =
            serde_json::from_str(r#"{"url": "https://example.com", "custom_code": ""}"#).unwrap();
        let create: CreateLink = request.into();

        assert!(create.custom_alias.is_none());
    }

    #[test]
    fn test_expires_in_days_maps_to_relative_expiry() {
        let request: ShortenRequest =
            serde_json::from_str(r#"{"url": "https://example.com", "expires_in_days": 7}"#)
                .unwrap();
        let create: CreateLink = request.into();

        assert!(matches!(create.expiry, Some(Expiry::InDays(7))));
    }

    #[test]
    fn test_both_expiry_forms_rejected() {
        let json = r#"{
            "url": "https://example.com",
            "expires_at": "2030-01-01T00:00:00Z",
            "expires_in_days": 7
        }"#;
        let request: ShortenRequest = serde_json::from_str(json).unwrap();

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_missing_url_is_deserialization_error() {
        assert!(serde_json::from_str::<ShortenRequest>(r#"{"custom_alias": "abc"}"#).is_err());
    }
}
