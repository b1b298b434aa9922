//! Code registry: creation, resolution, statistics and deactivation of short links.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{debug, error, info, warn};

use crate::domain::clock::{Clock, SystemClock};
use crate::domain::entities::{NewShortLink, NewVisit, ShortLink, VisitRecord};
use crate::domain::repositories::{
    DimensionCount, LinkRepository, VisitDimension, VisitQuery, VisitRepository,
};
use crate::error::AppError;
use crate::utils::code_generator::{
    DEFAULT_CODE_LENGTH, generate_code, is_reserved, validate_custom_alias,
};
use crate::utils::expiry::Expiry;
use crate::utils::url_validator::validate_url;

/// Upper bound on the page size accepted by [`LinkRegistry::list`].
pub const MAX_LIST_LIMIT: i64 = 1000;

/// Default number of insert attempts for generated codes.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Number of groups returned in referer / user agent breakdowns.
const BREAKDOWN_LIMIT: i64 = 10;

/// The registry shape used by the server, with storage chosen at runtime.
pub type SharedRegistry = LinkRegistry<dyn LinkRepository, dyn VisitRepository>;

/// Tunables for code generation and short URL assembly.
#[derive(Debug, Clone)]
pub struct RegistrySettings {
    pub base_url: String,
    pub code_length: usize,
    pub max_attempts: usize,
}

impl RegistrySettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            code_length: DEFAULT_CODE_LENGTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_code_length(mut self, code_length: usize) -> Self {
        self.code_length = code_length;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

/// Input for [`LinkRegistry::create`].
#[derive(Debug, Clone)]
pub struct CreateLink {
    pub original_url: String,
    pub custom_alias: Option<String>,
    pub expiry: Option<Expiry>,
}

impl CreateLink {
    pub fn new(original_url: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            custom_alias: None,
            expiry: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.custom_alias = Some(alias.into());
        self
    }

    pub fn with_expiry(mut self, expiry: Expiry) -> Self {
        self.expiry = Some(expiry);
        self
    }
}

/// Statistics for one link.
///
/// `total_clicks` counts every visit; `visits` honours the requested paging.
#[derive(Debug, Clone)]
pub struct LinkStats {
    pub link: ShortLink,
    pub total_clicks: i64,
    pub visits: Vec<VisitRecord>,
    pub top_referers: Vec<DimensionCount>,
    pub top_user_agents: Vec<DimensionCount>,
}

/// Owns the mapping from short code to URL record.
///
/// Uniqueness of short codes is delegated to the storage layer's atomic insert:
/// custom aliases surface a collision as [`AppError::AliasTaken`], generated
/// codes retry with a fresh code up to `max_attempts` times.
pub struct LinkRegistry<L: LinkRepository + ?Sized, V: VisitRepository + ?Sized> {
    links: Arc<L>,
    visits: Arc<V>,
    clock: Arc<dyn Clock>,
    settings: RegistrySettings,
}

impl<L: LinkRepository + ?Sized, V: VisitRepository + ?Sized> LinkRegistry<L, V> {
    /// Creates a registry using the system clock.
    pub fn new(links: Arc<L>, visits: Arc<V>, settings: RegistrySettings) -> Self {
        Self::with_clock(links, visits, Arc::new(SystemClock), settings)
    }

    /// Creates a registry with an explicit time source.
    pub fn with_clock(
        links: Arc<L>,
        visits: Arc<V>,
        clock: Arc<dyn Clock>,
        settings: RegistrySettings,
    ) -> Self {
        Self {
            links,
            visits,
            clock,
            settings,
        }
    }

    /// Creates a short link.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] if the URL is not an absolute http(s) URL
    /// - [`AppError::InvalidAlias`] if the custom alias is malformed or reserved
    /// - [`AppError::InvalidExpiry`] if the expiry is out of range
    /// - [`AppError::AliasTaken`] if the custom alias already exists, active or not
    /// - [`AppError::CodeSpaceExhausted`] if every generated code collided
    pub async fn create(&self, request: CreateLink) -> Result<ShortLink, AppError> {
        validate_url(&request.original_url).map_err(|e| {
            AppError::invalid_url("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        if let Some(alias) = &request.custom_alias {
            validate_custom_alias(alias)?;
        }

        let now = self.clock.now();
        let expires_at = request.expiry.map(|e| e.resolve(now)).transpose()?;

        let link = match request.custom_alias {
            Some(alias) => {
                let new_link = NewShortLink {
                    original_url: request.original_url,
                    short_code: alias.clone(),
                    created_at: now,
                    expires_at,
                };

                self.links.insert(new_link).await.map_err(|e| match e {
                    AppError::AliasTaken { .. } => AppError::alias_taken(
                        "Custom alias already exists",
                        json!({ "alias": alias }),
                    ),
                    other => other,
                })?
            }
            None => {
                self.insert_generated(request.original_url, now, expires_at)
                    .await?
            }
        };

        metrics::counter!("links_created_total").increment(1);
        info!(code = %link.short_code, id = link.id, "Short link created");

        Ok(link)
    }

    /// Looks up a link for redirecting.
    ///
    /// Does not record a visit; callers follow a successful resolve with
    /// [`Self::record_visit`].
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the code never existed
    /// - [`AppError::Gone`] if the link is deactivated or expired
    pub async fn resolve(&self, code: &str) -> Result<ShortLink, AppError> {
        let link = self.find(code).await?;

        if !link.is_active {
            return Err(AppError::gone(
                "Short link has been deactivated",
                json!({ "code": code }),
            ));
        }

        if link.is_expired_at(self.clock.now()) {
            return Err(AppError::gone(
                "Short link has expired",
                json!({ "code": code, "expires_at": link.expires_at }),
            ));
        }

        Ok(link)
    }

    /// Records a visit, logging and swallowing any failure.
    ///
    /// Analytics are best-effort: a failed insert never affects the redirect.
    pub async fn record_visit(&self, visit: NewVisit) -> Option<VisitRecord> {
        let link_id = visit.link_id;
        match self.try_record_visit(visit).await {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(link_id, error = %e, "Failed to record visit");
                None
            }
        }
    }

    /// Records a visit, returning storage errors to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn try_record_visit(&self, visit: NewVisit) -> Result<VisitRecord, AppError> {
        let record = self.visits.record(visit).await?;
        metrics::counter!("visits_recorded_total").increment(1);
        debug!(link_id = record.link_id, visit_id = record.id, "Visit recorded");
        Ok(record)
    }

    /// Returns a link with its click total, visits and breakdowns.
    ///
    /// Works for deactivated and expired links as well.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code never existed.
    pub async fn stats(&self, code: &str, query: VisitQuery) -> Result<LinkStats, AppError> {
        let link = self.find(code).await?;

        let (total_clicks, visits, top_referers, top_user_agents) = tokio::try_join!(
            self.visits.count_for_link(link.id),
            self.visits.list_for_link(link.id, query),
            self.visits
                .breakdown(link.id, VisitDimension::Referer, BREAKDOWN_LIMIT),
            self.visits
                .breakdown(link.id, VisitDimension::UserAgent, BREAKDOWN_LIMIT),
        )?;

        Ok(LinkStats {
            link,
            total_clicks,
            visits,
            top_referers,
            top_user_agents,
        })
    }

    /// Looks a link up by code, whatever its state.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code never existed.
    pub async fn get(&self, code: &str) -> Result<ShortLink, AppError> {
        self.find(code).await
    }

    /// Permanently retires a code. Calling it on an inactive link is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code never existed.
    pub async fn deactivate(&self, code: &str) -> Result<(), AppError> {
        if !self.links.deactivate(code).await? {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "code": code }),
            ));
        }

        info!(code, "Short link deactivated");
        Ok(())
    }

    /// Lists links newest first, active and inactive.
    ///
    /// Negative offsets are treated as 0 and `limit` is clamped to
    /// `1..=`[`MAX_LIST_LIMIT`].
    pub async fn list(&self, offset: i64, limit: i64) -> Result<Vec<ShortLink>, AppError> {
        let offset = offset.max(0);
        let limit = limit.clamp(1, MAX_LIST_LIMIT);
        self.links.list(offset, limit).await
    }

    /// Counts all links, used for pagination metadata.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.links.count().await
    }

    /// Assembles the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.settings.base_url.trim_end_matches('/'), code)
    }

    /// Current time according to the registry's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    async fn find(&self, code: &str) -> Result<ShortLink, AppError> {
        self.links
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    /// Inserts with freshly generated codes until one is accepted.
    ///
    /// Collisions are detected by the storage constraint, not by a prior lookup.
    async fn insert_generated(
        &self,
        original_url: String,
        created_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<ShortLink, AppError> {
        let mut attempts = 0;

        while attempts < self.settings.max_attempts {
            let code = generate_code(self.settings.code_length);
            if is_reserved(&code) {
                continue;
            }
            attempts += 1;

            let new_link = NewShortLink {
                original_url: original_url.clone(),
                short_code: code,
                created_at,
                expires_at,
            };

            match self.links.insert(new_link).await {
                Ok(link) => return Ok(link),
                Err(AppError::AliasTaken { .. }) => {
                    debug!(attempt = attempts, "Generated code collided, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        metrics::counter!("code_space_exhausted_total").increment(1);
        error!(
            alert = true,
            code_length = self.settings.code_length,
            attempts,
            "Code space exhausted: increase the code length"
        );

        Err(AppError::code_space_exhausted(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions", "attempts": attempts }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::ManualClock;
    use crate::domain::repositories::{MockLinkRepository, MockVisitRepository};
    use chrono::{DateTime, Duration, Utc};

    fn create_test_link(id: i64, code: &str, url: &str) -> ShortLink {
        ShortLink::new(id, url.to_string(), code.to_string(), Utc::now(), None, true)
    }

    fn registry(
        links: MockLinkRepository,
        visits: MockVisitRepository,
    ) -> LinkRegistry<MockLinkRepository, MockVisitRepository> {
        LinkRegistry::new(
            Arc::new(links),
            Arc::new(visits),
            RegistrySettings::new("https://s.example.com"),
        )
    }

    fn registry_at(
        links: MockLinkRepository,
        visits: MockVisitRepository,
        now: DateTime<Utc>,
    ) -> LinkRegistry<MockLinkRepository, MockVisitRepository> {
        LinkRegistry::with_clock(
            Arc::new(links),
            Arc::new(visits),
            Arc::new(ManualClock::new(now)),
            RegistrySettings::new("https://s.example.com"),
        )
    }

    #[tokio::test]
    async fn test_create_generates_six_character_code() {
        let mut mock_links = MockLinkRepository::new();

        mock_links
            .expect_insert()
            .withf(|new_link| {
                new_link.short_code.len() == 6 && new_link.original_url == "https://example.com"
            })
            .times(1)
            .returning(|new_link| {
                Ok(create_test_link(
                    1,
                    &new_link.short_code,
                    &new_link.original_url,
                ))
            });

        let registry = registry(mock_links, MockVisitRepository::new());

        let link = registry
            .create(CreateLink::new("https://example.com"))
            .await
            .unwrap();

        assert_eq!(link.short_code.len(), 6);
        assert_eq!(link.original_url, "https://example.com");
    }

    #[tokio::test]
    async fn test_create_with_custom_alias() {
        let mut mock_links = MockLinkRepository::new();

        mock_links
            .expect_insert()
            .withf(|new_link| new_link.short_code == "demo")
            .times(1)
            .returning(|new_link| {
                Ok(create_test_link(
                    10,
                    &new_link.short_code,
                    &new_link.original_url,
                ))
            });

        let registry = registry(mock_links, MockVisitRepository::new());

        let link = registry
            .create(CreateLink::new("https://example.com").with_alias("demo"))
            .await
            .unwrap();

        assert_eq!(link.short_code, "demo");
    }

    #[tokio::test]
    async fn test_create_custom_alias_conflict() {
        let mut mock_links = MockLinkRepository::new();

        mock_links
            .expect_insert()
            .times(1)
            .returning(|_| Err(AppError::alias_taken("Short code already exists", json!({}))));

        let registry = registry(mock_links, MockVisitRepository::new());

        let err = registry
            .create(CreateLink::new("https://example.com").with_alias("taken"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::AliasTaken { .. }));
        assert_eq!(err.to_error_info().details["alias"], "taken");
    }

    #[tokio::test]
    async fn test_create_invalid_url_skips_storage() {
        let mut mock_links = MockLinkRepository::new();
        mock_links.expect_insert().times(0);

        let registry = registry(mock_links, MockVisitRepository::new());

        let err = registry
            .create(CreateLink::new("not-a-url"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_create_invalid_alias() {
        let mut mock_links = MockLinkRepository::new();
        mock_links.expect_insert().times(0);

        let registry = registry(mock_links, MockVisitRepository::new());

        let err = registry
            .create(CreateLink::new("https://example.com").with_alias("a b"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidAlias { .. }));
    }

    #[tokio::test]
    async fn test_create_invalid_expiry() {
        let mut mock_links = MockLinkRepository::new();
        mock_links.expect_insert().times(0);

        let registry = registry(mock_links, MockVisitRepository::new());

        let err = registry
            .create(CreateLink::new("https://example.com").with_expiry(Expiry::InDays(400)))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidExpiry { .. }));
    }

    #[tokio::test]
    async fn test_create_sets_expiry_from_clock() {
        let now = Utc::now();
        let mut mock_links = MockLinkRepository::new();

        mock_links
            .expect_insert()
            .withf(move |new_link| {
                new_link.created_at == now && new_link.expires_at == Some(now + Duration::days(7))
            })
            .times(1)
            .returning(|new_link| {
                Ok(ShortLink::new(
                    1,
                    new_link.original_url,
                    new_link.short_code,
                    new_link.created_at,
                    new_link.expires_at,
                    true,
                ))
            });

        let registry = registry_at(mock_links, MockVisitRepository::new(), now);

        let link = registry
            .create(CreateLink::new("https://example.com").with_expiry(Expiry::InDays(7)))
            .await
            .unwrap();

        assert_eq!(link.expires_at, Some(now + Duration::days(7)));
    }

    #[tokio::test]
    async fn test_create_retries_generated_code_on_collision() {
        let mut mock_links = MockLinkRepository::new();
        let mut seq = mockall::Sequence::new();

        mock_links
            .expect_insert()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::alias_taken("Short code already exists", json!({}))));
        mock_links
            .expect_insert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|new_link| {
                Ok(create_test_link(
                    3,
                    &new_link.short_code,
                    &new_link.original_url,
                ))
            });

        let registry = registry(mock_links, MockVisitRepository::new());

        let link = registry
            .create(CreateLink::new("https://example.com"))
            .await
            .unwrap();

        assert_eq!(link.id, 3);
    }

    #[tokio::test]
    async fn test_create_code_space_exhausted_after_max_attempts() {
        let mut mock_links = MockLinkRepository::new();

        mock_links
            .expect_insert()
            .times(DEFAULT_MAX_ATTEMPTS)
            .returning(|_| Err(AppError::alias_taken("Short code already exists", json!({}))));

        let registry = registry(mock_links, MockVisitRepository::new());

        let err = registry
            .create(CreateLink::new("https://example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::CodeSpaceExhausted { .. }));
    }

    #[tokio::test]
    async fn test_create_propagates_storage_failure_without_retry() {
        let mut mock_links = MockLinkRepository::new();

        mock_links
            .expect_insert()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let registry = registry(mock_links, MockVisitRepository::new());

        let err = registry
            .create(CreateLink::new("https://example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_resolve_success() {
        let mut mock_links = MockLinkRepository::new();

        mock_links
            .expect_find_by_code()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(|_| Ok(Some(create_test_link(1, "abc123", "https://example.com"))));

        let registry = registry(mock_links, MockVisitRepository::new());

        let link = registry.resolve("abc123").await.unwrap();
        assert_eq!(link.original_url, "https://example.com");
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut mock_links = MockLinkRepository::new();
        mock_links
            .expect_find_by_code()
            .times(1)
            .returning(|_| Ok(None));

        let registry = registry(mock_links, MockVisitRepository::new());

        let err = registry.resolve("missing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_inactive_is_gone() {
        let mut mock_links = MockLinkRepository::new();
        mock_links.expect_find_by_code().times(1).returning(|_| {
            let mut link = create_test_link(1, "old", "https://example.com");
            link.is_active = false;
            Ok(Some(link))
        });

        let registry = registry(mock_links, MockVisitRepository::new());

        let err = registry.resolve("old").await.unwrap_err();
        assert!(matches!(err, AppError::Gone { .. }));
    }

    #[tokio::test]
    async fn test_resolve_expired_is_gone() {
        let now = Utc::now();
        let mut mock_links = MockLinkRepository::new();
        mock_links.expect_find_by_code().times(1).returning(move |_| {
            let mut link = create_test_link(1, "temp", "https://example.com");
            link.expires_at = Some(now - Duration::seconds(1));
            Ok(Some(link))
        });

        let registry = registry_at(mock_links, MockVisitRepository::new(), now);

        let err = registry.resolve("temp").await.unwrap_err();
        assert!(matches!(err, AppError::Gone { .. }));
    }

    #[tokio::test]
    async fn test_record_visit_swallows_failures() {
        let mut mock_visits = MockVisitRepository::new();
        mock_visits
            .expect_record()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let registry = registry(MockLinkRepository::new(), mock_visits);

        let result = registry.record_visit(NewVisit::bare(1, Utc::now())).await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_record_visit_returns_record() {
        let mut mock_visits = MockVisitRepository::new();
        mock_visits.expect_record().times(1).returning(|visit| {
            Ok(VisitRecord::new(
                5,
                visit.link_id,
                visit.visited_at,
                visit.user_agent,
                visit.ip_address,
                visit.referer,
            ))
        });

        let registry = registry(MockLinkRepository::new(), mock_visits);

        let record = registry
            .record_visit(NewVisit::bare(1, Utc::now()))
            .await
            .unwrap();
        assert_eq!(record.id, 5);
        assert_eq!(record.link_id, 1);
    }

    #[tokio::test]
    async fn test_stats_for_deactivated_link() {
        let mut mock_links = MockLinkRepository::new();
        let mut mock_visits = MockVisitRepository::new();

        mock_links.expect_find_by_code().times(1).returning(|_| {
            let mut link = create_test_link(4, "gone", "https://example.com");
            link.is_active = false;
            Ok(Some(link))
        });
        mock_visits
            .expect_count_for_link()
            .withf(|id| *id == 4)
            .times(1)
            .returning(|_| Ok(2));
        mock_visits
            .expect_list_for_link()
            .times(1)
            .returning(|link_id, _| {
                Ok(vec![
                    VisitRecord::new(1, link_id, Utc::now(), None, None, None),
                    VisitRecord::new(2, link_id, Utc::now(), None, None, None),
                ])
            });
        mock_visits
            .expect_breakdown()
            .times(2)
            .returning(|_, _, _| {
                Ok(vec![DimensionCount {
                    value: None,
                    count: 2,
                }])
            });

        let registry = registry(mock_links, mock_visits);

        let stats = registry.stats("gone", VisitQuery::all()).await.unwrap();

        assert!(!stats.link.is_active);
        assert_eq!(stats.total_clicks, 2);
        assert_eq!(stats.visits.len(), 2);
        assert_eq!(stats.top_referers[0].count, 2);
    }

    #[tokio::test]
    async fn test_stats_not_found() {
        let mut mock_links = MockLinkRepository::new();
        mock_links
            .expect_find_by_code()
            .times(1)
            .returning(|_| Ok(None));

        let registry = registry(mock_links, MockVisitRepository::new());

        let err = registry.stats("nope", VisitQuery::all()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_deactivate_is_idempotent() {
        let mut mock_links = MockLinkRepository::new();
        mock_links
            .expect_deactivate()
            .withf(|code| code == "demo")
            .times(2)
            .returning(|_| Ok(true));

        let registry = registry(mock_links, MockVisitRepository::new());

        assert!(registry.deactivate("demo").await.is_ok());
        assert!(registry.deactivate("demo").await.is_ok());
    }

    #[tokio::test]
    async fn test_get_returns_inactive_link_without_touching_visits() {
        let mut mock_links = MockLinkRepository::new();
        mock_links
            .expect_find_by_code()
            .withf(|code| code == "retired")
            .times(1)
            .returning(|_| {
                let mut link = create_test_link(4, "retired", "https://example.com");
                link.is_active = false;
                Ok(Some(link))
            });
        mock_links
            .expect_find_by_code()
            .returning(|_| Ok(None));

        let registry = registry(mock_links, MockVisitRepository::new());

        let link = registry.get("retired").await.unwrap();
        assert_eq!(link.id, 4);
        assert!(!link.is_active);

        let err = registry.get("missing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_deactivate_not_found() {
        let mut mock_links = MockLinkRepository::new();
        mock_links
            .expect_deactivate()
            .times(1)
            .returning(|_| Ok(false));

        let registry = registry(mock_links, MockVisitRepository::new());

        let err = registry.deactivate("missing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_clamps_paging() {
        let mut mock_links = MockLinkRepository::new();
        mock_links
            .expect_list()
            .withf(|offset, limit| *offset == 0 && *limit == MAX_LIST_LIMIT)
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let registry = registry(mock_links, MockVisitRepository::new());

        let links = registry.list(-5, 50_000).await.unwrap();
        assert!(links.is_empty());
    }

    #[test]
    fn test_short_url_trims_trailing_slash() {
        let registry = LinkRegistry::new(
            Arc::new(MockLinkRepository::new()),
            Arc::new(MockVisitRepository::new()),
            RegistrySettings::new("https://s.example.com/"),
        );

        assert_eq!(registry.short_url("abc123"), "https://s.example.com/abc123");
    }
}
