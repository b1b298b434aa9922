//! In-process implementations of the storage interface.
//!
//! Backed by a single [`MemoryDatabase`] shared between the link and visit
//! repositories, mirroring the two PostgreSQL tables. Every operation takes one
//! lock, so the existence check and insert for a short code are atomic just
//! like the unique constraint they stand in for. Data is lost on restart.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;

use crate::domain::entities::{NewShortLink, NewVisit, ShortLink, VisitRecord};
use crate::domain::repositories::{
    DimensionCount, LinkRepository, SortOrder, VisitDimension, VisitQuery, VisitRepository,
};
use crate::error::AppError;

#[derive(Debug, Default)]
struct Tables {
    links: Vec<ShortLink>,
    /// short code -> index into `links`
    codes: HashMap<String, usize>,
    visits: Vec<VisitRecord>,
}

impl Tables {
    fn link_exists(&self, link_id: i64) -> bool {
        // Ids are assigned sequentially from 1.
        link_id >= 1 && (link_id as usize) <= self.links.len()
    }
}

/// Shared in-memory storage for both repositories.
#[derive(Debug, Default)]
pub struct MemoryDatabase {
    tables: Mutex<Tables>,
}

impl MemoryDatabase {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

/// In-memory link repository.
pub struct MemoryLinkRepository {
    db: Arc<MemoryDatabase>,
}

impl MemoryLinkRepository {
    pub fn new(db: Arc<MemoryDatabase>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let mut tables = self.db.tables.lock();

        if tables.codes.contains_key(&new_link.short_code) {
            return Err(AppError::alias_taken(
                "Short code already exists",
                json!({ "code": new_link.short_code }),
            ));
        }

        let link = ShortLink::new(
            tables.links.len() as i64 + 1,
            new_link.original_url,
            new_link.short_code,
            new_link.created_at,
            new_link.expires_at,
            true,
        );

        let index = tables.links.len();
        tables.codes.insert(link.short_code.clone(), index);
        tables.links.push(link.clone());

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        let tables = self.db.tables.lock();
        Ok(tables.codes.get(code).map(|&i| tables.links[i].clone()))
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<ShortLink>, AppError> {
        let tables = self.db.tables.lock();

        let mut links: Vec<&ShortLink> = tables.links.iter().collect();
        links.sort_by_key(|l| Reverse((l.created_at, l.id)));

        Ok(links
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.db.tables.lock().links.len() as i64)
    }

    async fn deactivate(&self, code: &str) -> Result<bool, AppError> {
        let mut tables = self.db.tables.lock();

        let Some(&index) = tables.codes.get(code) else {
            return Ok(false);
        };
        tables.links[index].is_active = false;

        Ok(true)
    }
}

/// In-memory visit repository.
pub struct MemoryVisitRepository {
    db: Arc<MemoryDatabase>,
}

impl MemoryVisitRepository {
    pub fn new(db: Arc<MemoryDatabase>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VisitRepository for MemoryVisitRepository {
    async fn record(&self, new_visit: NewVisit) -> Result<VisitRecord, AppError> {
        let mut tables = self.db.tables.lock();

        if !tables.link_exists(new_visit.link_id) {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "link_id": new_visit.link_id }),
            ));
        }

        let visit = VisitRecord::new(
            tables.visits.len() as i64 + 1,
            new_visit.link_id,
            new_visit.visited_at,
            new_visit.user_agent,
            new_visit.ip_address,
            new_visit.referer,
        );
        tables.visits.push(visit.clone());

        Ok(visit)
    }

    async fn count_for_link(&self, link_id: i64) -> Result<i64, AppError> {
        let tables = self.db.tables.lock();
        Ok(tables.visits.iter().filter(|v| v.link_id == link_id).count() as i64)
    }

    async fn list_for_link(
        &self,
        link_id: i64,
        query: VisitQuery,
    ) -> Result<Vec<VisitRecord>, AppError> {
        let tables = self.db.tables.lock();

        let mut visits: Vec<&VisitRecord> = tables
            .visits
            .iter()
            .filter(|v| v.link_id == link_id)
            .collect();

        visits.sort_by_key(|v| (v.visited_at, v.id));
        if query.order == SortOrder::Descending {
            visits.reverse();
        }

        let limit = query.limit.map_or(usize::MAX, |l| l.max(0) as usize);

        Ok(visits
            .into_iter()
            .skip(query.offset.max(0) as usize)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn breakdown(
        &self,
        link_id: i64,
        dimension: VisitDimension,
        limit: i64,
    ) -> Result<Vec<DimensionCount>, AppError> {
        let tables = self.db.tables.lock();

        let mut counts: HashMap<Option<String>, i64> = HashMap::new();
        for visit in tables.visits.iter().filter(|v| v.link_id == link_id) {
            let value = match dimension {
                VisitDimension::Referer => visit.referer.clone(),
                VisitDimension::UserAgent => visit.user_agent.clone(),
            };
            *counts.entry(value).or_insert(0) += 1;
        }

        let mut groups: Vec<DimensionCount> = counts
            .into_iter()
            .map(|(value, count)| DimensionCount { value, count })
            .collect();

        // Most frequent first, then by value with missing values last.
        groups.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| match (&a.value, &b.value) {
                    (Some(x), Some(y)) => x.cmp(y),
                    (Some(_), None) => std::cmp::Ordering::Less,
                    (None, Some(_)) => std::cmp::Ordering::Greater,
                    (None, None) => std::cmp::Ordering::Equal,
                })
        });
        groups.truncate(limit.max(0) as usize);

        Ok(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};

    fn new_link(code: &str, created_at: DateTime<Utc>) -> NewShortLink {
        NewShortLink {
            original_url: "https://example.com".to_string(),
            short_code: code.to_string(),
            created_at,
            expires_at: None,
        }
    }

    fn repos() -> (MemoryLinkRepository, MemoryVisitRepository) {
        let db = MemoryDatabase::new();
        (
            MemoryLinkRepository::new(db.clone()),
            MemoryVisitRepository::new(db),
        )
    }

    fn visit(link_id: i64, at: DateTime<Utc>, referer: Option<&str>) -> NewVisit {
        NewVisit {
            link_id,
            visited_at: at,
            user_agent: None,
            ip_address: None,
            referer: referer.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let (links, _) = repos();

        let created = links.insert(new_link("abc123", Utc::now())).await.unwrap();
        let found = links.find_by_code("abc123").await.unwrap().unwrap();

        assert_eq!(created, found);
        assert_eq!(found.id, 1);
        assert!(found.is_active);
    }

    #[tokio::test]
    async fn test_insert_duplicate_code_is_alias_taken() {
        let (links, _) = repos();

        links.insert(new_link("dup", Utc::now())).await.unwrap();
        let err = links.insert(new_link("dup", Utc::now())).await.unwrap_err();

        assert!(matches!(err, AppError::AliasTaken { .. }));
        assert_eq!(links.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_deactivated_code_stays_reserved() {
        let (links, _) = repos();

        links.insert(new_link("retired", Utc::now())).await.unwrap();
        assert!(links.deactivate("retired").await.unwrap());

        let err = links
            .insert(new_link("retired", Utc::now()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AliasTaken { .. }));
    }

    #[tokio::test]
    async fn test_deactivate_missing_and_repeated() {
        let (links, _) = repos();

        assert!(!links.deactivate("missing").await.unwrap());

        links.insert(new_link("twice", Utc::now())).await.unwrap();
        assert!(links.deactivate("twice").await.unwrap());
        assert!(links.deactivate("twice").await.unwrap());
        assert!(!links.find_by_code("twice").await.unwrap().unwrap().is_active);
    }

    #[tokio::test]
    async fn test_list_newest_first_with_id_tiebreak() {
        let (links, _) = repos();
        let t0 = Utc::now();

        links.insert(new_link("first", t0)).await.unwrap();
        links.insert(new_link("second", t0)).await.unwrap();
        links
            .insert(new_link("third", t0 + Duration::seconds(1)))
            .await
            .unwrap();

        let page = links.list(0, 10).await.unwrap();
        let codes: Vec<&str> = page.iter().map(|l| l.short_code.as_str()).collect();
        assert_eq!(codes, vec!["third", "second", "first"]);

        let page = links.list(1, 1).await.unwrap();
        assert_eq!(page[0].short_code, "second");
    }

    #[tokio::test]
    async fn test_record_visit_requires_existing_link() {
        let (_, visits) = repos();

        let err = visits.record(visit(42, Utc::now(), None)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_visits_ordered_and_paged() {
        let (links, visits) = repos();
        let link = links.insert(new_link("v", Utc::now())).await.unwrap();
        let t0 = Utc::now();

        visits
            .record(visit(link.id, t0 + Duration::seconds(2), None))
            .await
            .unwrap();
        visits.record(visit(link.id, t0, None)).await.unwrap();
        visits
            .record(visit(link.id, t0 + Duration::seconds(1), None))
            .await
            .unwrap();

        let asc = visits
            .list_for_link(link.id, VisitQuery::all())
            .await
            .unwrap();
        let ids: Vec<i64> = asc.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);

        let desc = visits
            .list_for_link(
                link.id,
                VisitQuery::all()
                    .paged(0, 2)
                    .with_order(SortOrder::Descending),
            )
            .await
            .unwrap();
        let ids: Vec<i64> = desc.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![1, 3]);

        assert_eq!(visits.count_for_link(link.id).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_breakdown_by_referer() {
        let (links, visits) = repos();
        let link = links.insert(new_link("b", Utc::now())).await.unwrap();
        let now = Utc::now();

        for referer in [
            Some("https://a.com"),
            Some("https://b.com"),
            Some("https://b.com"),
            None,
        ] {
            visits.record(visit(link.id, now, referer)).await.unwrap();
        }

        let groups = visits
            .breakdown(link.id, VisitDimension::Referer, 10)
            .await
            .unwrap();

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].value.as_deref(), Some("https://b.com"));
        assert_eq!(groups[0].count, 2);
        assert_eq!(groups[1].value.as_deref(), Some("https://a.com"));
        assert_eq!(groups[2].value, None);

        let top = visits
            .breakdown(link.id, VisitDimension::Referer, 1)
            .await
            .unwrap();
        assert_eq!(top.len(), 1);
    }
}
