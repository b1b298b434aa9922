#![allow(dead_code)]

use axum::extract::connect_info::MockConnectInfo;
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use snaplink::api::routes::routes;
use snaplink::application::services::{RegistrySettings, SharedRegistry};
use snaplink::domain::clock::ManualClock;
use snaplink::domain::entities::ShortLink;
use snaplink::domain::visit_event::VisitEvent;
use snaplink::infrastructure::persistence::{
    MemoryDatabase, MemoryLinkRepository, MemoryVisitRepository,
};
use snaplink::infrastructure::qr_renderer::QrRenderer;
use snaplink::prelude::CreateLink;
use snaplink::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;

pub const BASE_URL: &str = "http://sho.rt";
pub const CLIENT_ADDR: &str = "127.0.0.1:12345";

/// A registry over in-memory storage with a controllable clock.
pub fn memory_registry(clock: Arc<ManualClock>) -> Arc<SharedRegistry> {
    let db = MemoryDatabase::new();
    Arc::new(SharedRegistry::with_clock(
        Arc::new(MemoryLinkRepository::new(db.clone())),
        Arc::new(MemoryVisitRepository::new(db)),
        clock,
        RegistrySettings::new(BASE_URL),
    ))
}

/// Full router over in-memory storage.
///
/// Visit events stay in `visits` until [`TestApp::flush_visits`] persists
/// them, so tests decide when analytics catch up.
pub struct TestApp {
    pub server: TestServer,
    pub registry: Arc<SharedRegistry>,
    pub clock: Arc<ManualClock>,
    pub visits: mpsc::Receiver<VisitEvent>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_queue_capacity(100)
    }

    pub fn with_queue_capacity(capacity: usize) -> Self {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let registry = memory_registry(clock.clone());
        let (tx, rx) = mpsc::channel(capacity);

        let state = AppState::new(registry.clone(), tx, QrRenderer::new(128));
        let addr: SocketAddr = CLIENT_ADDR.parse().unwrap();
        let app = routes().with_state(state).layer(MockConnectInfo(addr));

        Self {
            server: TestServer::new(app).unwrap(),
            registry,
            clock,
            visits: rx,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.registry.now()
    }

    /// Creates a link directly through the registry.
    pub async fn create_link(&self, url: &str, alias: Option<&str>) -> ShortLink {
        let mut request = CreateLink::new(url);
        if let Some(alias) = alias {
            request = request.with_alias(alias);
        }
        self.registry.create(request).await.unwrap()
    }

    /// Persists every queued visit event, returning how many were recorded.
    pub async fn flush_visits(&mut self) -> usize {
        let mut recorded = 0;
        while let Ok(event) = self.visits.try_recv() {
            if self.registry.record_visit(event.into()).await.is_some() {
                recorded += 1;
            }
        }
        recorded
    }
}
