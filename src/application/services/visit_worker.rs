//! Background worker persisting visit events.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{error, info};

use crate::application::services::link_registry::LinkRegistry;
use crate::domain::entities::NewVisit;
use crate::domain::repositories::{LinkRepository, VisitRepository};
use crate::domain::visit_event::VisitEvent;
use crate::error::AppError;

/// Retries after the first failed insert.
const MAX_RETRIES: usize = 3;

/// Drains visit events and records them through the registry.
///
/// At most `concurrency` inserts run at once. Each insert is retried with
/// exponential backoff; an event that still fails is logged and dropped. A
/// visit for a link that does not exist is not retried.
///
/// Returns once the channel is closed and every in-flight insert has finished.
pub async fn run_visit_worker<L, V>(
    mut rx: mpsc::Receiver<VisitEvent>,
    registry: Arc<LinkRegistry<L, V>>,
    concurrency: usize,
) where
    L: LinkRepository + ?Sized + 'static,
    V: VisitRepository + ?Sized + 'static,
{
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));

    while let Some(event) = rx.recv().await {
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };
        let registry = registry.clone();

        tokio::spawn(async move {
            let _permit = permit;
            persist_event(&registry, event).await;
        });
    }

    // Wait for in-flight inserts by taking every permit.
    let _ = semaphore.acquire_many(concurrency.max(1) as u32).await;
    info!("Visit worker stopped");
}

async fn persist_event<L, V>(registry: &LinkRegistry<L, V>, event: VisitEvent)
where
    L: LinkRepository + ?Sized,
    V: VisitRepository + ?Sized,
{
    let code = event.short_code.clone();
    let visit: NewVisit = event.into();

    let strategy = ExponentialBackoff::from_millis(10)
        .max_delay(Duration::from_secs(1))
        .map(jitter)
        .take(MAX_RETRIES);

    let result = RetryIf::spawn(
        strategy,
        || registry.try_record_visit(visit.clone()),
        |e: &AppError| !matches!(e, AppError::NotFound { .. }),
    )
    .await;

    if let Err(e) = result {
        metrics::counter!("visits_dropped_total", "reason" => "storage").increment(1);
        error!(code = %code, error = %e, "Dropping visit after retries");
    }
}
