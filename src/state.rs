//! Shared application state injected into every handler.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::SharedRegistry;
use crate::domain::visit_event::VisitEvent;
use crate::infrastructure::qr_renderer::QrRenderer;

/// Cloned per request by axum; all fields are cheap handles.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<SharedRegistry>,
    /// Producer side of the visit queue drained by the visit worker.
    pub visit_sender: mpsc::Sender<VisitEvent>,
    pub qr: QrRenderer,
}

impl AppState {
    pub fn new(
        registry: Arc<SharedRegistry>,
        visit_sender: mpsc::Sender<VisitEvent>,
        qr: QrRenderer,
    ) -> Self {
        Self {
            registry,
            visit_sender,
            qr,
        }
    }
}
