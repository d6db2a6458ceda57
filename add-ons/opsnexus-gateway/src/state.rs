//! Shared gateway state.

use opsnexus_core::{Action, FaqBook, LlmGateway, NexusConfig, ProjectBoard, ViewRouter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<NexusConfig>,
    pub gateway: Arc<dyn LlmGateway>,
    pub router: Arc<RwLock<ViewRouter>>,
    pub projects: Arc<RwLock<ProjectBoard>>,
    pub faqs: Arc<RwLock<FaqBook>>,
    pub in_flight: Arc<InFlight>,
}

impl AppState {
    pub fn new(config: NexusConfig, gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            config: Arc::new(config),
            gateway,
            router: Arc::new(RwLock::new(ViewRouter::new())),
            projects: Arc::new(RwLock::new(ProjectBoard::default())),
            faqs: Arc::new(RwLock::new(FaqBook::default())),
            in_flight: Arc::new(InFlight::default()),
        }
    }
}

/// At most one pending generation per action.
#[derive(Debug, Default)]
pub struct InFlight {
    busy: [AtomicBool; 3],
}

impl InFlight {
    /// Claims `action`; `None` while another call for it is pending.
    pub fn try_begin(self: &Arc<Self>, action: Action) -> Option<InFlightGuard> {
        self.busy[action.index()]
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(InFlightGuard {
            flags: Arc::clone(self),
            action,
        })
    }

    pub fn is_busy(&self, action: Action) -> bool {
        self.busy[action.index()].load(Ordering::Acquire)
    }
}

/// Releases the action when dropped, whether the call succeeded or not.
pub struct InFlightGuard {
    flags: Arc<InFlight>,
    action: Action,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flags.busy[self.action.index()].store(false, Ordering::Release);
    }
}
