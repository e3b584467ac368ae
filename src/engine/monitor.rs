use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::client::GestureService;
use crate::pipeline::DashboardState;

/// Periodic liveness poll against the gesture engine
///
/// Flips the dashboard's connectivity flag and engine name on every poll.
/// Owns its timer task explicitly so shutdown is a deliberate stop, not a
/// leaked interval.
pub struct HealthMonitor {
    service: Arc<dyn GestureService>,
    state: Arc<RwLock<DashboardState>>,
    interval: Duration,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl HealthMonitor {
    pub fn new(
        service: Arc<dyn GestureService>,
        state: Arc<RwLock<DashboardState>>,
        interval: Duration,
    ) -> Self {
        Self {
            service,
            state,
            interval,
            task: Mutex::new(None),
        }
    }

    /// Start polling; an immediate first probe runs before the first delay
    pub async fn start(&self) {
        let mut task = self.task.lock().await;
        if task.is_some() {
            return;
        }

        let service = Arc::clone(&self.service);
        let state = Arc::clone(&self.state);
        let interval = self.interval;

        *task = Some(tokio::spawn(async move {
            info!("Health monitor started ({:?} interval)", interval);
            let mut ticker = tokio::time::interval(interval);

            loop {
                ticker.tick().await;
                match service.health().await {
                    Ok(health) => {
                        state
                            .write()
                            .await
                            .set_connectivity(true, Some(health.engine));
                    }
                    Err(e) => {
                        debug!("Health probe failed: {}", e);
                        state.write().await.set_connectivity(false, None);
                    }
                }
            }
        }));
    }

    /// Cancel the poll task
    pub async fn stop(&self) {
        if let Some(task) = self.task.lock().await.take() {
            task.abort();
            info!("Health monitor stopped");
        }
    }
}
