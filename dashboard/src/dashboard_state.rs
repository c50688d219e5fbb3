use chrono::Utc;
use nav_dash_data_management::DataManager;
use tokio::sync::{Mutex, broadcast};

use crate::{
    config::DashboardConfig,
    controller::{DashboardController, DashboardEvent},
    display::DisplayFrame,
};

pub struct DashboardState {
    // Channel used to push display frames to all connected clients.
    pub tx: broadcast::Sender<DisplayFrame>,
    pub data_manager: DataManager,
    pub controller: Mutex<DashboardController>,
    pub config: DashboardConfig,
}

impl DashboardState {
    /// Runs one event through the controller, persists any fresh
    /// achievement unlocks and pushes the refreshed frame to subscribers.
    /// Events are strictly serialized by the controller lock.
    pub async fn dispatch(&self, event: DashboardEvent) -> DisplayFrame {
        let now = Utc::now();
        let outcome = self.controller.lock().await.handle_event(event, now);

        for achievement in &outcome.newly_unlocked {
            if let Err(err) = self.data_manager.unlock_achievement(*achievement, now).await {
                tracing::error!("Failed to persist achievement unlock: {err:?}");
            }
        }

        let _ = self.tx.send(outcome.frame.clone());
        outcome.frame
    }
}
