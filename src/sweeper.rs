use crate::state::AppState;
use std::sync::Arc;
use std::time::Duration;

/// Spawn a background task that evicts rooms idle for longer than `max_idle`
pub fn spawn_room_sweeper(
    state: Arc<AppState>,
    interval: Duration,
    max_idle: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let removed = state.sweep_idle_rooms(max_idle).await;
            if removed > 0 {
                let remaining = state.room_count().await;
                tracing::info!(removed, remaining, "Swept idle rooms");
            }
        }
    })
}
