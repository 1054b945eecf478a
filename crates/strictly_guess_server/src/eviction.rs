//! Background removal of idle sessions.

use crate::SessionManager;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, instrument};

/// Spawns a task that evicts sessions idle for longer than `ttl`,
/// checking every `every`. Abort the handle to stop it.
#[instrument(skip(sessions))]
pub fn spawn_idle_sweeper(sessions: SessionManager, ttl: Duration, every: Duration) -> JoinHandle<()> {
    info!("Starting idle session sweeper");
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let evicted = sessions.evict_idle(ttl);
            debug!(evicted, remaining = sessions.len(), "Sweep finished");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use strictly_guess::{FixedSecret, NoopLogger};

    #[tokio::test]
    async fn sweeper_drops_idle_sessions() {
        let sessions = SessionManager::new()
            .with_secrets(Arc::new(FixedSecret::new(1)))
            .with_logger(Arc::new(NoopLogger));
        sessions.create_session();
        sessions.create_session();

        let sweeper = spawn_idle_sweeper(
            sessions.clone(),
            Duration::from_millis(10),
            Duration::from_millis(10),
        );
        tokio::time::sleep(Duration::from_millis(200)).await;
        sweeper.abort();

        assert!(sessions.is_empty());
    }
}
