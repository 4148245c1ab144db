//! Wizard session registry: one controller per mounted wizard, with
//! broadcast of state changes to WebSocket clients.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, RwLock, broadcast};
use tracing::{debug, info};
use uuid::Uuid;

use super::controller::{WizardAction, WizardController, WizardDeps, WizardSnapshot};
use crate::error::{self, SessionError};

/// Per-session broadcast channel capacity.
const SESSION_BROADCAST_CAPACITY: usize = 64;

/// How often the pruning task looks for idle sessions.
const PRUNE_INTERVAL: Duration = Duration::from_secs(60);

struct Session {
    /// Held for the whole of one action, so events for a session apply in
    /// order and one at a time.
    controller: Mutex<WizardController>,
    tx: broadcast::Sender<WizardSnapshot>,
    last_touched: std::sync::Mutex<Instant>,
}

impl Session {
    fn touch(&self) {
        if let Ok(mut last) = self.last_touched.lock() {
            *last = Instant::now();
        }
    }

    fn idle_for(&self) -> Duration {
        self.last_touched
            .lock()
            .map(|last| last.elapsed())
            .unwrap_or_default()
    }
}

/// In-memory registry of mounted wizards. Nothing outlives the process.
pub struct WizardSessions {
    sessions: RwLock<HashMap<Uuid, Arc<Session>>>,
    deps: WizardDeps,
}

impl WizardSessions {
    pub fn new(deps: WizardDeps) -> Arc<Self> {
        Arc::new(Self {
            sessions: RwLock::new(HashMap::new()),
            deps,
        })
    }

    /// Mount a fresh wizard at step 1 with default form state.
    pub async fn mount(&self) -> WizardSnapshot {
        let id = Uuid::new_v4();
        let controller = WizardController::new(id);
        let snapshot = controller.snapshot();
        let (tx, _rx) = broadcast::channel(SESSION_BROADCAST_CAPACITY);

        self.sessions.write().await.insert(
            id,
            Arc::new(Session {
                controller: Mutex::new(controller),
                tx,
                last_touched: std::sync::Mutex::new(Instant::now()),
            }),
        );

        info!(session_id = %id, "Wizard mounted");
        snapshot
    }

    /// Unmount a wizard, discarding its state.
    pub async fn unmount(&self, id: Uuid) -> Result<(), SessionError> {
        match self.sessions.write().await.remove(&id) {
            Some(_) => {
                info!(session_id = %id, "Wizard unmounted");
                Ok(())
            }
            None => Err(SessionError::NotFound { id }),
        }
    }

    pub async fn snapshot(&self, id: Uuid) -> Result<WizardSnapshot, SessionError> {
        let session = self.session(id).await?;
        let controller = session.controller.lock().await;
        Ok(controller.snapshot())
    }

    /// Apply one action and broadcast the resulting snapshot.
    ///
    /// A collaborator failure leaves the state as it was; nothing is
    /// broadcast in that case.
    pub async fn apply(&self, id: Uuid, action: WizardAction) -> error::Result<WizardSnapshot> {
        let session = self.session(id).await?;
        let mut controller = session.controller.lock().await;

        debug!(session_id = %id, ?action, "Applying wizard action");
        controller.apply(action, &self.deps).await?;

        let snapshot = controller.snapshot();
        // Ok if no WS clients are listening
        let _ = session.tx.send(snapshot.clone());
        Ok(snapshot)
    }

    /// Subscribe to state changes, returning the current snapshot first.
    pub async fn subscribe(
        &self,
        id: Uuid,
    ) -> Result<(WizardSnapshot, broadcast::Receiver<WizardSnapshot>), SessionError> {
        let session = self.session(id).await?;
        // Lock first so no change can slip between snapshot and subscribe.
        let controller = session.controller.lock().await;
        let rx = session.tx.subscribe();
        Ok((controller.snapshot(), rx))
    }

    /// Number of mounted wizards.
    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Unmount sessions nobody has touched for `idle_timeout`. Sessions
    /// with a live WebSocket subscriber are kept. Returns how many were
    /// removed.
    pub async fn prune_stale(&self, idle_timeout: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|id, session| {
            let keep = session.tx.receiver_count() > 0 || session.idle_for() < idle_timeout;
            if !keep {
                info!(session_id = %id, "Pruning idle wizard session");
            }
            keep
        });
        let pruned = before - sessions.len();
        if pruned > 0 {
            debug!(pruned, remaining = sessions.len(), "Pruned idle wizard sessions");
        }
        pruned
    }

    async fn session(&self, id: Uuid) -> Result<Arc<Session>, SessionError> {
        let session = self
            .sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(SessionError::NotFound { id })?;
        session.touch();
        Ok(session)
    }
}

/// Spawn a background task that periodically unmounts idle sessions.
pub fn spawn_pruning_task(
    sessions: Arc<WizardSessions>,
    idle_timeout: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PRUNE_INTERVAL);
        interval.tick().await; // Skip immediate first tick
        loop {
            interval.tick().await;
            sessions.prune_stale(idle_timeout).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::SubmissionPolicy;
    use crate::error::Error;
    use crate::onboarding::collaborators::{LoggingIngestion, StubOAuthConnector};
    use crate::onboarding::model::{FieldUpdate, ListField};
    use crate::onboarding::state::WizardStep;

    fn registry() -> Arc<WizardSessions> {
        WizardSessions::new(WizardDeps {
            ingestion: Arc::new(LoggingIngestion),
            oauth: Arc::new(StubOAuthConnector),
            timeout: Duration::from_secs(1),
            policy: SubmissionPolicy::default(),
        })
    }

    #[tokio::test]
    async fn mount_starts_at_first_step() {
        let sessions = registry();
        let snapshot = sessions.mount().await;
        assert_eq!(snapshot.position, 1);
        assert_eq!(snapshot.step, WizardStep::CompanyInfo);
        assert_eq!(sessions.count().await, 1);
    }

    #[tokio::test]
    async fn sessions_are_independent() {
        let sessions = registry();
        let a = sessions.mount().await.session_id;
        let b = sessions.mount().await.session_id;

        sessions
            .apply(
                a,
                WizardAction::UpdateField(FieldUpdate::CompanyName("Acme".to_string())),
            )
            .await
            .unwrap();
        sessions.apply(a, WizardAction::Advance).await.unwrap();

        let b_snapshot = sessions.snapshot(b).await.unwrap();
        assert_eq!(b_snapshot.position, 1);
        assert!(b_snapshot.form.company_name.is_empty());
        assert_eq!(sessions.snapshot(a).await.unwrap().position, 2);
    }

    #[tokio::test]
    async fn unmount_discards_state() {
        let sessions = registry();
        let id = sessions.mount().await.session_id;
        sessions.unmount(id).await.unwrap();

        assert!(matches!(
            sessions.snapshot(id).await,
            Err(SessionError::NotFound { .. })
        ));
        assert!(sessions.unmount(id).await.is_err());
        assert!(matches!(
            sessions.apply(id, WizardAction::Advance).await,
            Err(Error::Session(SessionError::NotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn idle_sessions_are_pruned() {
        let sessions = registry();
        let idle = sessions.mount().await.session_id;
        let active = sessions.mount().await.session_id;

        assert_eq!(sessions.prune_stale(Duration::from_secs(3600)).await, 0);

        tokio::time::sleep(Duration::from_millis(50)).await;
        sessions.apply(active, WizardAction::Advance).await.unwrap();

        assert_eq!(sessions.prune_stale(Duration::from_millis(30)).await, 1);
        assert!(matches!(
            sessions.snapshot(idle).await,
            Err(SessionError::NotFound { .. })
        ));
        assert_eq!(sessions.snapshot(active).await.unwrap().position, 2);
        assert_eq!(sessions.count().await, 1);
    }

    #[tokio::test]
    async fn subscribed_sessions_survive_pruning() {
        let sessions = registry();
        let id = sessions.mount().await.session_id;
        let (_initial, _rx) = sessions.subscribe(id).await.unwrap();

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(sessions.prune_stale(Duration::from_millis(1)).await, 0);
        assert_eq!(sessions.count().await, 1);
    }

    #[tokio::test]
    async fn subscribers_receive_applied_snapshots() {
        let sessions = registry();
        let id = sessions.mount().await.session_id;
        let (initial, mut rx) = sessions.subscribe(id).await.unwrap();
        assert_eq!(initial.position, 1);

        sessions
            .apply(
                id,
                WizardAction::AddEntry {
                    field: ListField::TargetLocations,
                    value: "Paris".to_string(),
                },
            )
            .await
            .unwrap();

        let update = rx.recv().await.unwrap();
        assert_eq!(update.form.target_locations, vec!["Paris"]);
    }
}
