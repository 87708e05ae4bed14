use std::sync::Arc;

use ep_core::bootstrap::{AuthState, BootstrapReadiness, BootstrapView, Notice};
use tokio::sync::watch;
use tracing::debug;

/// Latest value of every readiness input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapState {
    pub readiness: BootstrapReadiness,
    /// Pending notices reported together with the data load.
    pub notices: Vec<Notice>,
}

/// Join point for the three independent readiness producers.
///
/// Each producer holds its own signal handle and pushes its single
/// false → true transition; later pushes are ignored, so no flag ever
/// reverts. Consumers either read a snapshot or await the conjunction.
pub struct ReadinessLatch {
    tx: Arc<watch::Sender<BootstrapState>>,
}

impl Default for ReadinessLatch {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadinessLatch {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(BootstrapState::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn timer_signal(&self) -> SplashTimerSignal {
        SplashTimerSignal {
            tx: self.tx.clone(),
        }
    }

    pub fn auth_signal(&self) -> AuthSignal {
        AuthSignal {
            tx: self.tx.clone(),
        }
    }

    pub fn data_signal(&self) -> DataSignal {
        DataSignal {
            tx: self.tx.clone(),
        }
    }

    pub fn snapshot(&self) -> BootstrapState {
        self.tx.borrow().clone()
    }

    pub fn view(&self) -> BootstrapView {
        self.tx.borrow().readiness.view()
    }

    /// Receiver for view switchers that re-render on every transition.
    pub fn subscribe(&self) -> watch::Receiver<BootstrapState> {
        self.tx.subscribe()
    }

    /// Resolve once all three flags hold.
    pub async fn wait_ready(&self) -> BootstrapState {
        let mut rx = self.tx.subscribe();
        let ready = rx
            .wait_for(|state| state.readiness.is_ready())
            .await
            .map(|state| state.clone());

        match ready {
            Ok(state) => state,
            // The latch owns the sender, so the channel cannot close under us.
            Err(_) => self.snapshot(),
        }
    }
}

#[derive(Clone)]
pub struct SplashTimerSignal {
    tx: Arc<watch::Sender<BootstrapState>>,
}

impl SplashTimerSignal {
    /// Returns `true` if this call performed the transition.
    pub fn elapsed(&self) -> bool {
        self.tx.send_if_modified(|state| {
            if state.readiness.splash_timer_elapsed {
                return false;
            }
            state.readiness.splash_timer_elapsed = true;
            debug!("splash timer elapsed");
            true
        })
    }
}

#[derive(Clone)]
pub struct AuthSignal {
    tx: Arc<watch::Sender<BootstrapState>>,
}

impl AuthSignal {
    /// Record the first definite auth state. `Unknown` is not a resolution.
    pub fn resolve(&self, auth: AuthState) -> bool {
        if !auth.is_resolved() {
            return false;
        }
        self.tx.send_if_modified(|state| {
            if state.readiness.auth_resolved() {
                return false;
            }
            state.readiness.auth = auth;
            debug!(?auth, "auth resolved");
            true
        })
    }
}

#[derive(Clone)]
pub struct DataSignal {
    tx: Arc<watch::Sender<BootstrapState>>,
}

impl DataSignal {
    /// Record bulk content load completion along with any pending notices.
    pub fn loaded(&self, notices: Vec<Notice>) -> bool {
        self.tx.send_if_modified(|state| {
            if state.readiness.data_loaded {
                return false;
            }
            state.readiness.data_loaded = true;
            state.notices = notices;
            debug!(notices = state.notices.len(), "bulk data loaded");
            true
        })
    }
}
