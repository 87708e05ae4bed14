use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ep_core::ports::BootstrapEventEmitter;
use tracing::{debug, info, info_span, warn, Instrument};

use super::readiness::ReadinessLatch;

/// Fixed pause between the main view appearing and the notice modal.
pub const DEFAULT_NOTICE_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerOutcome {
    Ready { notices_shown: bool },
    /// `MainReady` was already reached by an earlier run.
    AlreadyReady,
}

/// Bootstrap sequencer: `AwaitingAll → MainReady`.
///
/// ## Behavior / 行为
/// - Waits passively on the [`ReadinessLatch`]; producers push their own
///   transitions, nothing is polled
/// - Emits "bootstrap complete" exactly once
/// - Then, if notices are queued and the user is signed in or an explicit
///   guest, waits the notice delay and emits them once per process
pub struct BootstrapSequencer {
    latch: Arc<ReadinessLatch>,
    emitter: Arc<dyn BootstrapEventEmitter>,
    notice_delay: Duration,
    main_ready: AtomicBool,
    notice_fired: AtomicBool,
}

impl BootstrapSequencer {
    pub fn new(
        latch: Arc<ReadinessLatch>,
        emitter: Arc<dyn BootstrapEventEmitter>,
        notice_delay: Duration,
    ) -> Self {
        Self {
            latch,
            emitter,
            notice_delay,
            main_ready: AtomicBool::new(false),
            notice_fired: AtomicBool::new(false),
        }
    }

    pub fn is_main_ready(&self) -> bool {
        self.main_ready.load(Ordering::SeqCst)
    }

    pub async fn run(&self) -> SequencerOutcome {
        let span = info_span!("usecase.bootstrap_sequencer.run");

        async {
            let state = self.latch.wait_ready().await;

            if self.main_ready.swap(true, Ordering::SeqCst) {
                debug!("main view already ready");
                return SequencerOutcome::AlreadyReady;
            }

            info!(auth = ?state.readiness.auth, "bootstrap complete");
            if let Err(err) = self.emitter.emit_bootstrap_complete().await {
                warn!(error = %err, "failed to emit bootstrap complete");
            }

            let wants_notices =
                !state.notices.is_empty() && state.readiness.auth.may_see_notices();
            if !wants_notices {
                debug!(
                    notices = state.notices.len(),
                    auth = ?state.readiness.auth,
                    "no notice modal this session"
                );
                return SequencerOutcome::Ready {
                    notices_shown: false,
                };
            }

            if self.notice_fired.swap(true, Ordering::SeqCst) {
                return SequencerOutcome::Ready {
                    notices_shown: false,
                };
            }

            tokio::time::sleep(self.notice_delay).await;
            let count = state.notices.len();
            if let Err(err) = self.emitter.emit_show_notices(state.notices).await {
                warn!(error = %err, "failed to emit notices");
            }
            info!(count, "notice modal shown");

            SequencerOutcome::Ready {
                notices_shown: true,
            }
        }
        .instrument(span)
        .await
    }
}
