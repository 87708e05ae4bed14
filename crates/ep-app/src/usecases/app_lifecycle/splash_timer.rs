use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use super::readiness::SplashTimerSignal;

/// Start the splash timer; `signal` fires once `duration` has passed.
///
/// Aborting the returned handle (teardown) leaves the flag unset.
pub fn start_splash_timer(duration: Duration, signal: SplashTimerSignal) -> JoinHandle<()> {
    debug!(duration_ms = duration.as_millis() as u64, "splash timer started");
    tokio::spawn(async move {
        tokio::time::sleep(duration).await;
        signal.elapsed();
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::app_lifecycle::ReadinessLatch;

    #[tokio::test(start_paused = true)]
    async fn timer_fires_after_configured_duration() {
        let latch = ReadinessLatch::new();
        let handle = start_splash_timer(Duration::from_secs(3), latch.timer_signal());

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert!(!latch.snapshot().readiness.splash_timer_elapsed);

        handle.await.unwrap();
        assert!(latch.snapshot().readiness.splash_timer_elapsed);
    }
}
