use std::sync::{Arc, Mutex};

use anyhow::Result;
use ep_core::payment::PaymentCallback;
use ep_core::ports::NavigatorPort;
use tracing::{debug, info, info_span, Instrument};

/// Rewrite payment provider callbacks onto the unified result path.
///
/// Safe to run on every navigation: a location that no longer matches
/// either callback shape is a no-op, and the same raw location is never
/// redirected twice in a row.
pub struct NormalizePaymentCallback {
    navigator: Arc<dyn NavigatorPort>,
    last_handled: Mutex<Option<String>>,
}

impl NormalizePaymentCallback {
    pub fn new(navigator: Arc<dyn NavigatorPort>) -> Self {
        Self {
            navigator,
            last_handled: Mutex::new(None),
        }
    }

    /// Returns the redirect target when a replace-navigation was issued.
    pub async fn execute(&self, location: &str) -> Result<Option<String>> {
        let span = info_span!("usecase.normalize_payment_callback.execute", %location);

        async {
            let Some(callback) = PaymentCallback::from_location(location) else {
                self.remember(None);
                return Ok(None);
            };

            if self.last_handled().as_deref() == Some(location) {
                debug!("payment callback already redirected");
                return Ok(None);
            }

            let target = callback.redirect_target();
            self.navigator.replace(&target).await?;
            self.remember(Some(location.to_string()));

            info!(status = callback.status.code(), %target, "payment callback normalized");
            Ok(Some(target))
        }
        .instrument(span)
        .await
    }

    fn last_handled(&self) -> Option<String> {
        match self.last_handled.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn remember(&self, location: Option<String>) {
        let mut guard = match self.last_handled.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = location;
    }
}
