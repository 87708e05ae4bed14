use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use ep_core::bootstrap::Notice;
use ep_core::ports::{BootstrapEventEmitter, NavigatorPort};
use tracing::info;

/// Reports bootstrap signals through the log instead of a view switcher.
#[derive(Default)]
pub struct LoggingBootstrapEmitter;

#[async_trait]
impl BootstrapEventEmitter for LoggingBootstrapEmitter {
    async fn emit_bootstrap_complete(&self) -> Result<()> {
        info!(target: "exampad::ui", "bootstrap complete; main view shown");
        Ok(())
    }

    async fn emit_show_notices(&self, notices: Vec<Notice>) -> Result<()> {
        for notice in &notices {
            info!(target: "exampad::ui", id = %notice.id, title = %notice.title, "notice");
        }
        info!(target: "exampad::ui", count = notices.len(), "notice modal shown");
        Ok(())
    }
}

/// Single-entry history: `replace` overwrites the current location.
pub struct HeadlessNavigator {
    current: Mutex<String>,
}

impl HeadlessNavigator {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            current: Mutex::new(initial.into()),
        }
    }

    pub fn current(&self) -> String {
        match self.current.lock() {
            Ok(current) => current.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl NavigatorPort for HeadlessNavigator {
    async fn replace(&self, location: &str) -> Result<()> {
        let mut current = match self.current.lock() {
            Ok(current) => current,
            Err(poisoned) => poisoned.into_inner(),
        };
        info!(from = %*current, to = %location, "navigation replaced");
        *current = location.to_string();
        Ok(())
    }
}
