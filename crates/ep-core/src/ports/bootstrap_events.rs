use anyhow::Result;
use async_trait::async_trait;

use crate::bootstrap::Notice;

/// Signals exposed to the presentation layer.
#[async_trait]
pub trait BootstrapEventEmitter: Send + Sync {
    /// Stop rendering the splash/preloader and show the main application.
    async fn emit_bootstrap_complete(&self) -> Result<()>;

    /// Present the one-shot notice modal.
    async fn emit_show_notices(&self, notices: Vec<Notice>) -> Result<()>;
}
