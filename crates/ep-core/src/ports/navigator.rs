use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait NavigatorPort: Send + Sync {
    /// Navigate to `location` replacing the current history entry.
    async fn replace(&self, location: &str) -> Result<()>;
}
