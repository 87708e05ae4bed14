use std::time::{Duration, Instant};

use async_trait::async_trait;
use ep_core::ports::ConnectivityPort;
use tokio::sync::Mutex;
use tracing::debug;

const DEFAULT_PROBE_TTL: Duration = Duration::from_secs(30);

/// Reports online when a HEAD request to the probe URL gets any HTTP answer.
///
/// Status codes are irrelevant here: a `404` still proves the network path
/// works. Only transport failures (DNS, connect, timeout) count as offline.
///
/// The answer is remembered for a short TTL so that callers asking several
/// times during one bootstrap pay for a single probe.
pub struct HttpConnectivityProbe {
    client: reqwest::Client,
    probe_url: String,
    ttl: Duration,
    last: Mutex<Option<(Instant, bool)>>,
}

impl HttpConnectivityProbe {
    pub fn new(client: reqwest::Client, probe_url: impl Into<String>) -> Self {
        Self {
            client,
            probe_url: probe_url.into(),
            ttl: DEFAULT_PROBE_TTL,
            last: Mutex::new(None),
        }
    }

    async fn probe(&self) -> bool {
        match self.client.head(&self.probe_url).send().await {
            Ok(_) => true,
            Err(err) => {
                debug!(url = %self.probe_url, error = %err, "connectivity probe failed");
                false
            }
        }
    }
}

#[async_trait]
impl ConnectivityPort for HttpConnectivityProbe {
    async fn is_online(&self) -> bool {
        // Held across the probe so concurrent callers share one request.
        let mut last = self.last.lock().await;
        if let Some((at, online)) = *last {
            if at.elapsed() < self.ttl {
                return online;
            }
        }

        let online = self.probe().await;
        *last = Some((Instant::now(), online));
        online
    }
}

/// Connectivity fixed at construction, e.g. for `--offline`.
pub struct FixedConnectivity(pub bool);

#[async_trait]
impl ConnectivityPort for FixedConnectivity {
    async fn is_online(&self) -> bool {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn any_http_answer_counts_as_online() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("HEAD", "/health")
            .with_status(500)
            .create_async()
            .await;

        let probe = HttpConnectivityProbe::new(
            reqwest::Client::new(),
            format!("{}/health", server.url()),
        );

        assert!(probe.is_online().await);
    }

    #[tokio::test]
    async fn answer_is_reused_within_ttl() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("HEAD", "/health")
            .with_status(204)
            .expect(1)
            .create_async()
            .await;

        let probe = HttpConnectivityProbe::new(
            reqwest::Client::new(),
            format!("{}/health", server.url()),
        );

        assert!(probe.is_online().await);
        assert!(probe.is_online().await);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn unreachable_host_is_offline() {
        // Port 9 (discard) on localhost is closed on any sane test machine.
        let probe = HttpConnectivityProbe::new(reqwest::Client::new(), "http://127.0.0.1:9/");
        assert!(!probe.is_online().await);
    }

    #[tokio::test]
    async fn fixed_connectivity_reports_its_value() {
        assert!(FixedConnectivity(true).is_online().await);
        assert!(!FixedConnectivity(false).is_online().await);
    }
}
