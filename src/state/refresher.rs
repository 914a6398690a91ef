use crate::state::messages::NetworkRequest;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

/// Periodic homepage reload. Live status changes by the minute, and the
/// homepage is the only view that is not user-triggered.
pub struct PeriodicRefresher {
    network_requests: mpsc::Sender<NetworkRequest>,
    period: Duration,
}

impl PeriodicRefresher {
    pub fn new(network_requests: mpsc::Sender<NetworkRequest>, period: Duration) -> Self {
        Self { network_requests, period }
    }

    pub async fn run(self) {
        let mut homepage_interval = interval(self.period);
        // Skip the immediate first tick so startup loading isn't double-triggered.
        homepage_interval.tick().await;

        loop {
            homepage_interval.tick().await;
            if self
                .network_requests
                .send(NetworkRequest::LoadHomepage)
                .await
                .is_err()
            {
                break;
            }
        }
    }
}
