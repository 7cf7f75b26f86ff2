//! Bearer credential shared between the refresh task and request handlers.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::provider::Authenticator;

/// Latest known bearer token. Cloning shares the same cell.
///
/// Empty until the first successful refresh.
#[derive(Clone, Default)]
pub struct CredentialStore {
    token: Arc<RwLock<String>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> String {
        self.token.read().clone()
    }

    pub fn set(&self, token: impl Into<String>) {
        *self.token.write() = token.into();
    }
}

/// Timing of the refresh loop.
#[derive(Debug, Clone, Copy)]
pub struct RefreshSchedule {
    /// How long a token is trusted before re-authenticating.
    pub interval: Duration,
    /// Wait after a failed attempt.
    pub retry_backoff: Duration,
}

impl Default for RefreshSchedule {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30 * 24 * 60 * 60),
            retry_backoff: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RefreshState {
    Refreshing,
    Idle { until: Instant },
}

/// Keep `store` populated with a valid token until `cancel` fires.
///
/// Authenticates immediately, then again every `schedule.interval`. Failed
/// attempts are retried after `schedule.retry_backoff`, indefinitely.
pub async fn run_refresher(
    authenticator: Arc<dyn Authenticator>,
    store: CredentialStore,
    schedule: RefreshSchedule,
    cancel: CancellationToken,
) {
    info!("credential refresher started");
    let mut state = RefreshState::Refreshing;

    loop {
        state = match state {
            RefreshState::Refreshing => {
                info!("refreshing TVDB access token");
                let result = tokio::select! {
                    result = authenticator.authenticate() => result,
                    _ = cancel.cancelled() => break,
                };

                match result {
                    Ok(token) => {
                        store.set(token);
                        info!("refreshed TVDB access token");
                        RefreshState::Idle {
                            until: Instant::now() + schedule.interval,
                        }
                    }
                    Err(e) => {
                        error!(error = %e, "error refreshing TVDB access token, retrying");
                        RefreshState::Idle {
                            until: Instant::now() + schedule.retry_backoff,
                        }
                    }
                }
            }
            RefreshState::Idle { until } => {
                tokio::select! {
                    _ = tokio::time::sleep_until(until) => RefreshState::Refreshing,
                    _ = cancel.cancelled() => break,
                }
            }
        };
    }

    info!("credential refresher stopped");
}
