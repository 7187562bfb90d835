//! Router configuration.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Upper bound on a single call to a single replica. Expiry counts as a
    /// transport failure.
    pub call_timeout: Duration,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            call_timeout: Duration::from_secs(2),
        }
    }
}
