//! One-time license notice

use std::sync::atomic::{AtomicBool, Ordering};
use tracing::warn;

const LICENSE_NOTICE: &str = "KuCoin connector is distributed under the Business Source License 1.1; \
production use by for-profit organizations requires a commercial license";

/// Logs the license notice at most once per client
///
/// Cloned clients share the notice through the client's `Arc`.
#[derive(Debug)]
pub struct LicenseNotice {
    enabled: bool,
    logged: AtomicBool,
}

impl LicenseNotice {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            logged: AtomicBool::new(false),
        }
    }

    /// Log the notice if it has not been logged yet
    ///
    /// Returns `true` only for the call that logged it.
    pub fn log_once(&self) -> bool {
        if !self.enabled || self.logged.swap(true, Ordering::Relaxed) {
            return false;
        }
        warn!("{}", LICENSE_NOTICE);
        true
    }

    pub fn is_logged(&self) -> bool {
        self.logged.load(Ordering::Relaxed)
    }
}

impl Default for LicenseNotice {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logs_once() {
        let notice = LicenseNotice::default();
        assert!(!notice.is_logged());
        assert!(notice.log_once());
        assert!(!notice.log_once());
        assert!(notice.is_logged());
    }

    #[test]
    fn test_disabled_never_logs() {
        let notice = LicenseNotice::new(false);
        assert!(!notice.log_once());
        assert!(!notice.is_logged());
    }
}
