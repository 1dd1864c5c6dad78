use log::warn;
use serde::Deserialize;
use std::time::Duration;

/// Address the camera answers on when a client joins its own access point.
pub const DEFAULT_ADDRESS: &str = "10.98.32.1";

/// Deadline applied to every request unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) const ADDRESS_ENV: &str = "ZCAM_ADDRESS";
pub(crate) const TIMEOUT_ENV: &str = "ZCAM_TIMEOUT_SECS";

/// Connection settings for a [`crate::ZCam`].
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// Host, optionally with a port (`10.98.32.1`, `192.168.1.20:8080`)
    pub address: String,
    /// Whole-exchange deadline, body included; `None` waits indefinitely.
    /// Given in seconds when deserialized, `0` or `null` meaning none.
    #[serde(with = "secs")]
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

impl ClientConfig {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::default()
        }
    }

    /// Deadline in whole seconds; `0` disables it.
    pub fn set_timeout_secs(&mut self, secs: u64) {
        self.timeout = secs_to_timeout(secs);
    }

    /// Defaults overlaid with `ZCAM_ADDRESS` / `ZCAM_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self::default().overlay(
            std::env::var(ADDRESS_ENV).ok(),
            std::env::var(TIMEOUT_ENV).ok(),
        )
    }

    fn overlay(mut self, address: Option<String>, timeout: Option<String>) -> Self {
        if let Some(address) = address.filter(|a| !a.trim().is_empty()) {
            self.address = address.trim().to_string();
        }
        if let Some(raw) = timeout {
            match raw.trim().parse::<u64>() {
                Ok(secs) => self.set_timeout_secs(secs),
                Err(e) => warn!("[ZCam] Ignoring {}={:?}: {}", TIMEOUT_ENV, raw, e),
            }
        }
        self
    }
}

/// Per-download options for [`crate::ZCam::pull`] and [`crate::ZCam::pull_video`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PullOptions {
    /// Fetch the camera's low-bitrate proxy file instead of the original
    pub proxy: bool,
    /// Deadline for each file download; `None` uses the client default.
    /// The deadline covers the whole body, so multi-gigabyte clips need a
    /// generous value (or a client built without a timeout).
    pub timeout: Option<Duration>,
}

impl PullOptions {
    pub fn proxy(mut self, proxy: bool) -> Self {
        self.proxy = proxy;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

fn secs_to_timeout(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

mod secs {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(d)?.and_then(super::secs_to_timeout))
    }
}
