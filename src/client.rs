use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::types::{Mode, Status};
use chrono::{Local, NaiveDateTime};
use log::{debug, warn};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;

/// Handle to one camera on the network.
///
/// Holds only its address, default timeout and a pooled HTTP client; every
/// method is a single independent exchange, so a shared `&ZCam` can be used
/// from many tasks at once.
#[derive(Debug, Clone)]
pub struct ZCam {
    address: String,
    timeout: Option<Duration>,
    http: Client,
}

impl Default for ZCam {
    fn default() -> Self {
        Self::with_config(ClientConfig::default())
    }
}

impl ZCam {
    pub fn new(address: impl Into<String>) -> Self {
        Self::with_config(ClientConfig::new(address))
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            address: config.address,
            timeout: config.timeout,
            // Cameras sit on the local link; system proxies never apply.
            http: Client::builder().no_proxy().build().unwrap_or_default(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    // ============ Request primitive ============

    /// GET `http://<address>/<path>`. Anything but a 200 is an error and the
    /// body is left unread.
    pub(crate) async fn request(&self, path: &str, timeout: Option<Duration>) -> Result<Response> {
        let url = format!("http://{}/{}", self.address, path);
        debug!("[ZCam] GET {}", url);

        let mut builder = self.http.get(&url);
        if let Some(deadline) = timeout.or(self.timeout) {
            builder = builder.timeout(deadline);
        }
        let res = builder
            .send()
            .await
            .map_err(|e| {
                warn!("[ZCam] GET {} failed: {}", url, e);
                Error::Transport(e)
            })?;

        let status = res.status();
        if status != StatusCode::OK {
            warn!("[ZCam] GET {} returned {}", url, status);
            return Err(Error::Protocol(status.as_u16()));
        }
        Ok(res)
    }

    pub(crate) async fn request_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let body = self.request(path, None).await?.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| Error::Parse(format!("{}: {}", path, e)))
    }

    /// Decode a `{code, ...}` reply and fail on a nonzero code.
    pub(crate) async fn request_envelope(&self, path: &str) -> Result<Envelope> {
        let envelope: Envelope = self.request_json(path).await?;
        match envelope.code {
            Some(0) => Ok(envelope),
            Some(code) => {
                warn!("[ZCam] {} reported code {}", path, code);
                Err(Error::Device(code))
            }
            None => Err(Error::Parse(format!("{}: missing field \"code\"", path))),
        }
    }

    /// Fire-and-forget control call; the reply body is not inspected.
    async fn control(&self, path: &str) -> Result<()> {
        self.request(path, None).await?;
        Ok(())
    }

    // ============ Device info ============

    /// Raw JSON from the `info` endpoint (model, serial, firmware, ...).
    pub async fn info(&self) -> Result<Value> {
        self.request_json("info").await
    }

    // ============ Mode & status ============

    pub async fn mode(&self, mode: Mode) -> Result<()> {
        self.control(&format!("ctrl/mode?action={}", mode)).await
    }

    pub async fn status(&self) -> Result<Status> {
        self.request_envelope("ctrl/mode?action=query")
            .await?
            .text("msg")?
            .parse()
    }

    // ============ Recording ============

    pub async fn recording_start(&self) -> Result<()> {
        self.control("ctrl/rec?action=start").await
    }

    pub async fn recording_stop(&self) -> Result<()> {
        self.control("ctrl/rec?action=stop").await
    }

    pub async fn recording_remain(&self) -> Result<()> {
        self.control("ctrl/rec?action=remain").await
    }

    // ============ Power & session ============

    pub async fn reboot(&self) -> Result<()> {
        self.control("ctrl/reboot").await
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.control("ctrl/shutdown").await
    }

    pub async fn session_start(&self) -> Result<()> {
        self.control("ctrl/session").await
    }

    pub async fn session_quit(&self) -> Result<()> {
        self.control("ctrl/session?action=quit").await
    }

    // ============ Network ============

    /// Join the configured Wi-Fi router.
    pub async fn network_router(&self) -> Result<()> {
        self.control("ctrl/network?action=set&mode=Router").await
    }

    /// Go back to the camera's own access point.
    pub async fn network_direct(&self) -> Result<()> {
        self.control("ctrl/network?action=set&mode=Direct").await
    }

    pub async fn network_type(&self) -> Result<String> {
        let reply: Envelope = self.request_json("ctrl/network?action=query").await?;
        reply.text("value")
    }

    // ============ Clock ============

    /// Set the camera clock to the host's local time.
    pub async fn sync_date(&self) -> Result<()> {
        self.set_datetime(Local::now().naive_local()).await
    }

    pub async fn set_datetime(&self, at: NaiveDateTime) -> Result<()> {
        let path = format!(
            "datetime?date={}&time={}",
            at.format("%Y-%m-%d"),
            at.format("%H:%M:%S")
        );
        self.control(&path).await
    }
}

/// JSON reply carrying a status `code` next to endpoint-specific fields.
#[derive(Deserialize, Debug)]
pub(crate) struct Envelope {
    pub code: Option<i64>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl Envelope {
    /// A string field; numbers are accepted and rendered as text.
    pub fn text(&self, name: &str) -> Result<String> {
        let value = self
            .fields
            .get(name)
            .ok_or_else(|| Error::Parse(format!("missing field {:?}", name)))?;
        as_text(value).ok_or_else(|| {
            Error::Parse(format!("field {:?} is not text: {}", name, value))
        })
    }

    /// A list of strings; an absent field is an empty list.
    pub fn texts(&self, name: &str) -> Result<Vec<String>> {
        match self.fields.get(name) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    as_text(item).ok_or_else(|| {
                        Error::Parse(format!("field {:?} holds non-text entry {}", name, item))
                    })
                })
                .collect(),
            Some(other) => Err(Error::Parse(format!(
                "field {:?} is not a list: {}",
                name, other
            ))),
        }
    }

    /// True only when the field is the number 1.
    pub fn flag(&self, name: &str) -> bool {
        self.fields.get(name).and_then(Value::as_i64) == Some(1)
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(json: &str) -> Envelope {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn text_accepts_numbers() {
        let reply = envelope(r#"{"code":0,"value":400}"#);
        assert_eq!(reply.text("value").unwrap(), "400");
    }

    #[test]
    fn missing_text_is_parse_error() {
        let reply = envelope(r#"{"code":0}"#);
        assert!(matches!(reply.text("value"), Err(Error::Parse(_))));
    }

    #[test]
    fn texts_defaults_to_empty() {
        let reply = envelope(r#"{"code":0,"opts":["Auto","100",200]}"#);
        assert_eq!(reply.texts("opts").unwrap(), vec!["Auto", "100", "200"]);
        assert!(envelope(r#"{"code":0}"#).texts("opts").unwrap().is_empty());
        assert!(envelope(r#"{"code":0,"opts":"x"}"#).texts("opts").is_err());
    }

    #[test]
    fn flag_requires_one() {
        assert!(envelope(r#"{"code":0,"ro":1}"#).flag("ro"));
        assert!(!envelope(r#"{"code":0,"ro":0}"#).flag("ro"));
        assert!(!envelope(r#"{"code":0,"ro":true}"#).flag("ro"));
        assert!(!envelope(r#"{"code":0}"#).flag("ro"));
    }

    #[test]
    fn client_keeps_configuration() {
        let cam = ZCam::with_config(ClientConfig {
            address: "192.168.0.9:8080".into(),
            timeout: Some(Duration::from_secs(2)),
        });
        assert_eq!(cam.address(), "192.168.0.9:8080");
        assert_eq!(cam.timeout(), Some(Duration::from_secs(2)));
        assert_eq!(ZCam::default().address(), crate::config::DEFAULT_ADDRESS);
    }
}
