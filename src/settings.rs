use crate::client::{Envelope, ZCam};
use crate::error::Result;
use crate::types::Setting;

impl ZCam {
    async fn query_setting(&self, key: &str) -> Result<Envelope> {
        self.request_envelope(&format!("ctrl/get?k={}", key)).await
    }

    /// Value, options and read-only flag from a single `ctrl/get`.
    pub async fn get_setting(&self, key: &str) -> Result<Setting> {
        let reply = self.query_setting(key).await?;
        Ok(Setting {
            key: key.to_string(),
            value: reply.text("value")?,
            read_only: reply.flag("ro"),
            opts: reply.texts("opts")?,
        })
    }

    pub async fn get_setting_value(&self, key: &str) -> Result<String> {
        self.query_setting(key).await?.text("value")
    }

    pub async fn get_setting_opts(&self, key: &str) -> Result<Vec<String>> {
        self.query_setting(key).await?.texts("opts")
    }

    pub async fn is_read_only(&self, key: &str) -> Result<bool> {
        Ok(self.query_setting(key).await?.flag("ro"))
    }

    /// The camera takes the setting name itself as the query key:
    /// `ctrl/set?iso=400`, not `ctrl/set?k=iso&v=400`.
    pub async fn set_setting_value(&self, key: &str, value: &str) -> Result<()> {
        self.request_envelope(&format!("ctrl/set?{}={}", key, value)).await?;
        Ok(())
    }
}
