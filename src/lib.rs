//! Async client for the Z CAM HTTP control API.
//!
//! ```no_run
//! # async fn run() -> zcam::Result<()> {
//! let cam = zcam::ZCam::new("10.98.32.1");
//! cam.mode(zcam::Mode::Record).await?;
//! cam.set_setting_value("iso", "800").await?;
//! cam.recording_start().await?;
//! println!("{}", cam.status().await?);
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod media;
mod settings;
mod types;

pub use client::ZCam;
pub use config::{ClientConfig, PullOptions, DEFAULT_ADDRESS, DEFAULT_TIMEOUT};
pub use error::{Error, Result};
pub use types::{Mode, Status, Setting};
