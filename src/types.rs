use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mode transition requested through `ctrl/mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Record,
    Playback,
    Standby,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Record => "to_rec",
            Mode::Playback => "to_pb",
            Mode::Standby => "to_standby",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operating state reported by `ctrl/mode?action=query`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Capture,
    Capturing,
    CaptureBurst,
    CaptureTimelapseIdle,
    CaptureTimelapse,
    Playback,
    Playing,
    PlaybackPaused,
    Record,
    Recording,
    RecordPaused,
    RecordTimelapseIdle,
    RecordTimelapse,
    Standby,
    /// The camera itself says it doesn't know
    Unknown,
}

impl Status {
    const ALL: [Status; 15] = [
        Status::Capture,
        Status::Capturing,
        Status::CaptureBurst,
        Status::CaptureTimelapseIdle,
        Status::CaptureTimelapse,
        Status::Playback,
        Status::Playing,
        Status::PlaybackPaused,
        Status::Record,
        Status::Recording,
        Status::RecordPaused,
        Status::RecordTimelapseIdle,
        Status::RecordTimelapse,
        Status::Standby,
        Status::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Capture => "cap",
            Status::Capturing => "cap_ing",
            Status::CaptureBurst => "cap_burst",
            Status::CaptureTimelapseIdle => "cap_tl_idle",
            Status::CaptureTimelapse => "cap_tl_ing",
            Status::Playback => "pb",
            Status::Playing => "pb_ing",
            Status::PlaybackPaused => "pb_paused",
            Status::Record => "rec",
            Status::Recording => "rec_ing",
            Status::RecordPaused => "rec_paused",
            Status::RecordTimelapseIdle => "rec_tl_idle",
            Status::RecordTimelapse => "rec_tl_ing",
            Status::Standby => "standby",
            Status::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| Error::Parse(format!("unrecognized status {:?}", s)))
    }
}

/// One camera setting as reported by `ctrl/get`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Setting {
    pub key: String,
    pub value: String,
    pub read_only: bool,
    /// Values the camera will accept; empty for free-form settings
    pub opts: Vec<String>,
}
