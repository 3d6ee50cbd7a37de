//! Notification requests as accepted from callers and from the webview.

use crate::config::SizingOverride;
use crate::error::RequestError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const DEFAULT_DURATION_MS: u64 = 4500;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Success,
    Error,
    Info,
    Warning,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Info => "info",
            NotificationKind::Warning => "warning",
        }
    }
}

impl FromStr for NotificationKind {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(NotificationKind::Success),
            "error" => Ok(NotificationKind::Error),
            "info" => Ok(NotificationKind::Info),
            "warning" => Ok(NotificationKind::Warning),
            other => Err(RequestError::UnknownKind(other.to_string())),
        }
    }
}

/// A validated notification. Superseded by the next one, never queued.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRequest {
    pub kind: NotificationKind,
    pub message: String,
    /// Preset name, inline `<svg>` markup or image path
    pub icon: Option<String>,
    pub icon_size: Option<u32>,
    pub icon_width: Option<u32>,
    pub icon_height: Option<u32>,
    pub icon_gap: Option<u32>,
    pub sizing: Option<SizingOverride>,
    pub duration_ms: u64,
    pub font_family: Option<String>,
    pub font_size: Option<String>,
    pub color: Option<String>,
    pub animation: Option<String>,
    pub glow: Option<bool>,
    pub dev_mode: Option<bool>,
    pub sound_file: Option<String>,
}

impl NotificationRequest {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            icon: None,
            icon_size: None,
            icon_width: None,
            icon_height: None,
            icon_gap: None,
            sizing: None,
            duration_ms: DEFAULT_DURATION_MS,
            font_family: None,
            font_size: None,
            color: None,
            animation: None,
            glow: None,
            dev_mode: None,
            sound_file: None,
        }
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_sizing(mut self, sizing: SizingOverride) -> Self {
        self.sizing = Some(sizing);
        self
    }

    pub fn validate(&self) -> Result<(), RequestError> {
        if self.message.is_empty() {
            return Err(RequestError::EmptyMessage);
        }
        Ok(())
    }
}

/// Loosely typed `show` arguments, shaped like the JavaScript API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShowOptions {
    #[serde(rename = "type", alias = "kind")]
    pub kind: Option<String>,
    pub message: serde_json::Value,
    pub icon: Option<String>,
    pub icon_size: Option<u32>,
    pub icon_width: Option<u32>,
    pub icon_height: Option<u32>,
    pub icon_gap: Option<u32>,
    pub sizing: Option<SizingOverride>,
    #[serde(alias = "durationMs")]
    pub duration: Option<u64>,
    pub font_family: Option<String>,
    pub font_size: Option<String>,
    pub color: Option<String>,
    pub animation: Option<String>,
    pub glow: Option<bool>,
    pub dev_mode: Option<bool>,
    pub sound_file: Option<String>,
}

impl TryFrom<ShowOptions> for NotificationRequest {
    type Error = RequestError;

    fn try_from(options: ShowOptions) -> Result<Self, Self::Error> {
        let kind = match options.kind.as_deref() {
            Some(kind) => kind.parse()?,
            None => NotificationKind::default(),
        };
        let message = match options.message {
            serde_json::Value::String(message) => message,
            _ => return Err(RequestError::MessageNotString),
        };

        let request = NotificationRequest {
            kind,
            message,
            icon: options.icon,
            icon_size: options.icon_size,
            icon_width: options.icon_width,
            icon_height: options.icon_height,
            icon_gap: options.icon_gap,
            sizing: options.sizing,
            duration_ms: options.duration.unwrap_or(DEFAULT_DURATION_MS),
            font_family: options.font_family,
            font_size: options.font_size,
            color: options.color,
            animation: options.animation,
            glow: options.glow,
            dev_mode: options.dev_mode,
            sound_file: options.sound_file,
        };
        request.validate()?;
        Ok(request)
    }
}

/// Content height reported by the renderer. Fire-and-forget.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResizeRequest {
    pub height: f64,
    /// Notification the measurement belongs to; stale ids are dropped
    #[serde(default)]
    pub id: Option<String>,
}

impl ResizeRequest {
    pub fn new(height: u32, id: Option<String>) -> Self {
        Self {
            height: height as f64,
            id,
        }
    }

    /// Rounded, non-negative pixel height. Upper bounds are left to geometry.
    pub fn content_height(&self) -> u32 {
        if !self.height.is_finite() {
            return 0;
        }
        self.height.round().clamp(0.0, u32::MAX as f64) as u32
    }
}
