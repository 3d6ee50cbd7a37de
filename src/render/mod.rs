//! Resolves a request into the payload the webview renders.
//!
//! The webview only applies what it receives: icon, text styling, container
//! layout, animation class. It reports its content height back through the
//! resize channel and never touches window geometry itself.

pub mod icons;

use crate::config::{IslandOptions, SizingConfig};
use crate::display::DisplayInfo;
use crate::geometry::{self, ContainerLayout};
use crate::notification::{NotificationKind, NotificationRequest};
use serde::Serialize;
use std::path::PathBuf;

use self::icons::IconSource;

pub const DEFAULT_ICON_SIZE: u32 = 24;

/// Sound played alongside a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum SoundCue {
    Builtin(NotificationKind),
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "filter", rename_all = "camelCase")]
pub enum Glow {
    /// Stylesheet glow for the notification kind
    Default,
    Off,
    /// CSS `filter` matching a custom text colour
    Tinted(String),
}

/// Text overrides; `None` falls back to the stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IconDimensions {
    pub width: u32,
    pub height: u32,
    pub gap: Option<u32>,
}

/// Everything the webview needs for one notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    pub id: String,
    pub kind: NotificationKind,
    pub message: String,
    pub icon: IconSource,
    pub icon_dimensions: IconDimensions,
    pub sizing: SizingConfig,
    pub container: ContainerLayout,
    pub animation: Option<&'static str>,
    pub style: TextStyle,
    pub glow: Glow,
    pub dev_mode: bool,
    pub duration_ms: u64,
    pub sound: Option<SoundCue>,
    /// Native estimate; the webview may report a measured value instead
    pub content_height: u32,
}

fn positive(value: Option<u32>) -> Option<u32> {
    value.filter(|v| *v > 0)
}

/// width = width ∥ size ∥ 24, height = height ∥ size ∥ width ∥ 24
pub fn icon_dimensions(
    size: Option<u32>,
    width: Option<u32>,
    height: Option<u32>,
    gap: Option<u32>,
) -> IconDimensions {
    let size = positive(size);
    let width = positive(width);
    let height = positive(height);

    IconDimensions {
        width: width.or(size).unwrap_or(DEFAULT_ICON_SIZE),
        height: height.or(size).or(width).unwrap_or(DEFAULT_ICON_SIZE),
        gap: positive(gap),
    }
}

/// Icon animation name to its CSS class. Unknown names are ignored.
pub fn animation_class(name: &str) -> Option<&'static str> {
    match name {
        "pulse" => Some("animate-pulse"),
        "bounce" => Some("animate-bounce"),
        "spin" => Some("animate-spin"),
        "wobble" => Some("animate-wobble"),
        "fade" => Some("animate-fade"),
        "slide" => Some("animate-slide"),
        "none" => Some("no-animation"),
        _ => None,
    }
}

pub fn glow(enabled: Option<bool>, color: Option<&str>, icon: &IconSource) -> Glow {
    if enabled == Some(false) {
        return Glow::Off;
    }
    match color {
        // 73 hex is roughly 45% alpha
        Some(color) if !icon.is_image() => Glow::Tinted(format!("drop-shadow(0 0 10px {color}73)")),
        _ => Glow::Default,
    }
}

/// Explicit file, then the configured file for the kind, then the built-in
/// success/error cue. Info and warning are silent by default.
pub fn sound_cue(request: &NotificationRequest, options: &IslandOptions) -> Option<SoundCue> {
    if !options.enable_sounds {
        return None;
    }
    if let Some(file) = &request.sound_file {
        return Some(SoundCue::File(PathBuf::from(file)));
    }
    if let Some(file) = options.sounds.get(request.kind.as_str()) {
        return Some(SoundCue::File(file.clone()));
    }
    match request.kind {
        NotificationKind::Success | NotificationKind::Error => Some(SoundCue::Builtin(request.kind)),
        NotificationKind::Info | NotificationKind::Warning => None,
    }
}

/// Content height the renderer will need. The icon drives the row height.
pub fn estimate_content_height(dimensions: &IconDimensions) -> u32 {
    dimensions.height
}

/// Build the payload. Request fields win over construction options.
pub fn prepare(
    id: String,
    request: &NotificationRequest,
    options: &IslandOptions,
    display: &DisplayInfo,
    sizing: SizingConfig,
) -> NotificationPayload {
    let sizing = sizing.with_notch_height(geometry::notch_height(display, &sizing));

    let dimensions = icon_dimensions(
        request.icon_size.or(options.icon_size),
        request.icon_width.or(options.icon_width),
        request.icon_height.or(options.icon_height),
        request.icon_gap.or(options.icon_gap),
    );

    // Fixed mode lets an explicit size overflow the icon box; dynamic fits it
    let image_size = if sizing.grows_with_content() {
        None
    } else {
        positive(request.icon_size.or(options.icon_size))
    };
    let icon_ref = request.icon.as_deref().or(options.icon.as_deref());
    let icon = icons::resolve(icon_ref, request.kind, image_size);

    let content_height = estimate_content_height(&dimensions);
    let container = geometry::compute_layout(display, &sizing, Some(content_height)).container;

    NotificationPayload {
        id,
        kind: request.kind,
        message: request.message.clone(),
        glow: glow(request.glow, request.color.as_deref(), &icon),
        icon,
        icon_dimensions: dimensions,
        sizing,
        container,
        animation: request.animation.as_deref().and_then(animation_class),
        style: TextStyle {
            font_family: request.font_family.clone(),
            font_size: request.font_size.clone(),
            color: request.color.clone(),
        },
        dev_mode: request.dev_mode.unwrap_or(options.dev_mode),
        duration_ms: request.duration_ms,
        sound: sound_cue(request, options),
        content_height,
    }
}
