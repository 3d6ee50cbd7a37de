//! Window geometry for the island.
//!
//! All values are logical pixels (points) in desktop coordinates, the unit the
//! window API and the webview's CSS share. Hosts convert displays with
//! [`DisplayInfo::into_logical`] before they get here. The padding and clamp
//! constants are hand-tuned for the 14"/16" notch and are safe to adjust.

use crate::config::SizingConfig;
use crate::display::DisplayInfo;
use serde::Serialize;

/// Window width in every mode; only the container inside may grow.
pub const EXPANDED_WIDTH: u32 = 600;
/// Window height when the content does not drive the size
pub const FIXED_HEIGHT: u32 = 200;
/// Phase-one height before the renderer has reported its content
pub const PROVISIONAL_HEIGHT: u32 = MAX_HEIGHT;

pub const DEFAULT_NOTCH_HEIGHT: u32 = 40;
/// The visual bottom of the notch sits slightly above its physical edge
pub const OPTICAL_OFFSET: i32 = -2;
/// Asymmetric: the notch reads as visually heavy, so content sits lower
pub const PADDING_TOP: u32 = 32;
pub const PADDING_BOTTOM: u32 = 20;
pub const MIN_HEIGHT: u32 = 100;
pub const MAX_HEIGHT: u32 = 300;

pub const TRAILING_PADDING: u32 = 24;
pub const LARGE_CORNER_RADIUS: u32 = 28;
pub const LARGE_CORNER_THRESHOLD: u32 = 120;

/// Far enough above any desktop layout that no compositor shows it
pub const OFFSCREEN_Y: i32 = -10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowGeometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl WindowGeometry {
    /// Parked above the display at near-zero size.
    pub fn offscreen(anchor_x: i32) -> Self {
        Self {
            x: anchor_x,
            y: OFFSCREEN_Y,
            width: 1,
            height: 1,
        }
    }

    pub fn is_offscreen(&self) -> bool {
        self.y == OFFSCREEN_Y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WidthPolicy {
    Fixed,
    #[serde(rename_all = "camelCase")]
    Auto { trailing_padding: u32 },
}

/// Styling of the pill inside the window. `None` means the stylesheet default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerLayout {
    pub dynamic: bool,
    pub height: Option<u32>,
    pub padding_top: Option<u32>,
    pub padding_bottom: Option<u32>,
    pub width: WidthPolicy,
    pub corner_radius: Option<u32>,
}

impl ContainerLayout {
    pub const FIXED: ContainerLayout = ContainerLayout {
        dynamic: false,
        height: None,
        padding_top: None,
        padding_bottom: None,
        width: WidthPolicy::Fixed,
        corner_radius: None,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IslandLayout {
    pub bounds: WindowGeometry,
    pub container: ContainerLayout,
}

/// Explicit override, else the display's top inset, else the default.
pub fn notch_height(display: &DisplayInfo, sizing: &SizingConfig) -> u32 {
    sizing.notch_height.unwrap_or_else(|| match display.top_inset() {
        0 => DEFAULT_NOTCH_HEIGHT,
        inset => inset,
    })
}

/// Where content may start below the notch. May be negative with a large
/// upward offset; padding absorbs that.
fn safe_top(notch_height: u32, vertical_offset: i32) -> i64 {
    notch_height as i64 + vertical_offset as i64 + OPTICAL_OFFSET as i64
}

/// `notch + offset - 2 + 32 + content + 20`, clamped to `[100, 300]`.
pub fn dynamic_height(notch_height: u32, vertical_offset: i32, content_height: u32) -> u32 {
    let raw = safe_top(notch_height, vertical_offset)
        + PADDING_TOP as i64
        + content_height as i64
        + PADDING_BOTTOM as i64;
    raw.clamp(MIN_HEIGHT as i64, MAX_HEIGHT as i64) as u32
}

/// Centre a window of `width` horizontally on the display, flush with its top.
pub fn centered_x(display: &DisplayInfo, width: u32) -> i32 {
    let slack = display.bounds.width as f64 - width as f64;
    display.bounds.x + (slack / 2.0).round() as i32
}

/// Expanded layout for a notification.
///
/// `content_height` is `None` for the provisional first pass; dynamic mode then
/// reserves [`PROVISIONAL_HEIGHT`] until the renderer reports back.
pub fn compute_layout(
    display: &DisplayInfo,
    sizing: &SizingConfig,
    content_height: Option<u32>,
) -> IslandLayout {
    let x = centered_x(display, EXPANDED_WIDTH);
    let y = display.bounds.y;

    if !sizing.grows_with_content() {
        return IslandLayout {
            bounds: WindowGeometry {
                x,
                y,
                width: EXPANDED_WIDTH,
                height: FIXED_HEIGHT,
            },
            container: ContainerLayout::FIXED,
        };
    }

    let notch = notch_height(display, sizing);
    let height = match content_height {
        Some(content) => dynamic_height(notch, sizing.vertical_offset, content),
        None => PROVISIONAL_HEIGHT,
    };

    let width = if sizing.expand_width {
        WidthPolicy::Auto {
            trailing_padding: TRAILING_PADDING,
        }
    } else {
        WidthPolicy::Fixed
    };

    let padding_top = (safe_top(notch, sizing.vertical_offset) + PADDING_TOP as i64).max(0) as u32;

    IslandLayout {
        bounds: WindowGeometry {
            x,
            y,
            width: EXPANDED_WIDTH,
            height,
        },
        container: ContainerLayout {
            dynamic: true,
            height: Some(height),
            padding_top: Some(padding_top),
            padding_bottom: Some(PADDING_BOTTOM),
            width,
            corner_radius: (height > LARGE_CORNER_THRESHOLD).then_some(LARGE_CORNER_RADIUS),
        },
    }
}

/// Window bounds only; see [`compute_layout`].
pub fn compute_bounds(
    display: &DisplayInfo,
    sizing: &SizingConfig,
    content_height: Option<u32>,
) -> WindowGeometry {
    compute_layout(display, sizing, content_height).bounds
}
