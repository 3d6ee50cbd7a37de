//! Built-in icon catalog and icon source resolution.

use crate::notification::NotificationKind;
use serde::Serialize;

pub const CHECK: &str = r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2.5" stroke-linecap="round" stroke-linejoin="round"><rect x="3" y="7" width="18" height="10" rx="5"></rect><line x1="8" y1="12" x2="16" y2="12"></line></svg>"#;
pub const X: &str = r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2.5" stroke-linecap="round" stroke-linejoin="round"><line x1="18" y1="6" x2="6" y2="18"></line><line x1="6" y1="6" x2="18" y2="18"></line></svg>"#;
pub const BLUETOOTH: &str = r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><polyline points="6.5 6.5 17.5 17.5 12 23 12 1 17.5 6.5 6.5 17.5"></polyline></svg>"#;
pub const WARNING: &str = r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2.5" stroke-linecap="round" stroke-linejoin="round"><path d="M10.29 3.86L1.82 18a2 2 0 0 0 1.71 3h16.94a2 2 0 0 0 1.71-3L13.71 3.86a2 2 0 0 0-3.42 0z"></path><line x1="12" y1="9" x2="12" y2="13"></line><line x1="12" y1="17" x2="12.01" y2="17"></line></svg>"#;
pub const INFO: &str = r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2.5" stroke-linecap="round" stroke-linejoin="round"><circle cx="12" cy="12" r="10"></circle><line x1="12" y1="16" x2="12" y2="12"></line><line x1="12" y1="8" x2="12.01" y2="8"></line></svg>"#;

const IMAGE_EXTENSIONS: [&str; 4] = [".png", ".jpg", ".jpeg", ".webp"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum IconSource {
    /// Vector markup; inherits the text colour
    Svg { markup: String },
    /// Raster image; `size` in px, `None` fills the icon box
    Image { src: String, size: Option<u32> },
}

impl IconSource {
    pub fn is_image(&self) -> bool {
        matches!(self, IconSource::Image { .. })
    }
}

pub fn preset(name: &str) -> Option<&'static str> {
    match name {
        "check" => Some(CHECK),
        "x" => Some(X),
        "bluetooth" => Some(BLUETOOTH),
        "warning" => Some(WARNING),
        "info" => Some(INFO),
        _ => None,
    }
}

pub fn for_kind(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => CHECK,
        NotificationKind::Error => X,
        NotificationKind::Info => INFO,
        NotificationKind::Warning => WARNING,
    }
}

fn is_image_path(icon: &str) -> bool {
    let lower = icon.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Inline svg, then image path, then preset name, then the kind's icon.
pub fn resolve(icon: Option<&str>, kind: NotificationKind, image_size: Option<u32>) -> IconSource {
    let svg = |markup: &str| IconSource::Svg {
        markup: markup.to_string(),
    };

    match icon {
        Some(icon) if icon.starts_with("<svg") => svg(icon),
        Some(icon) if is_image_path(icon) => IconSource::Image {
            src: icon.to_string(),
            size: image_size,
        },
        Some(icon) => svg(preset(icon).unwrap_or_else(|| for_kind(kind))),
        None => svg(for_kind(kind)),
    }
}
