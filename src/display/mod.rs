//! Display snapshots and selection of the built-in (notched) display.

pub mod watch;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use watch::{diff_snapshots, DisplayEvent};

/// Labels macOS gives the built-in panel when the internal flag is missing.
const BUILT_IN_LABELS: [&str; 3] = ["built-in", "color lcd", "liquid retina"];

/// A rectangle in desktop coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Divide by the display's scale factor, e.g. physical to logical pixels.
    pub fn to_logical(self, scale_factor: f64) -> Self {
        let scale = valid_scale(scale_factor);
        Self {
            x: (self.x as f64 / scale).round() as i32,
            y: (self.y as f64 / scale).round() as i32,
            width: (self.width as f64 / scale).round() as u32,
            height: (self.height as f64 / scale).round() as u32,
        }
    }
}

fn valid_scale(scale_factor: f64) -> f64 {
    if scale_factor.is_finite() && scale_factor > 0.0 {
        scale_factor
    } else {
        1.0
    }
}

/// One monitor as reported by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayInfo {
    pub id: String,
    pub bounds: Rect,
    pub work_area: Rect,
    pub is_internal: bool,
    pub label: String,
    pub scale_factor: f64,
}

impl DisplayInfo {
    /// Same display with bounds and work area in logical pixels. Geometry,
    /// the window and the webview's CSS all work in logical units.
    pub fn into_logical(self) -> Self {
        Self {
            bounds: self.bounds.to_logical(self.scale_factor),
            work_area: self.work_area.to_logical(self.scale_factor),
            ..self
        }
    }

    /// Distance from the top of the display to the top of its work area,
    /// i.e. the menu bar / notch band. Zero when there is none.
    pub fn top_inset(&self) -> u32 {
        let inset = self.work_area.y - self.bounds.y;
        inset.max(0) as u32
    }

    fn has_built_in_label(&self) -> bool {
        let label = self.label.to_lowercase();
        BUILT_IN_LABELS.iter().any(|name| label.contains(name))
    }
}

/// Pick the authoritative display: the one flagged internal, else the first
/// with a built-in label, else nothing.
pub fn resolve_internal_display(displays: &[DisplayInfo]) -> Option<&DisplayInfo> {
    displays
        .iter()
        .find(|d| d.is_internal)
        .or_else(|| displays.iter().find(|d| d.has_built_in_label()))
}

/// Suffix repeated ids (`DELL U2720Q`, `DELL U2720Q #2`) so every display in
/// a snapshot has its own id. Order decides which one keeps the bare name.
pub fn dedupe_ids(displays: &mut [DisplayInfo]) {
    let mut seen: HashMap<String, usize> = HashMap::new();
    for display in displays.iter_mut() {
        let count = seen.entry(display.id.clone()).or_insert(0);
        *count += 1;
        if *count > 1 {
            display.id = format!("{} #{count}", display.id);
        }
    }
}

#[cfg(test)]
pub(crate) fn display(id: &str, label: &str, is_internal: bool, bounds: Rect) -> DisplayInfo {
    DisplayInfo {
        id: id.to_string(),
        bounds,
        work_area: bounds,
        is_internal,
        label: label.to_string(),
        scale_factor: 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn external(id: &str) -> DisplayInfo {
        display(id, "DELL U2720Q", false, Rect::new(1512, 0, 3840, 2160))
    }

    #[test]
    fn test_internal_flag_wins_regardless_of_order() {
        let internal = display("internal", "Monitor #2", true, Rect::new(0, 0, 3024, 1964));
        let lists = [
            vec![internal.clone(), external("a"), external("b")],
            vec![external("a"), internal.clone(), external("b")],
            vec![external("a"), external("b"), internal.clone()],
        ];

        for list in &lists {
            assert_eq!(resolve_internal_display(list), Some(&internal));
        }
    }

    #[test]
    fn test_internal_flag_beats_label() {
        let labelled = display("labelled", "Built-in Retina Display", false, Rect::default());
        let flagged = display("flagged", "Monitor", true, Rect::default());
        let list = vec![labelled, flagged.clone()];
        assert_eq!(resolve_internal_display(&list), Some(&flagged));
    }

    #[test]
    fn test_label_fallback_is_case_insensitive() {
        for label in ["Built-in Retina Display", "COLOR LCD", "Liquid Retina XDR Display"] {
            let list = vec![external("ext"), display("panel", label, false, Rect::default())];
            let found = resolve_internal_display(&list).unwrap();
            assert_eq!(found.id, "panel", "label {label}");
        }
    }

    #[test]
    fn test_no_candidate() {
        assert!(resolve_internal_display(&[]).is_none());
        assert!(resolve_internal_display(&[external("a"), external("b")]).is_none());
    }

    #[test]
    fn test_top_inset() {
        let mut panel = display("panel", "Built-in", true, Rect::new(0, 0, 3024, 1964));
        assert_eq!(panel.top_inset(), 0);

        panel.work_area = Rect::new(0, 74, 3024, 1890);
        assert_eq!(panel.top_inset(), 74);

        // Work area above the bounds should never produce a negative inset
        panel.work_area = Rect::new(0, -10, 3024, 1890);
        assert_eq!(panel.top_inset(), 0);
    }

    #[test]
    fn test_into_logical_halves_retina_metrics() {
        let mut panel = display("panel", "Built-in", true, Rect::new(0, 0, 3024, 1964));
        panel.work_area = Rect::new(0, 74, 3024, 1890);

        let logical = panel.into_logical();
        assert_eq!(logical.bounds, Rect::new(0, 0, 1512, 982));
        assert_eq!(logical.top_inset(), 37);
        assert_eq!(logical.scale_factor, 2.0);
    }

    #[test]
    fn test_into_logical_with_bad_scale_is_identity() {
        let mut panel = display("panel", "Built-in", true, Rect::new(-1512, 0, 1512, 982));
        panel.scale_factor = 0.0;
        assert_eq!(panel.clone().into_logical(), panel);
    }

    #[test]
    fn test_dedupe_ids() {
        let mut list = vec![
            display("DELL U2720Q", "DELL U2720Q", false, Rect::new(0, 0, 3840, 2160)),
            display("panel", "Built-in", true, Rect::new(3840, 0, 3024, 1964)),
            display("DELL U2720Q", "DELL U2720Q", false, Rect::new(6864, 0, 3840, 2160)),
        ];
        dedupe_ids(&mut list);

        let ids: Vec<&str> = list.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["DELL U2720Q", "panel", "DELL U2720Q #2"]);
        // Labels are left alone for the resolver
        assert_eq!(list[2].label, "DELL U2720Q");
    }
}
