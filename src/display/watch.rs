//! Turns successive monitor snapshots into change events.

use super::DisplayInfo;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "id", rename_all = "kebab-case")]
pub enum DisplayEvent {
    Added(String),
    Removed(String),
    MetricsChanged(String),
}

/// Compare two snapshots by display id. Displays sharing an id are paired
/// in order of appearance, so identical monitors never diff against each other.
pub fn diff_snapshots(previous: &[DisplayInfo], current: &[DisplayInfo]) -> Vec<DisplayEvent> {
    let mut events = Vec::new();

    for (index, display) in current.iter().enumerate() {
        let nth = occurrence(current, index);
        match nth_with_id(previous, &display.id, nth) {
            None => events.push(DisplayEvent::Added(display.id.clone())),
            Some(old) if metrics_differ(old, display) => {
                events.push(DisplayEvent::MetricsChanged(display.id.clone()))
            }
            Some(_) => {}
        }
    }

    for (index, display) in previous.iter().enumerate() {
        let nth = occurrence(previous, index);
        if nth_with_id(current, &display.id, nth).is_none() {
            events.push(DisplayEvent::Removed(display.id.clone()));
        }
    }

    events
}

/// How many earlier entries share this entry's id
fn occurrence(list: &[DisplayInfo], index: usize) -> usize {
    let id = &list[index].id;
    list[..index].iter().filter(|d| &d.id == id).count()
}

fn nth_with_id<'a>(list: &'a [DisplayInfo], id: &str, nth: usize) -> Option<&'a DisplayInfo> {
    list.iter().filter(|d| d.id == id).nth(nth)
}

fn metrics_differ(a: &DisplayInfo, b: &DisplayInfo) -> bool {
    a.bounds != b.bounds || a.work_area != b.work_area || a.scale_factor != b.scale_factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{display, Rect};

    #[test]
    fn test_unchanged_snapshot_is_quiet() {
        let snapshot = vec![display("a", "Built-in", true, Rect::new(0, 0, 3024, 1964))];
        assert!(diff_snapshots(&snapshot, &snapshot).is_empty());
    }

    #[test]
    fn test_added_and_removed() {
        let panel = display("panel", "Built-in", true, Rect::new(0, 0, 3024, 1964));
        let ext = display("ext", "DELL", false, Rect::new(3024, 0, 3840, 2160));

        let events = diff_snapshots(&[panel.clone()], &[panel.clone(), ext.clone()]);
        assert_eq!(events, vec![DisplayEvent::Added("ext".into())]);

        let events = diff_snapshots(&[panel.clone(), ext], &[panel]);
        assert_eq!(events, vec![DisplayEvent::Removed("ext".into())]);
    }

    #[test]
    fn test_metrics_changed() {
        let before = display("panel", "Built-in", true, Rect::new(0, 0, 3024, 1964));
        let mut after = before.clone();
        after.bounds = Rect::new(0, 0, 2560, 1664);

        assert_eq!(
            diff_snapshots(&[before.clone()], &[after]),
            vec![DisplayEvent::MetricsChanged("panel".into())]
        );

        let mut rescaled = before.clone();
        rescaled.scale_factor = 1.0;
        assert_eq!(
            diff_snapshots(&[before], &[rescaled]),
            vec![DisplayEvent::MetricsChanged("panel".into())]
        );
    }

    #[test]
    fn test_identical_monitors_are_quiet() {
        let snapshot = vec![
            display("DELL U2720Q", "DELL U2720Q", false, Rect::new(0, 0, 3840, 2160)),
            display("DELL U2720Q", "DELL U2720Q", false, Rect::new(3840, 0, 3840, 2160)),
        ];
        assert!(diff_snapshots(&snapshot, &snapshot).is_empty());

        // Unplugging the second one is a removal, not a metrics change
        let events = diff_snapshots(&snapshot, &snapshot[..1]);
        assert_eq!(events, vec![DisplayEvent::Removed("DELL U2720Q".into())]);
    }
}
