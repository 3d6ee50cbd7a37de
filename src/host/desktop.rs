//! Tauri implementation of the overlay host.

use super::{OverlayHost, OverlayWindow};
use crate::audio::SoundBoard;
use crate::display::{dedupe_ids, diff_snapshots, DisplayEvent, DisplayInfo, Rect};
use crate::error::WindowError;
use crate::geometry::WindowGeometry;
use crate::render::{NotificationPayload, SoundCue};
use crate::runtime::IslandHandle;
use serde::Serialize;
use std::time::Duration;
use tauri::{
    AppHandle, Emitter, LogicalPosition, LogicalSize, Manager, Monitor, WebviewUrl,
    WebviewWindowBuilder, WindowEvent,
};

pub const WINDOW_LABEL: &str = "island";

/// Events the webview listens for
pub const TRIGGER_EVENT: &str = "trigger-notch";
pub const COLLAPSE_EVENT: &str = "collapse-notch";

/// Monitor hot-plug has no Tauri event, so the watcher polls.
const DISPLAY_POLL: Duration = Duration::from_secs(1);

#[derive(Clone, Serialize)]
struct CollapsePayload<'a> {
    id: &'a str,
}

pub struct TauriHost {
    app: AppHandle,
    island: IslandHandle,
    sounds: Option<SoundBoard>,
}

impl TauriHost {
    pub fn new(app: AppHandle, island: IslandHandle, sounds: Option<SoundBoard>) -> Self {
        Self { app, island, sounds }
    }
}

impl OverlayHost for TauriHost {
    type Window = TauriWindow;

    fn create_window(&mut self) -> Result<TauriWindow, WindowError> {
        // A window left over from an earlier attempt is reused
        if self.app.get_webview_window(WINDOW_LABEL).is_none() {
            let window = WebviewWindowBuilder::new(
                &self.app,
                WINDOW_LABEL,
                WebviewUrl::App("index.html".into()),
            )
            .title("Notch Island")
            .transparent(true)
            .decorations(false)
            .resizable(false)
            .always_on_top(true)
            .skip_taskbar(true)
            .visible_on_all_workspaces(true)
            .shadow(false)
            .focused(false)
            .visible(false)
            .build()
            .map_err(|e| WindowError::Create(e.to_string()))?;

            window
                .set_ignore_cursor_events(true)
                .map_err(|e| WindowError::op("ignore_cursor_events", e))?;

            let island = self.island.clone();
            window.on_window_event(move |event| {
                if let WindowEvent::ScaleFactorChanged { .. } = event {
                    island.display_changed(DisplayEvent::MetricsChanged(WINDOW_LABEL.into()));
                }
            });
            tracing::debug!("Overlay window created");
        }

        Ok(TauriWindow {
            app: self.app.clone(),
        })
    }

    fn displays(&self) -> Result<Vec<DisplayInfo>, WindowError> {
        query_displays(&self.app)
    }

    fn render(&mut self, payload: &NotificationPayload) {
        if let Err(e) = self.app.emit_to(WINDOW_LABEL, TRIGGER_EVENT, payload) {
            tracing::warn!("Failed to emit {TRIGGER_EVENT}: {e}");
        }
    }

    fn collapse(&mut self, id: &str) {
        if let Err(e) = self
            .app
            .emit_to(WINDOW_LABEL, COLLAPSE_EVENT, CollapsePayload { id })
        {
            tracing::warn!("Failed to emit {COLLAPSE_EVENT}: {e}");
        }
    }

    fn play_sound(&mut self, cue: &SoundCue) {
        let Some(sounds) = &self.sounds else {
            return;
        };
        if let Err(e) = sounds.play(cue) {
            tracing::warn!(?cue, "Sound playback failed: {e}");
        }
    }
}

/// Handle to the overlay window, looked up by label on every call so a
/// window closed behind our back reads as dead instead of panicking.
pub struct TauriWindow {
    app: AppHandle,
}

impl TauriWindow {
    fn window(&self) -> Result<tauri::WebviewWindow, WindowError> {
        self.app
            .get_webview_window(WINDOW_LABEL)
            .ok_or(WindowError::Destroyed)
    }
}

impl OverlayWindow for TauriWindow {
    fn is_alive(&self) -> bool {
        self.app.get_webview_window(WINDOW_LABEL).is_some()
    }

    fn set_bounds(&mut self, bounds: WindowGeometry) -> Result<(), WindowError> {
        let window = self.window()?;
        window
            .set_size(LogicalSize::new(bounds.width, bounds.height))
            .map_err(|e| WindowError::op("set_size", e))?;
        window
            .set_position(LogicalPosition::new(bounds.x, bounds.y))
            .map_err(|e| WindowError::op("set_position", e))
    }

    fn show_inactive(&mut self) -> Result<(), WindowError> {
        let window = self.window()?;
        window.show().map_err(|e| WindowError::op("show", e))?;
        // Keep clicks going to whatever is underneath
        window
            .set_ignore_cursor_events(true)
            .map_err(|e| WindowError::op("ignore_cursor_events", e))
    }
}

/// Monitors carry no internal flag here; the resolver falls back to the
/// built-in label macOS gives the panel. Tauri reports physical pixels.
fn display_info(index: usize, monitor: &Monitor) -> DisplayInfo {
    let position = monitor.position();
    let size = monitor.size();
    let work_area = monitor.work_area();
    let label = monitor.name().cloned().unwrap_or_default();
    let id = if label.is_empty() {
        format!("display-{index}")
    } else {
        label.clone()
    };

    DisplayInfo {
        id,
        bounds: Rect::new(position.x, position.y, size.width, size.height),
        work_area: Rect::new(
            work_area.position.x,
            work_area.position.y,
            work_area.size.width,
            work_area.size.height,
        ),
        is_internal: false,
        label,
        scale_factor: monitor.scale_factor(),
    }
    .into_logical()
}

pub fn query_displays(app: &AppHandle) -> Result<Vec<DisplayInfo>, WindowError> {
    let monitors = app
        .available_monitors()
        .map_err(|e| WindowError::Displays(e.to_string()))?;
    let mut displays: Vec<DisplayInfo> =
        monitors.iter().enumerate().map(|(i, m)| display_info(i, m)).collect();
    dedupe_ids(&mut displays);
    Ok(displays)
}

fn snapshot(app: &AppHandle) -> Option<Vec<DisplayInfo>> {
    query_displays(app)
        .inspect_err(|e| tracing::trace!("Monitor query failed: {e}"))
        .ok()
}

/// Poll the monitor list and forward every difference to the island.
pub fn watch_displays(app: AppHandle, island: IslandHandle) {
    tauri::async_runtime::spawn(async move {
        let mut previous = snapshot(&app).unwrap_or_default();
        let mut ticker = tokio::time::interval(DISPLAY_POLL);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            // A failed query says nothing about the displays; try next tick
            let Some(current) = snapshot(&app) else {
                continue;
            };
            for event in diff_snapshots(&previous, &current) {
                island.display_changed(event);
            }
            previous = current;
        }
    });
}
