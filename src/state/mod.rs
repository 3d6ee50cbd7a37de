//! Lifecycle of the overlay: show → expand → collapse → hide, plus debounced
//! repositioning when displays change.
//!
//! Everything here is synchronous. Timers are deadlines stored in the state
//! and the caller passes `now` in; see `runtime::drive` for the loop that
//! sleeps until [`Island::next_deadline`].

pub mod overlay;
pub mod timer;

use crate::capability::HostCapability;
use crate::config::{self, IslandOptions, SizingConfig};
use crate::display::{resolve_internal_display, DisplayEvent, DisplayInfo};
use crate::error::WindowError;
use crate::geometry::{self, WindowGeometry};
use crate::host::{OverlayHost, OverlayWindow};
use crate::notification::{NotificationRequest, ResizeRequest};
use crate::render;
use std::time::Duration;
use tokio::time::Instant;
use uuid::Uuid;

pub use self::overlay::OverlayState;
use self::timer::TimerSlot;

/// Exit animation time between collapse and parking the window
pub const HIDE_GRACE: Duration = Duration::from_millis(500);
/// Quiet period before display changes are acted on
pub const DISPLAY_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HidePhase {
    /// Duration elapsed: tell the renderer to collapse
    Collapse,
    /// Grace elapsed: move the window off-screen
    Park,
}

#[derive(Debug, Clone)]
struct ActiveNotification {
    id: String,
    sizing: SizingConfig,
    content_height: Option<u32>,
}

pub struct Island<H: OverlayHost> {
    host: H,
    options: IslandOptions,
    capability: HostCapability,
    window: Option<H::Window>,
    state: OverlayState,
    active: Option<ActiveNotification>,
    /// Last bounds successfully applied to the window
    bounds: Option<WindowGeometry>,
    /// x of the last resolved display, used when parking off-screen
    anchor_x: i32,
    hide_timer: TimerSlot<HidePhase>,
    debounce_timer: TimerSlot<()>,
}

impl<H: OverlayHost> Island<H> {
    pub fn new(host: H, options: IslandOptions, capability: HostCapability) -> Self {
        Self {
            host,
            options,
            capability,
            window: None,
            state: OverlayState::Uninitialized,
            active: None,
            bounds: None,
            anchor_x: 0,
            hide_timer: TimerSlot::new(),
            debounce_timer: TimerSlot::new(),
        }
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    /// Earliest pending timer, if any
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.hide_timer.deadline(), self.debounce_timer.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Create and park the window. Does nothing without a notch, and nothing
    /// if a live window already exists.
    pub fn init(&mut self) {
        if !self.capability.has_notch {
            if self.options.debug {
                tracing::info!("Hardware not compatible (no notch or not macOS)");
            }
            return;
        }
        if self.live_window().is_some() {
            return;
        }

        match self.host.create_window() {
            Ok(window) => {
                self.window = Some(window);
                self.bounds = None;
                self.apply_bounds(WindowGeometry::offscreen(0), "park");
                self.transition(OverlayState::Idle);
            }
            Err(e) => self.report("create window", &e),
        }
    }

    /// Show a notification, replacing whatever is on screen.
    pub fn show(&mut self, request: NotificationRequest, now: Instant) {
        if !self.capability.has_notch {
            return;
        }
        if let Err(e) = request.validate() {
            tracing::error!("Rejected notification: {e}");
            return;
        }
        if self.live_window().is_none() {
            tracing::debug!("Notification dropped: overlay window not available");
            return;
        }

        let sizing = config::resolve(&self.options.sizing, request.sizing.as_ref());
        let Some(display) = self.resolve_display() else {
            tracing::debug!("Notification dropped: no built-in display");
            self.hide_if_visible();
            return;
        };
        self.anchor_x = display.bounds.x;

        // Phase one: provisional bounds so something appears immediately
        let provisional = geometry::compute_bounds(&display, &sizing, None);
        self.apply_bounds(provisional, "show");
        let shown = match self.live_window() {
            Some(window) => window.show_inactive(),
            None => Err(WindowError::Destroyed),
        };
        if let Err(e) = shown {
            self.report("show", &e);
        }

        // Most recent request wins: the previous timeline is discarded
        let deadline = now + Duration::from_millis(request.duration_ms);
        if self.hide_timer.arm(deadline, HidePhase::Collapse).is_some() {
            tracing::debug!("Pending auto-hide replaced");
        }

        let id = Uuid::new_v4().to_string();
        let payload = render::prepare(id.clone(), &request, &self.options, &display, sizing);
        self.host.render(&payload);
        if let Some(cue) = &payload.sound {
            self.host.play_sound(cue);
        }

        tracing::debug!(id = %id, kind = request.kind.as_str(), "Notification shown");
        self.active = Some(ActiveNotification {
            id,
            sizing,
            content_height: None,
        });
        self.transition(OverlayState::Showing);
    }

    /// Phase two: the renderer reported its content height.
    pub fn on_resize(&mut self, request: ResizeRequest) {
        if !self.state.accepts_resize() {
            tracing::trace!(state = ?self.state, "Resize ignored");
            return;
        }
        let Some(active) = self.active.as_ref() else {
            return;
        };
        if let Some(id) = request.id.as_deref() {
            if id != active.id {
                tracing::debug!(id, "Resize for a superseded notification ignored");
                return;
            }
        }
        let sizing = active.sizing;

        let Some(display) = self.resolve_display() else {
            self.hide_if_visible();
            return;
        };
        self.anchor_x = display.bounds.x;

        let content_height = request.content_height();
        let bounds = geometry::compute_bounds(&display, &sizing, Some(content_height));
        if let Some(active) = self.active.as_mut() {
            active.content_height = Some(content_height);
        }

        // Skip the window call when the correction changes nothing
        if self.bounds != Some(bounds) {
            self.apply_bounds(bounds, "resize");
        }
        self.transition(OverlayState::Expanded);
    }

    /// Display added/removed/changed. Bursts coalesce into one reposition.
    pub fn on_display_event(&mut self, event: DisplayEvent, now: Instant) {
        if self.window.is_none() {
            return;
        }
        tracing::debug!(?event, "Display change, repositioning after debounce");
        self.debounce_timer.arm(now + DISPLAY_DEBOUNCE, ());
    }

    /// Run every timer whose deadline has passed.
    pub fn fire_due(&mut self, now: Instant) {
        if self.debounce_timer.take_due(now).is_some() {
            self.reposition();
        }

        while let Some(deadline) = self.hide_timer.take_due(now) {
            match deadline.tag {
                HidePhase::Collapse => {
                    if let Some(active) = &self.active {
                        self.host.collapse(&active.id);
                    }
                    self.transition(OverlayState::Collapsing);
                    self.hide_timer.arm(deadline.at + HIDE_GRACE, HidePhase::Park);
                }
                HidePhase::Park => {
                    self.apply_bounds(WindowGeometry::offscreen(self.anchor_x), "hide");
                    self.active = None;
                    self.transition(OverlayState::Hidden);
                }
            }
        }
    }

    /// Re-resolve the display and recompute bounds. Hidden windows are only
    /// pinned off-screen so nothing flickers.
    fn reposition(&mut self) {
        if self.live_window().is_none() {
            return;
        }
        let Some(display) = self.resolve_display() else {
            self.hide_if_visible();
            return;
        };
        self.anchor_x = display.bounds.x;

        if !self.state.is_visible() {
            self.apply_bounds(WindowGeometry::offscreen(display.bounds.x), "reposition");
            return;
        }

        let Some(active) = self.active.as_ref() else {
            return;
        };
        let bounds = geometry::compute_bounds(&display, &active.sizing, active.content_height);
        if self.bounds != Some(bounds) {
            self.apply_bounds(bounds, "reposition");
        }
    }

    fn hide_if_visible(&mut self) {
        if !self.state.is_visible() {
            return;
        }
        self.hide_timer.cancel();
        self.apply_bounds(WindowGeometry::offscreen(self.anchor_x), "hide");
        self.active = None;
        self.transition(OverlayState::Hidden);
    }

    fn resolve_display(&mut self) -> Option<DisplayInfo> {
        match self.host.displays() {
            Ok(displays) => resolve_internal_display(&displays).cloned(),
            Err(e) => {
                self.report("query displays", &e);
                None
            }
        }
    }

    fn live_window(&mut self) -> Option<&mut H::Window> {
        self.window.as_mut().filter(|w| w.is_alive())
    }

    /// Best effort: failures are reported and the stale bounds kept.
    fn apply_bounds(&mut self, bounds: WindowGeometry, context: &'static str) {
        let result = match self.live_window() {
            Some(window) => window.set_bounds(bounds),
            None => Err(WindowError::Destroyed),
        };
        match result {
            Ok(()) => self.bounds = Some(bounds),
            Err(e) => self.report(context, &e),
        }
    }

    fn transition(&mut self, next: OverlayState) {
        if self.state != next {
            tracing::debug!(from = ?self.state, to = ?next, "Overlay state");
            self.state = next;
        }
    }

    fn report(&self, context: &str, err: &WindowError) {
        if self.options.debug {
            tracing::warn!("Window operation failed ({context}): {err}");
        } else {
            tracing::trace!("Window operation failed ({context}): {err}");
        }
    }
}
