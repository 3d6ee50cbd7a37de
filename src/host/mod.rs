//! The seam between the lifecycle state machine and the desktop.
//!
//! `desktop` implements it on Tauri windows; `testing` records calls.

pub mod desktop;
#[cfg(test)]
pub mod testing;

use crate::display::DisplayInfo;
use crate::error::WindowError;
use crate::geometry::WindowGeometry;
use crate::render::{NotificationPayload, SoundCue};

/// The single overlay window. Owned by the state machine.
pub trait OverlayWindow {
    /// False once the underlying window has been destroyed
    fn is_alive(&self) -> bool;

    fn set_bounds(&mut self, bounds: WindowGeometry) -> Result<(), WindowError>;

    /// Make visible without taking focus
    fn show_inactive(&mut self) -> Result<(), WindowError>;
}

/// Window factory, display source, renderer and audio in one place.
pub trait OverlayHost {
    type Window: OverlayWindow;

    fn create_window(&mut self) -> Result<Self::Window, WindowError>;

    fn displays(&self) -> Result<Vec<DisplayInfo>, WindowError>;

    /// Hand the payload to the renderer. The renderer answers later with a
    /// resize request; nothing is awaited here.
    fn render(&mut self, payload: &NotificationPayload);

    /// Start the collapse animation for notification `id`
    fn collapse(&mut self, id: &str);

    fn play_sound(&mut self, cue: &SoundCue);
}
