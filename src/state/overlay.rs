use serde::Serialize;

#[derive(Clone, Copy, Serialize, Debug, PartialEq, Eq)]
pub enum OverlayState {
    /// No window yet (or the host has no notch)
    Uninitialized,
    /// Window exists, parked off-screen, nothing shown since startup
    Idle,
    /// Provisional bounds applied, waiting for the renderer's measurement
    Showing,
    /// Final bounds applied, holding for the notification duration
    Expanded,
    /// Collapse animation running, still on screen
    Collapsing,
    /// Parked off-screen after a notification
    Hidden,
}

impl OverlayState {
    pub fn is_visible(&self) -> bool {
        matches!(
            self,
            OverlayState::Showing | OverlayState::Expanded | OverlayState::Collapsing
        )
    }

    /// Whether a renderer measurement may still change the bounds
    pub fn accepts_resize(&self) -> bool {
        matches!(self, OverlayState::Showing | OverlayState::Expanded)
    }
}
