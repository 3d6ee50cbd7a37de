//! In-memory host that records every call.

use super::{OverlayHost, OverlayWindow};
use crate::display::DisplayInfo;
use crate::error::WindowError;
use crate::geometry::WindowGeometry;
use crate::render::{NotificationPayload, SoundCue};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct HostLog {
    pub windows_created: usize,
    pub bounds: Vec<WindowGeometry>,
    pub shown: usize,
    pub rendered: Vec<NotificationPayload>,
    pub collapsed: Vec<String>,
    pub sounds: Vec<SoundCue>,
    pub display_queries: usize,

    pub displays: Vec<DisplayInfo>,
    pub window_alive: bool,
    pub fail_create: bool,
    pub fail_window_ops: bool,
    pub fail_displays: bool,
}

impl HostLog {
    pub fn last_bounds(&self) -> Option<WindowGeometry> {
        self.bounds.last().copied()
    }

    pub fn last_rendered(&self) -> Option<&NotificationPayload> {
        self.rendered.last()
    }
}

#[derive(Clone)]
pub struct RecordingHost {
    log: Arc<Mutex<HostLog>>,
}

impl RecordingHost {
    pub fn new(displays: Vec<DisplayInfo>) -> Self {
        let log = HostLog {
            displays,
            window_alive: true,
            ..Default::default()
        };
        Self {
            log: Arc::new(Mutex::new(log)),
        }
    }

    pub fn log(&self) -> MutexGuard<'_, HostLog> {
        self.log.lock().unwrap()
    }
}

pub struct RecordingWindow {
    log: Arc<Mutex<HostLog>>,
}

impl OverlayWindow for RecordingWindow {
    fn is_alive(&self) -> bool {
        self.log.lock().unwrap().window_alive
    }

    fn set_bounds(&mut self, bounds: WindowGeometry) -> Result<(), WindowError> {
        let mut log = self.log.lock().unwrap();
        if log.fail_window_ops {
            return Err(WindowError::op("set_bounds", "compositor refused"));
        }
        log.bounds.push(bounds);
        Ok(())
    }

    fn show_inactive(&mut self) -> Result<(), WindowError> {
        let mut log = self.log.lock().unwrap();
        if log.fail_window_ops {
            return Err(WindowError::op("show", "compositor refused"));
        }
        log.shown += 1;
        Ok(())
    }
}

impl OverlayHost for RecordingHost {
    type Window = RecordingWindow;

    fn create_window(&mut self) -> Result<Self::Window, WindowError> {
        let mut log = self.log();
        if log.fail_create {
            return Err(WindowError::Create("no window server".into()));
        }
        log.windows_created += 1;
        log.window_alive = true;
        Ok(RecordingWindow {
            log: self.log.clone(),
        })
    }

    fn displays(&self) -> Result<Vec<DisplayInfo>, WindowError> {
        let mut log = self.log();
        log.display_queries += 1;
        if log.fail_displays {
            return Err(WindowError::Displays("monitor query failed".into()));
        }
        Ok(log.displays.clone())
    }

    fn render(&mut self, payload: &NotificationPayload) {
        self.log().rendered.push(payload.clone());
    }

    fn collapse(&mut self, id: &str) {
        self.log().collapsed.push(id.to_string());
    }

    fn play_sound(&mut self, cue: &SoundCue) {
        self.log().sounds.push(cue.clone());
    }
}
