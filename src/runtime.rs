//! Drives an [`Island`] from a command channel and its own timers.
//!
//! All mutation happens on the one task running [`drive`], so the state
//! machine needs no locks. Callers hold a cheap, cloneable [`IslandHandle`].

use crate::capability::HostCapability;
use crate::display::DisplayEvent;
use crate::host::OverlayHost;
use crate::notification::{NotificationRequest, ResizeRequest};
use crate::state::Island;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::time::Instant;

const COMMAND_BUFFER: usize = 64;

#[derive(Debug)]
pub enum IslandCommand {
    Show(NotificationRequest),
    Resize(ResizeRequest),
    Display(DisplayEvent),
    Shutdown,
}

impl<H: OverlayHost> Island<H> {
    pub fn handle(&mut self, command: IslandCommand, now: Instant) {
        match command {
            IslandCommand::Show(request) => self.show(request, now),
            IslandCommand::Resize(request) => self.on_resize(request),
            IslandCommand::Display(event) => self.on_display_event(event, now),
            IslandCommand::Shutdown => {}
        }
    }
}

/// Sending side of the island. Every call returns immediately.
#[derive(Clone)]
pub struct IslandHandle {
    tx: mpsc::Sender<IslandCommand>,
    capability: HostCapability,
}

impl IslandHandle {
    pub fn has_notch(&self) -> bool {
        self.capability.has_notch
    }

    pub fn capability(&self) -> HostCapability {
        self.capability
    }

    pub fn show(&self, request: NotificationRequest) {
        if !self.capability.has_notch {
            return;
        }
        self.dispatch(IslandCommand::Show(request));
    }

    pub fn resize(&self, request: ResizeRequest) {
        self.dispatch(IslandCommand::Resize(request));
    }

    pub fn display_changed(&self, event: DisplayEvent) {
        self.dispatch(IslandCommand::Display(event));
    }

    pub fn shutdown(&self) {
        self.dispatch(IslandCommand::Shutdown);
    }

    fn dispatch(&self, command: IslandCommand) {
        match self.tx.try_send(command) {
            Ok(()) => {}
            Err(TrySendError::Full(command)) => {
                tracing::warn!(?command, "Island busy, command dropped");
            }
            Err(TrySendError::Closed(_)) => {
                tracing::debug!("Island stopped, command dropped");
            }
        }
    }
}

pub fn channel(capability: HostCapability) -> (IslandHandle, mpsc::Receiver<IslandCommand>) {
    let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
    (IslandHandle { tx, capability }, rx)
}

/// Run the island until shutdown or until every handle is dropped.
/// Returns the island so callers can inspect its final state.
pub async fn drive<H: OverlayHost>(
    mut island: Island<H>,
    mut commands: mpsc::Receiver<IslandCommand>,
) -> Island<H> {
    island.init();

    loop {
        let deadline = island.next_deadline();
        tokio::select! {
            command = commands.recv() => match command {
                Some(IslandCommand::Shutdown) | None => break,
                Some(command) => island.handle(command, Instant::now()),
            },
            _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                island.fire_due(Instant::now());
            }
        }
    }

    tracing::debug!(state = ?island.state(), "Island driver stopped");
    island
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IslandOptions;
    use crate::display::{display, DisplayInfo, Rect};
    use crate::geometry::FIXED_HEIGHT;
    use crate::host::testing::RecordingHost;
    use crate::notification::NotificationKind;
    use crate::state::OverlayState;
    use std::time::Duration;
    use tokio::task::JoinHandle;

    const NOTCHED: HostCapability = HostCapability {
        has_notch: true,
        platform_supported: true,
    };

    fn panel() -> DisplayInfo {
        display("panel", "Built-in Retina Display", true, Rect::new(0, 0, 3024, 1964))
    }

    fn start(capability: HostCapability) -> (IslandHandle, RecordingHost, JoinHandle<Island<RecordingHost>>) {
        let host = RecordingHost::new(vec![panel()]);
        let island = Island::new(host.clone(), IslandOptions::default(), capability);
        let (handle, rx) = channel(capability);
        let task = tokio::spawn(drive(island, rx));
        (handle, host, task)
    }

    async fn settle() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    async fn advance(millis: u64) {
        tokio::time::advance(Duration::from_millis(millis)).await;
        settle().await;
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn auto_hide_runs_on_the_clock() {
        let (handle, host, task) = start(NOTCHED);
        handle.show(NotificationRequest::new(NotificationKind::Success, "Saved"));
        settle().await;
        assert_eq!(host.log().rendered.len(), 1);

        advance(4499).await;
        assert!(host.log().collapsed.is_empty());

        advance(1).await;
        assert_eq!(host.log().collapsed.len(), 1);
        assert!(!host.log().last_bounds().unwrap().is_offscreen());

        advance(500).await;
        assert!(host.log().last_bounds().unwrap().is_offscreen());

        handle.shutdown();
        let island = task.await.unwrap();
        assert_eq!(island.state(), OverlayState::Hidden);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn latest_show_owns_the_timeline() {
        let (handle, host, task) = start(NOTCHED);
        handle.show(
            NotificationRequest::new(NotificationKind::Info, "Connecting...").with_duration(10_000),
        );
        settle().await;

        advance(2000).await;
        handle.show(NotificationRequest::new(NotificationKind::Success, "Connected"));
        settle().await;

        advance(4999).await;
        assert_eq!(host.log().collapsed.len(), 1);
        assert!(!host.log().last_bounds().unwrap().is_offscreen());

        advance(1).await;
        assert!(host.log().last_bounds().unwrap().is_offscreen());

        // Past where the first request would have ended
        advance(6000).await;
        assert_eq!(host.log().collapsed.len(), 1);

        handle.shutdown();
        let island = task.await.unwrap();
        assert_eq!(island.state(), OverlayState::Hidden);
        assert!(island.next_deadline().is_none());
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn display_bursts_reposition_once() {
        let (handle, host, task) = start(NOTCHED);
        settle().await;
        let calls = host.log().bounds.len();

        for _ in 0..5 {
            handle.display_changed(DisplayEvent::MetricsChanged("panel".into()));
            settle().await;
            advance(40).await;
        }
        assert_eq!(host.log().bounds.len(), calls);

        // Last event landed 160ms in; now at 200ms
        advance(459).await;
        assert_eq!(host.log().bounds.len(), calls);
        advance(1).await;
        assert_eq!(host.log().bounds.len(), calls + 1);

        handle.shutdown();
        task.await.unwrap();
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn fixed_mode_resize_settles_to_expanded() {
        let (handle, host, task) = start(NOTCHED);
        // Default sizing is fixed
        handle.show(NotificationRequest::new(NotificationKind::Info, "hi"));
        settle().await;
        assert!(!host.log().last_rendered().unwrap().container.dynamic);
        let calls = host.log().bounds.len();

        let id = host.log().last_rendered().map(|p| p.id.clone());
        handle.resize(ResizeRequest::new(24, id));
        settle().await;

        // Height stays fixed, so the second pass needs no window call
        assert_eq!(host.log().bounds.len(), calls);
        assert_eq!(host.log().last_bounds().unwrap().height, FIXED_HEIGHT);

        handle.shutdown();
        let island = task.await.unwrap();
        assert_eq!(island.state(), OverlayState::Expanded);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn no_notch_never_reaches_the_host() {
        let (handle, host, task) = start(HostCapability::NONE);
        assert!(!handle.has_notch());
        handle.show(NotificationRequest::new(NotificationKind::Info, "hi"));
        advance(10_000).await;

        let log = host.log();
        assert_eq!(log.windows_created, 0);
        assert!(log.rendered.is_empty());
        drop(log);

        handle.shutdown();
        task.await.unwrap();
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn dropping_every_handle_stops_the_driver() {
        let (handle, _host, task) = start(NOTCHED);
        drop(handle);
        let island = task.await.unwrap();
        assert_eq!(island.state(), OverlayState::Idle);
    }
}
