//! Presentation (full-screen) mode
//!
//! A [`DisplayHost`] owns the true full-screen flag. Requests against it are
//! queued and only take effect when the host is pumped, and the host may
//! refuse them. Whatever happens, the host broadcasts a
//! [`HostNotification::FullscreenChange`] when its flag actually changes.
//!
//! [`FullscreenController`] never mutates state from its own toggle: it
//! re-reads the host every time a notification arrives and mirrors the
//! result into a [`PresentationMode`] value that the layout shell receives
//! as a parameter.

use std::collections::{HashSet, VecDeque};
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

/// Region id that always exists: the whole screen.
pub const ROOT_TARGET: &str = "root";

/// Default region presented by the toggle: the section content pane.
pub const CONTENT_TARGET: &str = "presentation-root";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostNotification {
    FullscreenChange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Platform side of presentation mode.
pub trait DisplayHost {
    /// True full-screen flag.
    fn is_fullscreen(&self) -> bool;

    /// Region currently presented, if any.
    fn fullscreen_target(&self) -> Option<&str>;

    fn has_region(&self, id: &str) -> bool;

    /// Queue a request to present `target`. May be refused later.
    fn request_fullscreen(&mut self, target: &str);

    /// Queue a request to leave full-screen.
    fn request_exit(&mut self);

    fn subscribe(&mut self) -> (ListenerId, UnboundedReceiver<HostNotification>);

    fn unsubscribe(&mut self, id: ListenerId);
}

/// Presentation state handed to consumers that style themselves on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PresentationMode {
    pub fullscreen: bool,
}

impl PresentationMode {
    pub fn normal() -> Self {
        Self { fullscreen: false }
    }

    pub fn presenting() -> Self {
        Self { fullscreen: true }
    }

    /// Chrome (sidebar, status bar) is hidden while presenting.
    pub fn shows_chrome(self) -> bool {
        !self.fullscreen
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingRequest {
    Enter(String),
    Exit,
}

/// In-process display host used by the terminal frontend.
pub struct VirtualDisplay {
    regions: HashSet<String>,
    presented: Option<String>,
    pending: VecDeque<PendingRequest>,
    allow_fullscreen: bool,
    listeners: Vec<(ListenerId, UnboundedSender<HostNotification>)>,
    next_listener: u64,
}

impl VirtualDisplay {
    pub fn new(allow_fullscreen: bool) -> Self {
        let mut regions = HashSet::new();
        regions.insert(ROOT_TARGET.to_string());
        Self {
            regions,
            presented: None,
            pending: VecDeque::new(),
            allow_fullscreen,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn register_region(&mut self, id: impl Into<String>) {
        self.regions.insert(id.into());
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Apply queued requests. Returns how many changed the flag.
    pub fn pump(&mut self) -> usize {
        let mut changes = 0;
        while let Some(request) = self.pending.pop_front() {
            let before = self.presented.clone();
            match request {
                PendingRequest::Enter(target) => {
                    if !self.allow_fullscreen {
                        tracing::debug!("Full-screen request for '{}' refused by policy", target);
                        continue;
                    }
                    if !self.regions.contains(&target) {
                        tracing::debug!("Full-screen request for unknown region '{}'", target);
                        continue;
                    }
                    self.presented = Some(target);
                }
                PendingRequest::Exit => {
                    if self.presented.is_none() {
                        tracing::debug!("Exit request while not in full-screen");
                        continue;
                    }
                    self.presented = None;
                }
            }
            if before != self.presented {
                changes += 1;
                self.notify();
            }
        }
        changes
    }

    /// The platform escape gesture: leaves full-screen immediately,
    /// bypassing the request queue.
    pub fn native_escape(&mut self) -> bool {
        if self.presented.take().is_some() {
            tracing::debug!("Full-screen exited by escape");
            self.notify();
            true
        } else {
            false
        }
    }

    fn notify(&mut self) {
        self.listeners
            .retain(|(_, sender)| sender.send(HostNotification::FullscreenChange).is_ok());
    }
}

impl DisplayHost for VirtualDisplay {
    fn is_fullscreen(&self) -> bool {
        self.presented.is_some()
    }

    fn fullscreen_target(&self) -> Option<&str> {
        self.presented.as_deref()
    }

    fn has_region(&self, id: &str) -> bool {
        self.regions.contains(id)
    }

    fn request_fullscreen(&mut self, target: &str) {
        self.pending.push_back(PendingRequest::Enter(target.to_string()));
    }

    fn request_exit(&mut self) {
        self.pending.push_back(PendingRequest::Exit);
    }

    fn subscribe(&mut self) -> (ListenerId, UnboundedReceiver<HostNotification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, tx));
        (id, rx)
    }

    fn unsubscribe(&mut self, id: ListenerId) {
        self.listeners.retain(|(listener, _)| *listener != id);
    }
}

/// Mirrors the host's full-screen flag for one target region.
pub struct FullscreenController {
    target: String,
    listener: ListenerId,
    notifications: UnboundedReceiver<HostNotification>,
    mode: PresentationMode,
}

impl FullscreenController {
    /// Register with the host and read its current state.
    pub fn attach<H: DisplayHost + ?Sized>(host: &mut H, target: impl Into<String>) -> Self {
        let (listener, notifications) = host.subscribe();
        Self {
            target: target.into(),
            listener,
            notifications,
            mode: PresentationMode {
                fullscreen: host.is_fullscreen(),
            },
        }
    }

    pub fn mode(&self) -> PresentationMode {
        self.mode
    }

    pub fn is_fullscreen(&self) -> bool {
        self.mode.fullscreen
    }

    /// Ask the host to enter or leave full-screen. Only a request: the
    /// mode changes when [`sync`](Self::sync) observes a notification.
    pub fn toggle<H: DisplayHost + ?Sized>(&self, host: &mut H) {
        if host.is_fullscreen() {
            host.request_exit();
        } else if host.has_region(&self.target) {
            host.request_fullscreen(&self.target);
        } else {
            tracing::debug!(
                "Presentation target '{}' not found, presenting '{}'",
                self.target,
                ROOT_TARGET
            );
            host.request_fullscreen(ROOT_TARGET);
        }
    }

    /// Drain notifications and re-read the host. Returns true when the
    /// mirrored mode changed.
    pub fn sync<H: DisplayHost + ?Sized>(&mut self, host: &H) -> bool {
        let mut notified = false;
        loop {
            match self.notifications.try_recv() {
                Ok(HostNotification::FullscreenChange) => notified = true,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::warn!("Display host dropped the full-screen listener");
                    break;
                }
            }
        }
        if !notified {
            return false;
        }
        let next = PresentationMode {
            fullscreen: host.is_fullscreen(),
        };
        let changed = next != self.mode;
        self.mode = next;
        if changed {
            tracing::info!("Presentation mode: fullscreen={}", next.fullscreen);
        }
        changed
    }

    /// Release the host listener.
    pub fn detach<H: DisplayHost + ?Sized>(self, host: &mut H) {
        host.unsubscribe(self.listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display() -> VirtualDisplay {
        let mut display = VirtualDisplay::new(true);
        display.register_region(CONTENT_TARGET);
        display
    }

    #[test]
    fn test_toggle_is_only_a_request() {
        let mut host = display();
        let mut controller = FullscreenController::attach(&mut host, CONTENT_TARGET);

        controller.toggle(&mut host);
        assert!(!controller.sync(&host));
        assert!(!controller.is_fullscreen());

        assert_eq!(host.pump(), 1);
        assert!(controller.sync(&host));
        assert!(controller.is_fullscreen());
        assert_eq!(host.fullscreen_target(), Some(CONTENT_TARGET));
    }

    #[test]
    fn test_toggle_exits_when_presenting() {
        let mut host = display();
        let mut controller = FullscreenController::attach(&mut host, CONTENT_TARGET);
        controller.toggle(&mut host);
        host.pump();
        controller.sync(&host);

        controller.toggle(&mut host);
        host.pump();
        controller.sync(&host);
        assert!(!controller.is_fullscreen());
        assert_eq!(controller.mode(), PresentationMode::normal());
    }

    #[test]
    fn test_rejected_request_leaves_state_matching_host() {
        let mut host = VirtualDisplay::new(false);
        host.register_region(CONTENT_TARGET);
        let mut controller = FullscreenController::attach(&mut host, CONTENT_TARGET);

        controller.toggle(&mut host);
        assert_eq!(host.pump(), 0);
        controller.sync(&host);
        assert_eq!(controller.is_fullscreen(), host.is_fullscreen());
        assert!(!controller.is_fullscreen());
    }

    #[test]
    fn test_unknown_target_falls_back_to_root() {
        let mut host = VirtualDisplay::new(true);
        let mut controller = FullscreenController::attach(&mut host, "missing");
        controller.toggle(&mut host);
        host.pump();
        controller.sync(&host);
        assert_eq!(host.fullscreen_target(), Some(ROOT_TARGET));
        assert!(controller.is_fullscreen());
    }

    #[test]
    fn test_native_escape_is_observed_through_notification() {
        let mut host = display();
        let mut controller = FullscreenController::attach(&mut host, CONTENT_TARGET);
        controller.toggle(&mut host);
        host.pump();
        controller.sync(&host);

        assert!(host.native_escape());
        assert!(controller.is_fullscreen());
        assert!(controller.sync(&host));
        assert_eq!(controller.mode(), PresentationMode::normal());
        assert!(!host.native_escape());
    }

    #[test]
    fn test_detach_releases_listener() {
        let mut host = display();
        let controller = FullscreenController::attach(&mut host, CONTENT_TARGET);
        assert_eq!(host.listener_count(), 1);
        controller.detach(&mut host);
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn test_dropped_controller_is_pruned_on_next_change() {
        let mut host = display();
        {
            let controller = FullscreenController::attach(&mut host, CONTENT_TARGET);
            controller.toggle(&mut host);
        }
        assert_eq!(host.listener_count(), 1);
        host.pump();
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn test_presentation_mode_hides_chrome() {
        assert!(PresentationMode::normal().shows_chrome());
        assert!(!PresentationMode::presenting().shows_chrome());
    }
}
