//=========================================================================
// Event Collector
//=========================================================================
//
// Host event collector with bounded polling and shutdown detection.
//
// Architecture:
//   Receiver<HostEvent> → collect_frame() → inputs + notifications → TickControl
//
// Bounded polling keeps a flooded channel from starving the frame; the
// remainder is picked up next frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::entity::EntityId;
use crate::core::input::InputEvent;

//=== HostEvent ===========================================================

/// Messages delivered to the host between frames.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// Input transitions captured by the platform since the last batch.
    Input(Vec<InputEvent>),

    /// Collision trigger on an entity.
    Triggered(EntityId),

    /// Activation change on an entity.
    Activated(EntityId),

    /// Stop the frame loop.
    Shutdown,
}

/// Out-of-band notification addressed to one entity's scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    Triggered(EntityId),
    Activated(EntityId),
}

//=== TickControl =========================================================

/// Frame loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Drains pending host events once per frame.
pub struct EventCollector {
    receiver: Receiver<HostEvent>,
    inputs: Vec<InputEvent>,
    notifications: Vec<Notification>,
}

impl EventCollector {
    pub const MAX_EVENTS_PER_FRAME: usize = 100;

    pub fn new(receiver: Receiver<HostEvent>) -> Self {
        Self {
            receiver,
            inputs: Vec::with_capacity(16),
            notifications: Vec::new(),
        }
    }

    /// Collects pending events (bounded to prevent starvation).
    ///
    /// Events received before a `Shutdown` in the same drain are kept, so
    /// the caller may still flush them.
    pub fn collect_frame(&mut self) -> TickControl {
        self.inputs.clear();
        self.notifications.clear();
        let mut drained = 0;

        while drained < Self::MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => {
                    drained += 1;
                    if self.handle_event(event) == TickControl::Exit {
                        debug!("Shutdown requested");
                        return TickControl::Exit;
                    }
                }
                Err(TryRecvError::Disconnected) => {
                    debug!("Event channel disconnected");
                    return TickControl::Exit;
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= Self::MAX_EVENTS_PER_FRAME {
            warn!("Event queue backlog: drained {} events this frame", drained);
        }

        TickControl::Continue
    }

    /// Input transitions collected this frame, in arrival order.
    pub fn inputs(&self) -> &[InputEvent] {
        &self.inputs
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Takes collected notifications, leaving an empty vec.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn handle_event(&mut self, event: HostEvent) -> TickControl {
        match event {
            HostEvent::Input(batch) => self.inputs.extend(batch),
            HostEvent::Triggered(id) => self.notifications.push(Notification::Triggered(id)),
            HostEvent::Activated(id) => self.notifications.push(Notification::Activated(id)),
            HostEvent::Shutdown => return TickControl::Exit,
        }
        TickControl::Continue
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
