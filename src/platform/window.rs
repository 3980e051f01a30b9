//=========================================================================
// Preview Window
//
// Optional OS window feeding live keyboard/mouse input to the host.
//
// Architecture:
// ```text
//  Main Thread:                     Host Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop        │    │  Host::run()     │
//  │   ↓                      │    │   ↓              │
//  │  map_window_event()      │    │  EventCollector  │
//  │   ↓                      │    │   ↓              │
//  │  pending: Vec<InputEvent>│    │  NativeWorld     │
//  │   ↓                      │    │   ↓              │
//  │  RedrawRequested (flush) │    │  ScriptRuntime   │
//  │   ↓                      │    └──────────────────┘
//  │  Channel ────────────────┼─────────────┘
//  └──────────────────────────┘    HostEvent
// ```
//
// Notes:
// RedrawRequested is the batch boundary; empty batches are not sent.
// Winit requires the event loop on the main thread on macOS/iOS, so the
// host runs on its own thread when a window is used.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::Sender;
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Dependencies ===============================================

use super::event_collector::HostEvent;
use super::event_mapper::map_window_event;
use crate::core::error::HostError;
use crate::core::input::InputEvent;

//=== PreviewWindow =======================================================

pub struct PreviewWindow {
    /// Created lazily in `resumed()`.
    window: Option<Window>,
    pending: Vec<InputEvent>,
    event_sender: Sender<HostEvent>,
}

impl PreviewWindow {
    pub fn new(event_sender: Sender<HostEvent>) -> Self {
        info!(target: "platform", "Preview window initialized");
        Self {
            window: None,
            pending: Vec::new(),
            event_sender,
        }
    }

    /// Runs the event loop until the window closes. Blocks the calling thread.
    pub fn run(mut self) -> Result<(), HostError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new()?;
        event_loop.run_app(&mut self)?;
        Ok(())
    }

    //--- Internal Helpers -------------------------------------------------

    fn flush_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }

        let batch = std::mem::take(&mut self.pending);
        let count = batch.len();
        trace!(target: "platform::input", "Flushing {} input events", count);

        if self.event_sender.send(HostEvent::Input(batch)).is_err() {
            warn!(target: "platform::input", "Channel disconnected, dropping {} events", count);
        }
    }

    fn request_shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.flush_pending();
        let _ = self.event_sender.send(HostEvent::Shutdown);
        event_loop.exit();
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for PreviewWindow {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title("Octane Scripting")
            .with_inner_size(LogicalSize::new(800, 600));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{}",
                    window.inner_size().width,
                    window.inner_size().height
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.request_shutdown(event_loop);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.request_shutdown(event_loop);
            }

            WindowEvent::RedrawRequested => {
                self.flush_pending();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            other => {
                if let Some(input) = map_window_event(other) {
                    self.pending.push(input);
                }
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
