//=========================================================================
// Platform Subsystem
//
// The native side of the bridge: everything scripts reach through the
// interop table, plus the plumbing that feeds it events.
//
// Architecture:
// ```text
//   PreviewWindow (winit, optional)
//     │  HostEvent::Input
//     ▼
//   crossbeam channel ──▶ EventCollector ──▶ Host frame loop
//                                              │
//                                              ▼
//                                         NativeWorld ◀── interop calls ── scripts
//                                              └─ ConsoleBuffer
// ```
//
// Responsibilities:
// - Own authoritative entity state and answer interop calls
// - Freeze input per frame and expose frame/fixed delta time
// - Record script log output
// - Translate winit events into capability codes
// - Collect host events at frame boundaries
//
//=========================================================================

//=== Submodules ==========================================================

mod console;
mod event_collector;
mod event_mapper;
mod native_world;
mod window;

//=== Public API ==========================================================

pub use console::{ConsoleBuffer, ConsoleLine};
pub use event_collector::{EventCollector, HostEvent, Notification, TickControl};
pub use event_mapper::map_window_event;
pub use native_world::{NativeEntity, NativeWorld};
pub use window::PreviewWindow;
