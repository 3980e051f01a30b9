//=========================================================================
// Octane Scripting Library Root
//
// Behaviour scripts for entity-driven games, and the native bridge they
// run against.
//
// Responsibilities:
// - Expose the behaviour lifecycle and the interop call table (`core`)
// - Provide a reference native host with a frame loop (`Host`)
// - Ship the built-in scripts (`scripts`)
//
// Typical usage:
// ```no_run
// use octane_scripting::HostBuilder;
//
// fn main() {
//     let mut host = HostBuilder::new().build();
//     let id = host.spawn(Default::default(), 0.0, 1.0);
//     host.attach_script(id, "ClockWiseSpin").unwrap();
//     host.run_frames(60, 1.0 / 60.0);
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` is the managed side: value types, entity handles, components,
// the lifecycle trait and the runtime. It never owns entity state.
//
// `platform` is the native side: the reference world behind the interop
// table, the event channel plumbing and the Winit preview window.
//
pub mod config;
pub mod core;
pub mod platform;
pub mod prelude;
pub mod scripts;

//--- Internal Modules ----------------------------------------------------
//
// `engine` defines the host entry point and frame loop.
//
mod engine;

//--- Public Exports ------------------------------------------------------

pub use config::{EntitySpawn, HostConfig};
pub use engine::{Host, HostBuilder};
