//=========================================================================
// Core
//
// The managed side of the scripting bridge.
//
// Responsibilities:
// - Value types and the capability code table shared with native code
// - The interop call table every native backend implements
// - Entity handles and component views forwarding through that table
// - The behaviour lifecycle contract and the runtime that drives it
//
// Notes:
// Nothing in here owns entity state. Every read and write goes through
// an `InteropTable`, so the same scripts run against the reference
// `NativeWorld`, a recorder, or any other backend.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod behaviour;
pub mod component;
pub mod context;
pub mod entity;
pub mod error;
pub mod input;
pub mod interop;
pub mod math;
pub mod runtime;

//=== Public API ==========================================================

pub use behaviour::{Behaviour, LifecycleState, ScriptInstance, ScriptRegistry};
pub use component::{Component, ComponentKind, ComponentState, Rigidbody2D, Transform};
pub use context::{Debug, Input, ScriptContext};
pub use entity::{Entity, EntityId};
pub use error::HostError;
pub use interop::{CallRecorder, InteropTable, InternalCall, LogLevel};
pub use runtime::{FixedTimestep, ScriptRuntime};
