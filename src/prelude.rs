//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use octane_scripting::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Host
pub use crate::config::{EntitySpawn, HostConfig};
pub use crate::engine::{Host, HostBuilder};

// Scripting surface
pub use crate::core::behaviour::{Behaviour, LifecycleState};
pub use crate::core::context::ScriptContext;
pub use crate::core::entity::{Entity, EntityId};
pub use crate::core::error::HostError;

// Components
pub use crate::core::component::{Component, ComponentKind, ComponentState, Rigidbody2D, Transform};

// Interop
pub use crate::core::input::ScriptKey;
pub use crate::core::interop::{InteropTable, LogLevel};

// Math
pub use crate::core::math::{Vector2, Vector3, Vector4};
