//=========================================================================
// Behaviour System
//=========================================================================
//
// Script lifecycle contract and per-instance state machine.
//
// Architecture:
//   ScriptRegistry (name → factory)
//     └─ create() → Box<dyn Behaviour>
//                     └─ ScriptInstance (entity, state, behaviour)
//
// Lifecycle:
//   Uninitialized ──start──▶ Active ──shut_down──▶ ShutDown
//                              │
//                        (panic caught)
//                              ▼
//                           Faulted ──shut_down──▶ ShutDown
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::context::ScriptContext;

//=== Module Declarations =================================================

mod instance;
mod registry;

//=== Public API ==========================================================

pub use instance::ScriptInstance;
pub use registry::ScriptRegistry;

//=== Behaviour Trait =====================================================

/// Lifecycle callbacks implemented by every script.
///
/// Only `update()` is required. Every other hook defaults to doing nothing:
///
/// ```rust
/// # use octane_scripting::prelude::*;
/// struct Drift;
///
/// impl Behaviour for Drift {
///     fn update(&mut self, ctx: &ScriptContext) {
///         let entity = ctx.entity();
///         entity.set_position(entity.position() + Vector2::new(1.0, 0.0));
///     }
/// }
/// ```
///
/// The host serializes all calls: no two lifecycle methods of any
/// instance ever run at the same time.
pub trait Behaviour: Send {
    /// Called once, before the first `update` or `fixed_update`.
    fn start(&mut self, _ctx: &ScriptContext) {}

    /// Called once per simulation frame.
    fn update(&mut self, ctx: &ScriptContext);

    /// Called once per fixed-timestep tick (zero or more times per frame).
    fn fixed_update(&mut self, _ctx: &ScriptContext) {}

    /// Called once when the entity is destroyed or the script detached.
    /// Nothing is called afterwards.
    fn shut_down(&mut self, _ctx: &ScriptContext) {}

    /// Out-of-band trigger (collision) notification.
    fn on_triggered(&mut self, _ctx: &ScriptContext) {}

    /// Out-of-band activation notification.
    fn set_active(&mut self, _ctx: &ScriptContext) {}
}

//=== LifecycleState ======================================================

/// Where a script instance is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    /// Constructed, `start` not yet run.
    Uninitialized,

    /// Receiving updates and notifications.
    Active,

    /// A lifecycle call panicked. Only `shut_down` will still run.
    Faulted,

    /// Terminal.
    ShutDown,
}

impl LifecycleState {
    /// Whether per-frame calls and notifications are delivered.
    pub fn is_running(self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::ShutDown)
    }
}
