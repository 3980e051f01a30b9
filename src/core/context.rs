//=========================================================================
// Script Context
//=========================================================================
//
// Per-call context handed to every lifecycle method.
//
// Contains what a script may touch during one call:
// - entity: handle to the entity the script is attached to
// - input:  polling facade over the interop input entry points
// - debug:  logging facade over the interop log entry points
//
// Every facade call is a synchronous native round trip with no
// buffering or memoization. Input is frozen by the host for the
// duration of a frame, so repeated queries within one call agree.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::entity::{Entity, EntityId};
use crate::core::input::ScriptKey;
use crate::core::interop::{InteropTable, LogLevel};
use crate::core::math::Vector3;

//=== ScriptContext =======================================================

/// Context data accessible to a script during a lifecycle call.
#[derive(Clone, Copy)]
pub struct ScriptContext<'a> {
    entity: Entity<'a>,
}

impl<'a> ScriptContext<'a> {
    pub fn new(entity: EntityId, calls: &'a dyn InteropTable) -> Self {
        Self {
            entity: Entity::new(entity, calls),
        }
    }

    /// The entity this script instance is bound to.
    pub fn entity(&self) -> Entity<'a> {
        self.entity
    }

    pub fn input(&self) -> Input<'a> {
        Input {
            calls: self.entity.calls(),
        }
    }

    pub fn debug(&self) -> Debug<'a> {
        Debug {
            calls: self.entity.calls(),
        }
    }

    /// Shorthand for `entity().delta_time()`.
    pub fn delta_time(&self) -> f32 {
        self.entity.delta_time()
    }
}

//=== Input ===============================================================

/// Input polling for the current frame.
#[derive(Clone, Copy)]
pub struct Input<'a> {
    calls: &'a dyn InteropTable,
}

impl Input<'_> {
    /// -1 (left), 0 or 1 (right).
    pub fn get_axis_horizontal(&self) -> i32 {
        self.calls.get_axis_horizontal()
    }

    /// -1 (down), 0 or 1 (up).
    pub fn get_axis_vertical(&self) -> i32 {
        self.calls.get_axis_vertical()
    }

    /// True only in the frame `key` went down.
    pub fn get_key_down(&self, key: ScriptKey) -> bool {
        self.calls.get_key_down(key)
    }
}

//=== Debug ===============================================================

/// Leveled logging into the native console.
#[derive(Clone, Copy)]
pub struct Debug<'a> {
    calls: &'a dyn InteropTable,
}

impl Debug<'_> {
    pub fn log(&self, message: &str) {
        self.calls.log(LogLevel::Debug, message)
    }

    pub fn trace(&self, message: &str) {
        self.calls.log(LogLevel::Trace, message)
    }

    pub fn info(&self, message: &str) {
        self.calls.log(LogLevel::Info, message)
    }

    pub fn warning(&self, message: &str) {
        self.calls.log(LogLevel::Warning, message)
    }

    pub fn error(&self, message: &str) {
        self.calls.log(LogLevel::Error, message)
    }

    pub fn fatal(&self, message: &str) {
        self.calls.log(LogLevel::Fatal, message)
    }

    /// Echoes `value` through native code and returns what came back.
    pub fn log_vector3(&self, value: Vector3) -> Vector3 {
        self.calls.log_vector3(value)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
