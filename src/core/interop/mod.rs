//=========================================================================
// Interop Call Table
//=========================================================================
//
// The closed set of native entry points scripts may call.
//
// This module defines the contract between managed scripts and the
// native engine core, so native backends can be swapped (real engine,
// in-memory reference host, recording mock) without touching scripts.
//
// Contract:
// - Every entry point is a synchronous, blocking round trip.
// - No entry point caches: two reads in one frame may differ if native
//   code mutated state in between.
// - Entry points never fail. Passing a destroyed entity id is a contract
//   violation with an unspecified (but memory-safe) result.
//
// Components:
// - `InteropTable`: the entry points themselves
// - `InternalCall`: identifiers for each entry point (binding, tracing)
// - `recorder`: decorator that records every call made through it
//
//=========================================================================

//=== Module Declarations =================================================

mod recorder;

//=== Internal Dependencies ===============================================

use crate::core::component::ComponentKind;
use crate::core::entity::EntityId;
use crate::core::input::ScriptKey;
use crate::core::math::{Vector2, Vector3};

//=== Public API ==========================================================

pub use recorder::CallRecorder;

//=== LogLevel ============================================================

/// Severity attached to a script log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
    Fatal,
}

impl LogLevel {
    /// Closest `log` crate level. `Fatal` has no counterpart and maps to `Error`.
    pub fn as_log_level(self) -> log::Level {
        match self {
            Self::Trace => log::Level::Trace,
            Self::Debug => log::Level::Debug,
            Self::Info => log::Level::Info,
            Self::Warning => log::Level::Warn,
            Self::Error | Self::Fatal => log::Level::Error,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
        }
    }
}

//=== InteropTable ========================================================

/// Native entry points reachable from scripts.
///
/// Methods take `&self`: authoritative state lives on the native side,
/// and a setter mutates native storage rather than anything owned here.
/// Implementations must complete every call before returning.
pub trait InteropTable {
    //--- Transform --------------------------------------------------------

    fn entity_get_position(&self, entity: EntityId) -> Vector2;
    fn entity_set_position(&self, entity: EntityId, position: Vector2);

    fn entity_get_force(&self, entity: EntityId) -> Vector2;
    fn entity_set_force(&self, entity: EntityId, force: Vector2);

    fn entity_get_rotation(&self, entity: EntityId) -> f32;
    fn entity_set_rotation(&self, entity: EntityId, rotation: f32);

    fn entity_get_scale(&self, entity: EntityId) -> f32;
    fn entity_set_scale(&self, entity: EntityId, scale: f32);

    //--- Time -------------------------------------------------------------

    /// Duration of the current frame in seconds.
    fn get_delta_time(&self) -> f32;

    /// Duration of one fixed simulation step in seconds.
    fn get_fixed_delta_time(&self) -> f32;

    //--- Component Membership ---------------------------------------------

    fn entity_has_component(&self, entity: EntityId, kind: ComponentKind) -> bool;
    fn entity_add_component(&self, entity: EntityId, kind: ComponentKind);

    /// Removes a component; which kind is resolved on the native side.
    fn entity_remove_component(&self, entity: EntityId);

    //--- Input ------------------------------------------------------------

    /// Discretized horizontal input in {-1, 0, 1}.
    fn get_axis_horizontal(&self) -> i32;

    /// Discretized vertical input in {-1, 0, 1}.
    fn get_axis_vertical(&self) -> i32;

    /// Whether `key` went down this frame.
    fn get_key_down(&self, key: ScriptKey) -> bool;

    //--- Diagnostics ------------------------------------------------------

    fn log(&self, level: LogLevel, message: &str);

    /// Round-trips a vector through native code (interop smoke test).
    fn log_vector3(&self, value: Vector3) -> Vector3;
}

//=== InternalCall ========================================================

/// Identifier of a single native entry point.
///
/// The set is closed and mirrors the names under which native code
/// registers each function (`"InternalCalls::<Name>"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InternalCall {
    Log,
    DebugTrace,
    DebugInfo,
    DebugWarning,
    DebugError,
    DebugFatal,
    LogVector3,
    GetKeyDown,
    GetAxisHorizontal,
    GetAxisVertical,
    EntityGetPosition,
    EntitySetPosition,
    EntityGetForce,
    EntitySetForce,
    EntityGetRotation,
    EntitySetRotation,
    EntityGetScale,
    EntitySetScale,
    GetDeltaTime,
    GetFixedDeltaTime,
    EntityHasComponent,
    EntityAddComponent,
    EntityRemoveComponent,
}

impl InternalCall {
    pub const ALL: [InternalCall; 23] = [
        Self::Log,
        Self::DebugTrace,
        Self::DebugInfo,
        Self::DebugWarning,
        Self::DebugError,
        Self::DebugFatal,
        Self::LogVector3,
        Self::GetKeyDown,
        Self::GetAxisHorizontal,
        Self::GetAxisVertical,
        Self::EntityGetPosition,
        Self::EntitySetPosition,
        Self::EntityGetForce,
        Self::EntitySetForce,
        Self::EntityGetRotation,
        Self::EntitySetRotation,
        Self::EntityGetScale,
        Self::EntitySetScale,
        Self::GetDeltaTime,
        Self::GetFixedDeltaTime,
        Self::EntityHasComponent,
        Self::EntityAddComponent,
        Self::EntityRemoveComponent,
    ];

    /// Entry point used for a log line of the given severity.
    pub fn for_log_level(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => Self::Log,
            LogLevel::Trace => Self::DebugTrace,
            LogLevel::Info => Self::DebugInfo,
            LogLevel::Warning => Self::DebugWarning,
            LogLevel::Error => Self::DebugError,
            LogLevel::Fatal => Self::DebugFatal,
        }
    }

    /// Bare entry point name, e.g. `EntityGetPosition`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Log => "Log",
            Self::DebugTrace => "DebugTrace",
            Self::DebugInfo => "DebugInfo",
            Self::DebugWarning => "DebugWarning",
            Self::DebugError => "DebugError",
            Self::DebugFatal => "DebugFatal",
            Self::LogVector3 => "LogVector3",
            Self::GetKeyDown => "GetKeyDown",
            Self::GetAxisHorizontal => "GetAxisHorizontal",
            Self::GetAxisVertical => "GetAxisVertical",
            Self::EntityGetPosition => "EntityGetPosition",
            Self::EntitySetPosition => "EntitySetPosition",
            Self::EntityGetForce => "EntityGetForce",
            Self::EntitySetForce => "EntitySetForce",
            Self::EntityGetRotation => "EntityGetRotation",
            Self::EntitySetRotation => "EntitySetRotation",
            Self::EntityGetScale => "EntityGetScale",
            Self::EntitySetScale => "EntitySetScale",
            Self::GetDeltaTime => "GetDeltaTime",
            Self::GetFixedDeltaTime => "GetFixedDeltaTime",
            Self::EntityHasComponent => "EntityHasComponent",
            Self::EntityAddComponent => "EntityAddComponent",
            Self::EntityRemoveComponent => "EntityRemoveComponent",
        }
    }

    /// Fully qualified registration symbol, e.g. `InternalCalls::Log`.
    pub fn symbol(self) -> String {
        format!("InternalCalls::{}", self.name())
    }
}

impl std::fmt::Display for InternalCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn call_names_are_unique() {
        let names: HashSet<&str> = InternalCall::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(names.len(), InternalCall::ALL.len());
    }

    #[test]
    fn symbols_are_namespaced() {
        assert_eq!(InternalCall::EntityGetPosition.symbol(), "InternalCalls::EntityGetPosition");
        assert_eq!(InternalCall::Log.to_string(), "Log");
    }

    #[test]
    fn every_log_level_has_an_entry_point() {
        let levels = [
            LogLevel::Trace,
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warning,
            LogLevel::Error,
            LogLevel::Fatal,
        ];
        let calls: HashSet<InternalCall> =
            levels.iter().map(|&l| InternalCall::for_log_level(l)).collect();
        assert_eq!(calls.len(), levels.len());
    }

    #[test]
    fn fatal_maps_to_error_level() {
        assert_eq!(LogLevel::Fatal.as_log_level(), log::Level::Error);
        assert_eq!(LogLevel::Warning.as_log_level(), log::Level::Warn);
    }
}
