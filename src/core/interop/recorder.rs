//=========================================================================
// Call Recorder
//=========================================================================
//
// Interop decorator that forwards to an inner table and records which
// entry point each call went through.
//
// Used to verify that handle accessors and facades make exactly one
// native round trip per access, and to trace interop traffic while
// debugging a script.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;

use log::trace;

//=== Internal Dependencies ===============================================

use super::{InteropTable, InternalCall, LogLevel};
use crate::core::component::ComponentKind;
use crate::core::entity::EntityId;
use crate::core::input::ScriptKey;
use crate::core::math::{Vector2, Vector3};

//=== CallRecorder ========================================================

/// Records every entry point invoked through it, in call order.
pub struct CallRecorder<'a, T: InteropTable + ?Sized> {
    inner: &'a T,
    calls: RefCell<Vec<InternalCall>>,
}

impl<'a, T: InteropTable + ?Sized> CallRecorder<'a, T> {
    pub fn new(inner: &'a T) -> Self {
        Self {
            inner,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Snapshot of the calls recorded so far.
    pub fn calls(&self) -> Vec<InternalCall> {
        self.calls.borrow().clone()
    }

    /// Returns and forgets the recorded calls.
    pub fn take(&self) -> Vec<InternalCall> {
        self.calls.take()
    }

    pub fn count(&self, call: InternalCall) -> usize {
        self.calls.borrow().iter().filter(|&&c| c == call).count()
    }

    fn record(&self, call: InternalCall) {
        trace!("interop call: {}", call);
        self.calls.borrow_mut().push(call);
    }
}

impl<T: InteropTable + ?Sized> InteropTable for CallRecorder<'_, T> {
    fn entity_get_position(&self, entity: EntityId) -> Vector2 {
        self.record(InternalCall::EntityGetPosition);
        self.inner.entity_get_position(entity)
    }

    fn entity_set_position(&self, entity: EntityId, position: Vector2) {
        self.record(InternalCall::EntitySetPosition);
        self.inner.entity_set_position(entity, position)
    }

    fn entity_get_force(&self, entity: EntityId) -> Vector2 {
        self.record(InternalCall::EntityGetForce);
        self.inner.entity_get_force(entity)
    }

    fn entity_set_force(&self, entity: EntityId, force: Vector2) {
        self.record(InternalCall::EntitySetForce);
        self.inner.entity_set_force(entity, force)
    }

    fn entity_get_rotation(&self, entity: EntityId) -> f32 {
        self.record(InternalCall::EntityGetRotation);
        self.inner.entity_get_rotation(entity)
    }

    fn entity_set_rotation(&self, entity: EntityId, rotation: f32) {
        self.record(InternalCall::EntitySetRotation);
        self.inner.entity_set_rotation(entity, rotation)
    }

    fn entity_get_scale(&self, entity: EntityId) -> f32 {
        self.record(InternalCall::EntityGetScale);
        self.inner.entity_get_scale(entity)
    }

    fn entity_set_scale(&self, entity: EntityId, scale: f32) {
        self.record(InternalCall::EntitySetScale);
        self.inner.entity_set_scale(entity, scale)
    }

    fn get_delta_time(&self) -> f32 {
        self.record(InternalCall::GetDeltaTime);
        self.inner.get_delta_time()
    }

    fn get_fixed_delta_time(&self) -> f32 {
        self.record(InternalCall::GetFixedDeltaTime);
        self.inner.get_fixed_delta_time()
    }

    fn entity_has_component(&self, entity: EntityId, kind: ComponentKind) -> bool {
        self.record(InternalCall::EntityHasComponent);
        self.inner.entity_has_component(entity, kind)
    }

    fn entity_add_component(&self, entity: EntityId, kind: ComponentKind) {
        self.record(InternalCall::EntityAddComponent);
        self.inner.entity_add_component(entity, kind)
    }

    fn entity_remove_component(&self, entity: EntityId) {
        self.record(InternalCall::EntityRemoveComponent);
        self.inner.entity_remove_component(entity)
    }

    fn get_axis_horizontal(&self) -> i32 {
        self.record(InternalCall::GetAxisHorizontal);
        self.inner.get_axis_horizontal()
    }

    fn get_axis_vertical(&self) -> i32 {
        self.record(InternalCall::GetAxisVertical);
        self.inner.get_axis_vertical()
    }

    fn get_key_down(&self, key: ScriptKey) -> bool {
        self.record(InternalCall::GetKeyDown);
        self.inner.get_key_down(key)
    }

    fn log(&self, level: LogLevel, message: &str) {
        self.record(InternalCall::for_log_level(level));
        self.inner.log(level, message)
    }

    fn log_vector3(&self, value: Vector3) -> Vector3 {
        self.record(InternalCall::LogVector3);
        self.inner.log_vector3(value)
    }
}
