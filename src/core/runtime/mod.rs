//=========================================================================
// Script Runtime
//=========================================================================
//
// Owns every live script instance and drives their lifecycle calls.
//
// Architecture:
//   ScriptRuntime
//     └─ instances: Vec<ScriptInstance>   (attachment order)
//
// Flow (driven by the host once per frame):
//   notify_*() → update() → fixed_update() × N
//
// Notes:
// Calls are strictly sequential: one instance, one lifecycle method at
// a time. The runtime never holds native state; every call receives the
// interop surface to forward through.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::behaviour::{Behaviour, LifecycleState, ScriptInstance};
use crate::core::entity::EntityId;
use crate::core::error::HostError;
use crate::core::interop::InteropTable;

//=== Module Declarations =================================================

mod timestep;

//=== Public API ==========================================================

pub use timestep::FixedTimestep;

//=== ScriptRuntime =======================================================

/// Holds script instances and dispatches lifecycle calls to them.
#[derive(Debug, Default)]
pub struct ScriptRuntime {
    instances: Vec<ScriptInstance>,
}

impl ScriptRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Attachment -------------------------------------------------------

    /// Attaches `behaviour` to `entity` under `script` and runs its `start`.
    ///
    /// At most one instance may exist per (entity, script) pair.
    pub fn attach(
        &mut self,
        calls: &dyn InteropTable,
        entity: EntityId,
        script: &str,
        behaviour: Box<dyn Behaviour>,
    ) -> Result<(), HostError> {
        if self.position(entity, script).is_some() {
            warn!("Script `{}` is already attached to entity {}", script, entity);
            return Err(HostError::DuplicateInstance {
                entity,
                script: script.to_owned(),
            });
        }

        debug!("Attaching script `{}` to entity {}", script, entity);
        self.instances.push(ScriptInstance::new(entity, script, behaviour));

        if let Some(instance) = self.instances.last_mut() {
            instance.start(calls);
        }
        Ok(())
    }

    /// Shuts down and drops one instance. Returns `false` if none matched.
    pub fn detach(&mut self, calls: &dyn InteropTable, entity: EntityId, script: &str) -> bool {
        let Some(pos) = self.position(entity, script) else {
            debug!("Script `{}` not attached to entity {}, skipping detach", script, entity);
            return false;
        };

        let mut instance = self.instances.remove(pos);
        instance.shut_down(calls);
        true
    }

    /// Shuts down every instance on `entity`, in attachment order.
    /// Returns how many were removed.
    pub fn destroy_entity(&mut self, calls: &dyn InteropTable, entity: EntityId) -> usize {
        let (mut doomed, kept): (Vec<_>, Vec<_>) = self
            .instances
            .drain(..)
            .partition(|instance| instance.entity() == entity);
        self.instances = kept;

        for instance in &mut doomed {
            instance.shut_down(calls);
        }

        debug!("Destroyed {} script(s) on entity {}", doomed.len(), entity);
        doomed.len()
    }

    /// Shuts down every instance. Used when the host stops.
    pub fn shutdown_all(&mut self, calls: &dyn InteropTable) {
        debug!("Shutting down {} script instance(s)", self.instances.len());
        for mut instance in self.instances.drain(..) {
            instance.shut_down(calls);
        }
    }

    //--- Per-Frame Dispatch -----------------------------------------------

    pub fn update(&mut self, calls: &dyn InteropTable) {
        for instance in &mut self.instances {
            instance.update(calls);
        }
    }

    pub fn fixed_update(&mut self, calls: &dyn InteropTable) {
        for instance in &mut self.instances {
            instance.fixed_update(calls);
        }
    }

    //--- Notifications ----------------------------------------------------

    /// Delivers `on_triggered` to every instance on `entity`.
    pub fn notify_triggered(&mut self, calls: &dyn InteropTable, entity: EntityId) {
        for instance in self.instances.iter_mut().filter(|i| i.entity() == entity) {
            instance.on_triggered(calls);
        }
    }

    /// Delivers `set_active` to every instance on `entity`.
    pub fn notify_set_active(&mut self, calls: &dyn InteropTable, entity: EntityId) {
        for instance in self.instances.iter_mut().filter(|i| i.entity() == entity) {
            instance.set_active(calls);
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn contains(&self, entity: EntityId, script: &str) -> bool {
        self.position(entity, script).is_some()
    }

    pub fn state(&self, entity: EntityId, script: &str) -> Option<LifecycleState> {
        self.position(entity, script).map(|pos| self.instances[pos].state())
    }

    pub fn instances(&self) -> impl Iterator<Item = &ScriptInstance> {
        self.instances.iter()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    //--- Internal Helpers -------------------------------------------------

    fn position(&self, entity: EntityId, script: &str) -> Option<usize> {
        self.instances
            .iter()
            .position(|i| i.entity() == entity && i.script() == script)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
