//=========================================================================
// Script Instance
//=========================================================================
//
// One behaviour bound to one entity, plus the state machine guarding
// which lifecycle calls may still reach it.
//
// Every call into script code runs under `catch_unwind`. A panic is
// logged, the instance is marked `Faulted`, and the caller carries on
// with the rest of the frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use log::{debug, error, warn};

//=== Internal Dependencies ===============================================

use super::{Behaviour, LifecycleState};
use crate::core::context::ScriptContext;
use crate::core::entity::EntityId;
use crate::core::interop::InteropTable;

//=== ScriptInstance ======================================================

/// A behaviour attached to an entity.
pub struct ScriptInstance {
    entity: EntityId,
    script: String,
    state: LifecycleState,
    behaviour: Box<dyn Behaviour>,
}

impl ScriptInstance {
    pub fn new(entity: EntityId, script: impl Into<String>, behaviour: Box<dyn Behaviour>) -> Self {
        Self {
            entity,
            script: script.into(),
            state: LifecycleState::Uninitialized,
            behaviour,
        }
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    /// Class name the instance was created from.
    pub fn script(&self) -> &str {
        &self.script
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    //--- Lifecycle --------------------------------------------------------

    /// Runs `start` and activates the instance. Only valid once.
    pub fn start(&mut self, calls: &dyn InteropTable) {
        if self.state != LifecycleState::Uninitialized {
            warn!(
                "Script `{}` on entity {} already started (state {:?}), ignoring",
                self.script, self.entity, self.state
            );
            return;
        }

        debug!("Starting script `{}` on entity {}", self.script, self.entity);
        self.state = LifecycleState::Active;
        self.invoke("start", calls, |b, ctx| b.start(ctx));
    }

    pub fn update(&mut self, calls: &dyn InteropTable) {
        if self.state.is_running() {
            self.invoke("update", calls, |b, ctx| b.update(ctx));
        }
    }

    pub fn fixed_update(&mut self, calls: &dyn InteropTable) {
        if self.state.is_running() {
            self.invoke("fixed_update", calls, |b, ctx| b.fixed_update(ctx));
        }
    }

    pub fn on_triggered(&mut self, calls: &dyn InteropTable) {
        if self.state.is_running() {
            self.invoke("on_triggered", calls, |b, ctx| b.on_triggered(ctx));
        }
    }

    pub fn set_active(&mut self, calls: &dyn InteropTable) {
        if self.state.is_running() {
            self.invoke("set_active", calls, |b, ctx| b.set_active(ctx));
        }
    }

    /// Runs `shut_down` and moves to the terminal state.
    ///
    /// Faulted instances still get their `shut_down`. An instance that
    /// never started is retired without calling into the script.
    pub fn shut_down(&mut self, calls: &dyn InteropTable) {
        match self.state {
            LifecycleState::ShutDown => {
                warn!(
                    "Script `{}` on entity {} already shut down, ignoring",
                    self.script, self.entity
                );
            }
            LifecycleState::Uninitialized => {
                debug!("Retiring unstarted script `{}` on entity {}", self.script, self.entity);
                self.state = LifecycleState::ShutDown;
            }
            LifecycleState::Active | LifecycleState::Faulted => {
                debug!("Shutting down script `{}` on entity {}", self.script, self.entity);
                self.invoke("shut_down", calls, |b, ctx| b.shut_down(ctx));
                self.state = LifecycleState::ShutDown;
            }
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn invoke<F>(&mut self, hook: &'static str, calls: &dyn InteropTable, f: F)
    where
        F: FnOnce(&mut dyn Behaviour, &ScriptContext),
    {
        let ctx = ScriptContext::new(self.entity, calls);
        let behaviour = self.behaviour.as_mut();

        let result = panic::catch_unwind(AssertUnwindSafe(|| f(behaviour, &ctx)));

        if let Err(payload) = result {
            error!(
                "Script `{}` on entity {} panicked in {}: {}",
                self.script,
                self.entity,
                hook,
                panic_message(payload.as_ref())
            );
            if self.state != LifecycleState::ShutDown {
                self.state = LifecycleState::Faulted;
            }
        }
    }
}

impl std::fmt::Debug for ScriptInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptInstance")
            .field("entity", &self.entity)
            .field("script", &self.script)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

//--- Panic Payload -------------------------------------------------------

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "<non-string panic payload>"
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::Vector2;
    use crate::platform::NativeWorld;
    use std::sync::{Arc, Mutex};

    //--- Test Helpers -----------------------------------------------------

    type Journal = Arc<Mutex<Vec<&'static str>>>;

    struct Recording {
        journal: Journal,
        panic_in_update: bool,
    }

    impl Behaviour for Recording {
        fn start(&mut self, _ctx: &ScriptContext) {
            self.journal.lock().unwrap().push("start");
        }

        fn update(&mut self, _ctx: &ScriptContext) {
            self.journal.lock().unwrap().push("update");
            if self.panic_in_update {
                panic!("update exploded");
            }
        }

        fn fixed_update(&mut self, _ctx: &ScriptContext) {
            self.journal.lock().unwrap().push("fixed_update");
        }

        fn shut_down(&mut self, _ctx: &ScriptContext) {
            self.journal.lock().unwrap().push("shut_down");
        }

        fn on_triggered(&mut self, _ctx: &ScriptContext) {
            self.journal.lock().unwrap().push("on_triggered");
        }

        fn set_active(&mut self, _ctx: &ScriptContext) {
            self.journal.lock().unwrap().push("set_active");
        }
    }

    fn recording(panic_in_update: bool) -> (ScriptInstance, Journal, NativeWorld) {
        let world = NativeWorld::new(1.0 / 60.0);
        let id = world.spawn(Vector2::ZERO, 0.0, 1.0);
        let journal = Journal::default();
        let instance = ScriptInstance::new(
            id,
            "Recording",
            Box::new(Recording {
                journal: journal.clone(),
                panic_in_update,
            }),
        );
        (instance, journal, world)
    }

    //=====================================================================
    // Ordering Tests
    //=====================================================================

    #[test]
    fn calls_follow_lifecycle_order() {
        let (mut instance, journal, world) = recording(false);
        assert_eq!(instance.state(), LifecycleState::Uninitialized);

        instance.start(&world);
        instance.update(&world);
        instance.fixed_update(&world);
        instance.on_triggered(&world);
        instance.set_active(&world);
        instance.shut_down(&world);

        assert_eq!(
            *journal.lock().unwrap(),
            vec!["start", "update", "fixed_update", "on_triggered", "set_active", "shut_down"]
        );
        assert_eq!(instance.state(), LifecycleState::ShutDown);
    }

    #[test]
    fn nothing_runs_before_start() {
        let (mut instance, journal, world) = recording(false);

        instance.update(&world);
        instance.fixed_update(&world);
        instance.on_triggered(&world);

        assert!(journal.lock().unwrap().is_empty());
    }

    #[test]
    fn start_and_shut_down_run_once() {
        let (mut instance, journal, world) = recording(false);

        instance.start(&world);
        instance.start(&world);
        instance.shut_down(&world);
        instance.shut_down(&world);
        instance.update(&world);

        assert_eq!(*journal.lock().unwrap(), vec!["start", "shut_down"]);
    }

    #[test]
    fn unstarted_instance_retires_silently() {
        let (mut instance, journal, world) = recording(false);

        instance.shut_down(&world);

        assert!(journal.lock().unwrap().is_empty());
        assert!(instance.state().is_terminal());
    }

    //=====================================================================
    // Fault Tests
    //=====================================================================

    #[test]
    fn panic_faults_instance_but_shut_down_still_runs() {
        let (mut instance, journal, world) = recording(true);

        instance.start(&world);
        instance.update(&world);
        assert_eq!(instance.state(), LifecycleState::Faulted);

        instance.update(&world);
        instance.fixed_update(&world);
        instance.shut_down(&world);

        assert_eq!(*journal.lock().unwrap(), vec!["start", "update", "shut_down"]);
        assert_eq!(instance.state(), LifecycleState::ShutDown);
    }

    #[test]
    fn panic_messages_are_extracted() {
        let owned: Box<dyn Any + Send> = Box::new(String::from("owned"));
        let borrowed: Box<dyn Any + Send> = Box::new("borrowed");
        let other: Box<dyn Any + Send> = Box::new(42_u8);

        assert_eq!(panic_message(owned.as_ref()), "owned");
        assert_eq!(panic_message(borrowed.as_ref()), "borrowed");
        assert_eq!(panic_message(other.as_ref()), "<non-string panic payload>");
    }
}
