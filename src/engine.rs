//=========================================================================
// Scripting Host
//
// Main entry point: owns the native world, the script runtime and the
// frame loop that drives them.
//
// Architecture:
// ```text
//     HostBuilder  ──build()──>  Host  ──frame(dt)──>  [one frame]
//         │                       │
//         ├─ with_fixed_delta_time()   ├─ collect events
//         ├─ with_max_fixed_steps()    ├─ freeze input, set dt
//         ├─ with_channel_capacity()   ├─ notifications
//         └─ with_console_capacity()   ├─ update (attachment order)
//                                      ├─ fixed_update × N
//                                      └─ clear input edges
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Sender};
use log::{debug, error, info, warn};

//=== Internal Dependencies ===============================================

use crate::config::{EntitySpawn, HostConfig};
use crate::core::behaviour::{Behaviour, ScriptRegistry};
use crate::core::entity::EntityId;
use crate::core::error::HostError;
use crate::core::interop::InteropTable;
use crate::core::math::Vector2;
use crate::core::runtime::{FixedTimestep, ScriptRuntime};
use crate::platform::{
    EventCollector, HostEvent, NativeWorld, Notification, PreviewWindow, TickControl,
};
use crate::scripts;

//=== HostBuilder =========================================================

/// Builder for configuring and constructing a [`Host`].
///
/// # Default Values
///
/// - **Fixed delta time**: 1/60 s
/// - **Max fixed steps per frame**: 8
/// - **Channel capacity**: 128 events
/// - **Console capacity**: 256 lines
///
/// # Examples
///
/// ```
/// use octane_scripting::HostBuilder;
///
/// let mut host = HostBuilder::new()
///     .with_fixed_delta_time(1.0 / 120.0)
///     .build();
/// host.frame(1.0 / 60.0);
/// ```
#[derive(Debug, Clone)]
pub struct HostBuilder {
    fixed_delta_time: f32,
    max_fixed_steps: u32,
    channel_capacity: usize,
    console_capacity: usize,
}

impl HostBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            fixed_delta_time: 1.0 / 60.0,
            max_fixed_steps: 8,
            channel_capacity: 128,
            console_capacity: 256,
        }
    }

    /// Takes every host setting from `config`. Entities are not spawned
    /// here; see [`Host::spawn_all`].
    ///
    /// # Panics
    ///
    /// Panics on any non-positive setting, like the `with_*` methods.
    pub fn from_config(config: &HostConfig) -> Self {
        Self::new()
            .with_fixed_delta_time(config.fixed_delta_time)
            .with_max_fixed_steps(config.max_fixed_steps_per_frame)
            .with_channel_capacity(config.event_channel_capacity)
            .with_console_capacity(config.console_capacity)
    }

    /// Sets the duration of one fixed simulation step, in seconds.
    ///
    /// # Panics
    ///
    /// Panics if `seconds <= 0.0`.
    pub fn with_fixed_delta_time(mut self, seconds: f32) -> Self {
        assert!(seconds > 0.0, "Fixed delta time must be positive, got {}", seconds);
        self.fixed_delta_time = seconds;
        self
    }

    /// Caps how many fixed steps one frame may run.
    ///
    /// # Panics
    ///
    /// Panics if `steps == 0`.
    pub fn with_max_fixed_steps(mut self, steps: u32) -> Self {
        assert!(steps > 0, "Max fixed steps must be positive");
        self.max_fixed_steps = steps;
        self
    }

    /// Sets the capacity of the host event channel.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_console_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Console capacity must be positive");
        self.console_capacity = capacity;
        self
    }

    /// Builds the host with every built-in script registered.
    pub fn build(self) -> Host {
        info!(
            "Building host (fixed dt: {}, max steps: {}, channel: {}, console: {})",
            self.fixed_delta_time,
            self.max_fixed_steps,
            self.channel_capacity,
            self.console_capacity
        );

        let (sender, receiver) = bounded(self.channel_capacity);
        let mut registry = ScriptRegistry::new();
        scripts::register_builtin(&mut registry);

        Host {
            world: NativeWorld::with_console_capacity(self.fixed_delta_time, self.console_capacity),
            runtime: ScriptRuntime::new(),
            registry,
            timestep: FixedTimestep::new(self.fixed_delta_time, self.max_fixed_steps),
            collector: EventCollector::new(receiver),
            sender,
            exiting: false,
            frame_count: 0,
        }
    }
}

impl Default for HostBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Host ================================================================

/// Reference native host: world state, script instances and frame loop.
pub struct Host {
    world: NativeWorld,
    runtime: ScriptRuntime,
    registry: ScriptRegistry,
    timestep: FixedTimestep,
    collector: EventCollector,
    sender: Sender<HostEvent>,
    exiting: bool,
    frame_count: u64,
}

impl Host {
    //--- Accessors --------------------------------------------------------

    pub fn world(&self) -> &NativeWorld {
        &self.world
    }

    pub fn runtime(&self) -> &ScriptRuntime {
        &self.runtime
    }

    pub fn registry_mut(&mut self) -> &mut ScriptRegistry {
        &mut self.registry
    }

    /// Sender for platform input and notifications. Cloneable across threads.
    ///
    /// The host keeps a sender of its own, so the channel stays connected
    /// for as long as the host lives. Stop it with `HostEvent::Shutdown`.
    pub fn event_sender(&self) -> Sender<HostEvent> {
        self.sender.clone()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// True once a `Shutdown` event has been seen. Latched.
    pub fn is_exiting(&self) -> bool {
        self.exiting
    }

    //--- Entities ---------------------------------------------------------

    pub fn spawn(&mut self, position: Vector2, rotation: f32, scale: f32) -> EntityId {
        self.world.spawn(position, rotation, scale)
    }

    /// Creates an entity from a spawn description and attaches its scripts
    /// in listed order.
    ///
    /// All or nothing: when any script fails to attach, the scripts already
    /// started are shut down and the entity is removed again.
    pub fn spawn_from(&mut self, spawn: &EntitySpawn) -> Result<EntityId, HostError> {
        if let Some(unknown) = spawn.scripts.iter().find(|name| !self.registry.contains(name)) {
            return Err(HostError::UnknownScript(unknown.clone()));
        }

        let id = match spawn.id {
            Some(raw) => {
                let id = EntityId::try_from(raw)?;
                self.world.insert_entity(id, spawn.position, spawn.rotation, spawn.scale)?;
                id
            }
            None => self.world.spawn(spawn.position, spawn.rotation, spawn.scale),
        };

        self.world.entity_set_force(id, spawn.force);
        for &kind in &spawn.components {
            self.world.entity_add_component(id, kind);
        }
        for script in &spawn.scripts {
            if let Err(err) = self.attach_script(id, script) {
                self.roll_back(&[id]);
                return Err(err);
            }
        }
        Ok(id)
    }

    /// Spawns every entity listed in `config`. On failure, entities spawned
    /// by this call are destroyed again before the error is returned.
    pub fn spawn_all(&mut self, config: &HostConfig) -> Result<Vec<EntityId>, HostError> {
        let mut spawned = Vec::with_capacity(config.entities.len());
        for spawn in &config.entities {
            match self.spawn_from(spawn) {
                Ok(id) => spawned.push(id),
                Err(err) => {
                    self.roll_back(&spawned);
                    return Err(err);
                }
            }
        }
        Ok(spawned)
    }

    fn roll_back(&mut self, spawned: &[EntityId]) {
        for &id in spawned.iter().rev() {
            debug!("Rolling back spawn of entity {}", id);
            if let Err(err) = self.destroy_entity(id) {
                warn!("Rollback of entity {} failed: {}", id, err);
            }
        }
    }

    /// Shuts down every script on `entity`, then removes it from the world.
    pub fn destroy_entity(&mut self, entity: EntityId) -> Result<(), HostError> {
        if !self.world.contains(entity) {
            return Err(HostError::UnknownEntity(entity));
        }
        self.runtime.destroy_entity(&self.world, entity);
        self.world.despawn(entity)?;
        Ok(())
    }

    //--- Scripts ----------------------------------------------------------

    /// Instantiates a registered script class on `entity` and starts it.
    pub fn attach_script(&mut self, entity: EntityId, script: &str) -> Result<(), HostError> {
        if !self.world.contains(entity) {
            return Err(HostError::UnknownEntity(entity));
        }
        let behaviour = self.registry.create(script)?;
        self.runtime.attach(&self.world, entity, script, behaviour)
    }

    /// Attaches an already built behaviour under `script`.
    pub fn attach<B>(
        &mut self,
        entity: EntityId,
        script: &str,
        behaviour: B,
    ) -> Result<(), HostError>
    where
        B: Behaviour + 'static,
    {
        if !self.world.contains(entity) {
            return Err(HostError::UnknownEntity(entity));
        }
        self.runtime.attach(&self.world, entity, script, Box::new(behaviour))
    }

    pub fn detach_script(&mut self, entity: EntityId, script: &str) -> bool {
        self.runtime.detach(&self.world, entity, script)
    }

    //--- Frame Loop -------------------------------------------------------

    //--- frame() ----------------------------------------------------------
    //
    // Runs one frame of `delta_time` seconds:
    //  1. Drains pending host events
    //  2. Freezes input and publishes delta time
    //  3. Delivers trigger/activation notifications
    //  4. Updates every running script
    //  5. Runs the fixed steps owed by the accumulator
    //  6. Clears one-frame input edges
    //
    // Returns `Exit` without running the frame once shutdown is requested,
    // and on every call after that.
    //
    pub fn frame(&mut self, delta_time: f32) -> TickControl {
        if self.exiting {
            return TickControl::Exit;
        }
        if self.collector.collect_frame() == TickControl::Exit {
            self.exiting = true;
            return TickControl::Exit;
        }

        self.world.begin_frame(delta_time, self.collector.inputs());

        for notification in self.collector.take_notifications() {
            match notification {
                Notification::Triggered(id) => self.runtime.notify_triggered(&self.world, id),
                Notification::Activated(id) => self.runtime.notify_set_active(&self.world, id),
            }
        }

        self.runtime.update(&self.world);

        for _ in 0..self.timestep.advance(delta_time) {
            self.runtime.fixed_update(&self.world);
        }

        self.world.end_frame();
        self.frame_count += 1;
        TickControl::Continue
    }

    /// Runs up to `frames` frames of fixed length. Returns how many ran.
    pub fn run_frames(&mut self, frames: u64, delta_time: f32) -> u64 {
        for ran in 0..frames {
            if self.frame(delta_time) == TickControl::Exit {
                return ran;
            }
        }
        frames
    }

    /// Paced real-time loop. Blocks until a `Shutdown` event arrives, then
    /// shuts all scripts down.
    pub fn run(&mut self, frame_duration: Duration) {
        info!("Starting host loop ({:?} per frame)", frame_duration);
        let mut last = Instant::now();

        loop {
            let frame_start = Instant::now();
            let delta_time = frame_start.duration_since(last).as_secs_f32();
            last = frame_start;

            if self.frame(delta_time) == TickControl::Exit {
                info!("Host loop exiting after {} frames", self.frame_count);
                break;
            }

            let elapsed = frame_start.elapsed();
            if elapsed < frame_duration {
                thread::sleep(frame_duration - elapsed);
            }
        }

        self.shutdown();
    }

    /// Runs the host on a logic thread and a preview window on the calling
    /// thread, blocking until the window closes.
    ///
    /// # Lifecycle
    ///
    /// 1. Spawns the logic thread running [`Host::run`]
    /// 2. Runs the window event loop (blocks here)
    /// 3. On close: window sends `Shutdown` → logic thread shuts scripts down
    ///
    /// Must be called on the main thread on platforms where winit requires it.
    pub fn run_windowed(mut self, frame_duration: Duration) -> Result<(), HostError> {
        let control = self.event_sender();
        let window = PreviewWindow::new(self.event_sender());

        let logic = thread::spawn(move || self.run(frame_duration));
        info!("Host logic thread spawned");

        let result = window.run();
        if let Err(err) = &result {
            error!("Preview window error: {}", err);
            let _ = control.send(HostEvent::Shutdown);
        }

        match logic.join() {
            Ok(()) => info!("Host logic thread terminated cleanly"),
            Err(panic) => error!("Host logic thread panicked: {:?}", panic),
        }
        result
    }

    /// Runs `shut_down` on every live script instance.
    pub fn shutdown(&mut self) {
        if self.runtime.is_empty() {
            return;
        }
        debug!("Host shutting down {} script instances", self.runtime.len());
        self.runtime.shutdown_all(&self.world);
    }
}

impl Drop for Host {
    fn drop(&mut self) {
        self.shutdown();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
