//=========================================================================
// Native World
//=========================================================================
//
// Reference native side of the interop table: authoritative entity
// storage, frame timing, frozen input and the script log sink.
//
// Architecture:
// ```text
//   NativeWorld
//     ├─ entities: BTreeMap<EntityId, NativeEntity>
//     │    └─ transform, force, component set, attach stack
//     ├─ input: StateTracker        (frozen between begin/end_frame)
//     ├─ delta_time / fixed_delta_time
//     └─ console: ConsoleBuffer
// ```
//
// Notes:
// Interop calls take `&self`, so per-entity state sits behind a
// `RefCell`. Calls never overlap (the host is single-threaded and every
// call completes before returning), so borrows are always short.
//
// Ids start at 1 and are never handed out twice, even after despawn.
// Calls naming a missing entity read as zero and write nothing; each is
// logged as a warning.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::{Cell, Ref, RefCell};
use std::collections::{BTreeMap, BTreeSet};

use log::{debug, log, warn};

//=== Internal Dependencies ===============================================

use super::console::{ConsoleBuffer, ConsoleLine};
use crate::core::component::ComponentKind;
use crate::core::entity::EntityId;
use crate::core::error::HostError;
use crate::core::input::{InputEvent, ScriptKey, StateTracker};
use crate::core::interop::{InteropTable, InternalCall, LogLevel};
use crate::core::math::{Vector2, Vector3};

//=== NativeEntity ========================================================

/// Native-side record of one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeEntity {
    pub position: Vector2,
    pub rotation: f32,
    pub scale: f32,
    pub force: Vector2,
    components: BTreeSet<ComponentKind>,
    attach_order: Vec<ComponentKind>,
}

impl NativeEntity {
    fn new(position: Vector2, rotation: f32, scale: f32) -> Self {
        Self {
            position,
            rotation,
            scale,
            force: Vector2::ZERO,
            components: BTreeSet::from([ComponentKind::Transform]),
            attach_order: vec![ComponentKind::Transform],
        }
    }

    pub fn components(&self) -> impl Iterator<Item = ComponentKind> + '_ {
        self.components.iter().copied()
    }
}

//=== NativeWorld =========================================================

pub struct NativeWorld {
    entities: RefCell<BTreeMap<EntityId, NativeEntity>>,
    retired: RefCell<BTreeSet<EntityId>>,
    next_id: Cell<u32>,

    delta_time: f32,
    fixed_delta_time: f32,
    input: StateTracker,

    console: RefCell<ConsoleBuffer>,
}

impl NativeWorld {
    //--- Construction -----------------------------------------------------

    pub fn new(fixed_delta_time: f32) -> Self {
        Self::with_console_capacity(fixed_delta_time, ConsoleBuffer::DEFAULT_CAPACITY)
    }

    /// # Panics
    ///
    /// Panics if `fixed_delta_time <= 0.0` or `console_capacity == 0`.
    pub fn with_console_capacity(fixed_delta_time: f32, console_capacity: usize) -> Self {
        assert!(
            fixed_delta_time > 0.0,
            "Fixed delta time must be positive, got {}",
            fixed_delta_time
        );
        Self {
            entities: RefCell::new(BTreeMap::new()),
            retired: RefCell::new(BTreeSet::new()),
            next_id: Cell::new(1),
            delta_time: 0.0,
            fixed_delta_time,
            input: StateTracker::new(),
            console: RefCell::new(ConsoleBuffer::new(console_capacity)),
        }
    }

    //=====================================================================
    // Entity Storage
    //=====================================================================

    /// Creates an entity with the next free id.
    pub fn spawn(&self, position: Vector2, rotation: f32, scale: f32) -> EntityId {
        let mut entities = self.entities.borrow_mut();
        let retired = self.retired.borrow();

        let id = loop {
            let raw = self.next_id.get();
            self.next_id.set(raw.saturating_add(1));
            // `next_id` starts at 1, so `raw` is never the sentinel
            if let Some(id) = EntityId::new(raw) {
                if !entities.contains_key(&id) && !retired.contains(&id) {
                    break id;
                }
            }
        };

        entities.insert(id, NativeEntity::new(position, rotation, scale));
        debug!("Spawned entity {}", id);
        id
    }

    /// Creates an entity under a caller-chosen id.
    pub fn insert_entity(
        &self,
        id: EntityId,
        position: Vector2,
        rotation: f32,
        scale: f32,
    ) -> Result<(), HostError> {
        let mut entities = self.entities.borrow_mut();
        if entities.contains_key(&id) || self.retired.borrow().contains(&id) {
            return Err(HostError::DuplicateEntity(id));
        }

        entities.insert(id, NativeEntity::new(position, rotation, scale));
        if id.raw() >= self.next_id.get() {
            self.next_id.set(id.raw().saturating_add(1));
        }
        debug!("Inserted entity {}", id);
        Ok(())
    }

    /// Removes an entity. Its id is never reused.
    pub fn despawn(&self, id: EntityId) -> Result<NativeEntity, HostError> {
        let removed = self
            .entities
            .borrow_mut()
            .remove(&id)
            .ok_or(HostError::UnknownEntity(id))?;
        self.retired.borrow_mut().insert(id);
        debug!("Despawned entity {}", id);
        Ok(removed)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.borrow().contains_key(&id)
    }

    /// Snapshot of an entity's native record.
    pub fn entity(&self, id: EntityId) -> Option<NativeEntity> {
        self.entities.borrow().get(&id).cloned()
    }

    /// Live ids in ascending order.
    pub fn entity_ids(&self) -> Vec<EntityId> {
        self.entities.borrow().keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.entities.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.borrow().is_empty()
    }

    //=====================================================================
    // Frame Boundaries
    //=====================================================================

    /// Sets this frame's delta time and freezes input for the frame.
    pub fn begin_frame(&mut self, delta_time: f32, events: &[InputEvent]) {
        self.delta_time = delta_time;
        self.input.process_events(events);
    }

    /// Clears one-frame input edges.
    pub fn end_frame(&mut self) {
        self.input.clear();
    }

    pub fn input(&self) -> &StateTracker {
        &self.input
    }

    pub fn console(&self) -> Ref<'_, ConsoleBuffer> {
        self.console.borrow()
    }

    /// Removes and returns every buffered console line.
    pub fn drain_console(&self) -> Vec<ConsoleLine> {
        self.console.borrow_mut().drain()
    }

    //--- Internal Helpers -------------------------------------------------

    fn read<R: Default>(
        &self,
        call: InternalCall,
        id: EntityId,
        f: impl FnOnce(&NativeEntity) -> R,
    ) -> R {
        match self.entities.borrow().get(&id) {
            Some(entity) => f(entity),
            None => {
                warn!("{} on missing entity {}, returning default", call, id);
                R::default()
            }
        }
    }

    fn write(&self, call: InternalCall, id: EntityId, f: impl FnOnce(&mut NativeEntity)) {
        match self.entities.borrow_mut().get_mut(&id) {
            Some(entity) => f(entity),
            None => warn!("{} on missing entity {}, ignored", call, id),
        }
    }
}

//=== InteropTable Implementation =========================================

impl InteropTable for NativeWorld {
    //--- Transform --------------------------------------------------------

    fn entity_get_position(&self, entity: EntityId) -> Vector2 {
        self.read(InternalCall::EntityGetPosition, entity, |e| e.position)
    }

    fn entity_set_position(&self, entity: EntityId, position: Vector2) {
        self.write(InternalCall::EntitySetPosition, entity, |e| e.position = position)
    }

    fn entity_get_force(&self, entity: EntityId) -> Vector2 {
        self.read(InternalCall::EntityGetForce, entity, |e| e.force)
    }

    fn entity_set_force(&self, entity: EntityId, force: Vector2) {
        self.write(InternalCall::EntitySetForce, entity, |e| e.force = force)
    }

    fn entity_get_rotation(&self, entity: EntityId) -> f32 {
        self.read(InternalCall::EntityGetRotation, entity, |e| e.rotation)
    }

    fn entity_set_rotation(&self, entity: EntityId, rotation: f32) {
        self.write(InternalCall::EntitySetRotation, entity, |e| e.rotation = rotation)
    }

    fn entity_get_scale(&self, entity: EntityId) -> f32 {
        self.read(InternalCall::EntityGetScale, entity, |e| e.scale)
    }

    fn entity_set_scale(&self, entity: EntityId, scale: f32) {
        self.write(InternalCall::EntitySetScale, entity, |e| e.scale = scale)
    }

    //--- Time -------------------------------------------------------------

    fn get_delta_time(&self) -> f32 {
        self.delta_time
    }

    fn get_fixed_delta_time(&self) -> f32 {
        self.fixed_delta_time
    }

    //--- Component Membership ---------------------------------------------

    fn entity_has_component(&self, entity: EntityId, kind: ComponentKind) -> bool {
        self.read(InternalCall::EntityHasComponent, entity, |e| e.components.contains(&kind))
    }

    fn entity_add_component(&self, entity: EntityId, kind: ComponentKind) {
        self.write(InternalCall::EntityAddComponent, entity, |e| {
            if e.components.insert(kind) {
                e.attach_order.push(kind);
                debug!("Added {} to entity {}", kind, entity);
            } else {
                debug!("Entity {} already has {}", entity, kind);
            }
        })
    }

    fn entity_remove_component(&self, entity: EntityId) {
        self.write(InternalCall::EntityRemoveComponent, entity, |e| match e.attach_order.pop() {
            Some(kind) => {
                e.components.remove(&kind);
                debug!("Removed {} from entity {}", kind, entity);
            }
            None => debug!("Entity {} has no attached component to remove", entity),
        })
    }

    //--- Input ------------------------------------------------------------

    fn get_axis_horizontal(&self) -> i32 {
        self.input.axis_horizontal()
    }

    fn get_axis_vertical(&self) -> i32 {
        self.input.axis_vertical()
    }

    fn get_key_down(&self, key: ScriptKey) -> bool {
        self.input.is_key_pressed(key)
    }

    //--- Diagnostics ------------------------------------------------------

    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Fatal => log!(target: "script", level.as_log_level(), "FATAL: {}", message),
            _ => log!(target: "script", level.as_log_level(), "{}", message),
        }
        self.console.borrow_mut().push(level, message);
    }

    fn log_vector3(&self, value: Vector3) -> Vector3 {
        let line = format!("({}, {}, {})", value.x, value.y, value.z);
        log!(target: "script", log::Level::Debug, "{}", line);
        self.console.borrow_mut().push(LogLevel::Debug, line);
        -value
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- Test Helpers -----------------------------------------------------

    fn world() -> NativeWorld {
        NativeWorld::new(1.0 / 60.0)
    }

    fn id(raw: u32) -> EntityId {
        EntityId::new(raw).unwrap()
    }

    //=====================================================================
    // Storage Tests
    //=====================================================================

    #[test]
    fn ids_start_at_one_and_are_never_reused() {
        let world = world();

        let a = world.spawn(Vector2::ZERO, 0.0, 1.0);
        let b = world.spawn(Vector2::ZERO, 0.0, 1.0);
        assert_eq!((a.raw(), b.raw()), (1, 2));

        world.despawn(b).unwrap();
        let c = world.spawn(Vector2::ZERO, 0.0, 1.0);
        assert_eq!(c.raw(), 3);
        assert!(matches!(
            world.insert_entity(b, Vector2::ZERO, 0.0, 1.0),
            Err(HostError::DuplicateEntity(_))
        ));
    }

    #[test]
    fn inserted_ids_are_skipped_by_spawn() {
        let world = world();

        world.insert_entity(id(7), Vector2::ZERO, 0.0, 1.0).unwrap();
        assert!(world.contains(id(7)));

        let next = world.spawn(Vector2::ZERO, 0.0, 1.0);
        assert_eq!(next.raw(), 8);
        assert_eq!(world.entity_ids(), vec![id(7), id(8)]);
    }

    #[test]
    fn despawn_unknown_entity_errors() {
        let world = world();
        assert!(matches!(world.despawn(id(4)), Err(HostError::UnknownEntity(_))));
    }

    //=====================================================================
    // Interop Tests
    //=====================================================================

    #[test]
    fn setters_round_trip_through_getters() {
        let world = world();
        let e = world.spawn(Vector2::ZERO, 0.0, 1.0);

        world.entity_set_position(e, Vector2::new(3.0, 4.0));
        world.entity_set_force(e, Vector2::new(-1.0, 0.5));
        world.entity_set_rotation(e, 2.0);
        world.entity_set_scale(e, 0.5);

        assert_eq!(world.entity_get_position(e), Vector2::new(3.0, 4.0));
        assert_eq!(world.entity_get_force(e), Vector2::new(-1.0, 0.5));
        assert_eq!(world.entity_get_rotation(e), 2.0);
        assert_eq!(world.entity_get_scale(e), 0.5);
    }

    #[test]
    fn missing_entity_reads_zero_and_ignores_writes() {
        let world = world();
        let ghost = id(42);

        world.entity_set_position(ghost, Vector2::new(1.0, 1.0));

        assert_eq!(world.entity_get_position(ghost), Vector2::ZERO);
        assert_eq!(world.entity_get_scale(ghost), 0.0);
        assert!(!world.entity_has_component(ghost, ComponentKind::Transform));
        assert!(world.is_empty());
    }

    #[test]
    fn remove_pops_most_recent_attachment() {
        let world = world();
        let e = world.spawn(Vector2::ZERO, 0.0, 1.0);
        assert!(world.entity_has_component(e, ComponentKind::Transform));

        world.entity_add_component(e, ComponentKind::Rigidbody2D);
        assert!(world.entity_has_component(e, ComponentKind::Rigidbody2D));

        world.entity_remove_component(e);
        assert!(!world.entity_has_component(e, ComponentKind::Rigidbody2D));
        assert!(world.entity_has_component(e, ComponentKind::Transform));

        // Transform sits at the bottom of the stack
        world.entity_remove_component(e);
        assert!(!world.entity_has_component(e, ComponentKind::Transform));
        assert_eq!(world.entity(e).unwrap().components().count(), 0);

        // Nothing attached: no-op
        world.entity_remove_component(e);
        assert!(world.contains(e));
    }

    #[test]
    fn key_down_is_edge_and_axes_are_level() {
        let mut world = world();

        world.begin_frame(0.02, &[InputEvent::KeyDown(ScriptKey::KeyW)]);
        assert!(world.get_key_down(ScriptKey::KeyW));
        assert_eq!(world.get_axis_vertical(), 1);
        assert_eq!(world.get_delta_time(), 0.02);
        world.end_frame();

        world.begin_frame(0.02, &[]);
        assert!(!world.get_key_down(ScriptKey::KeyW));
        assert_eq!(world.get_axis_vertical(), 1);
        world.end_frame();
    }

    #[test]
    fn logs_land_in_console() {
        let world = world();

        world.log(LogLevel::Warning, "low health");
        let echoed = world.log_vector3(Vector3::new(1.0, 2.0, 3.0));

        assert_eq!(echoed, Vector3::new(-1.0, -2.0, -3.0));
        let lines = world.drain_console();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].level, LogLevel::Warning);
        assert_eq!(lines[1].message, "(1, 2, 3)");
    }
}
