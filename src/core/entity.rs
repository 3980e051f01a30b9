//=========================================================================
// Entity Handle
//=========================================================================
//
// Non-owning view of a native entity.
//
// Responsibilities:
// - Carry the native-assigned id of one entity
// - Forward transform reads/writes to the interop table, one call each
// - Query, attach and detach component kinds by type
//
// Notes:
// A handle owns nothing on the native side. Building one makes no call,
// dropping one has no effect, and any number of handles may name the
// same entity. Handles compare equal when their ids match.
//
// Id 0 is the "no entity" sentinel and can never be wrapped in an
// `EntityId`, so every handle names a real (possibly destroyed) entity.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::num::NonZeroU32;

//=== Internal Dependencies ===============================================

use crate::core::component::Component;
use crate::core::error::HostError;
use crate::core::interop::InteropTable;
use crate::core::math::Vector2;

//=== EntityId ============================================================

/// Native-assigned entity identifier. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(NonZeroU32);

impl EntityId {
    /// Raw value reserved for "no entity".
    pub const NONE_RAW: u32 = 0;

    /// Wraps a raw id, rejecting the sentinel.
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    /// Raw value passed across the interop boundary.
    pub fn raw(self) -> u32 {
        self.0.get()
    }
}

impl TryFrom<u32> for EntityId {
    type Error = HostError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or(HostError::NullEntity)
    }
}

impl From<EntityId> for u32 {
    fn from(id: EntityId) -> Self {
        id.raw()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

//=== Entity ==============================================================

/// Handle to a native entity, bound to the interop surface it talks through.
#[derive(Clone, Copy)]
pub struct Entity<'a> {
    id: EntityId,
    calls: &'a dyn InteropTable,
}

impl<'a> Entity<'a> {
    pub fn new(id: EntityId, calls: &'a dyn InteropTable) -> Self {
        Self { id, calls }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Interop surface this handle forwards to.
    pub fn calls(&self) -> &'a dyn InteropTable {
        self.calls
    }

    //=====================================================================
    // Transform
    //=====================================================================

    pub fn position(&self) -> Vector2 {
        self.calls.entity_get_position(self.id)
    }

    pub fn set_position(&self, position: Vector2) {
        self.calls.entity_set_position(self.id, position)
    }

    pub fn force(&self) -> Vector2 {
        self.calls.entity_get_force(self.id)
    }

    pub fn set_force(&self, force: Vector2) {
        self.calls.entity_set_force(self.id, force)
    }

    /// Rotation in radians.
    pub fn rotation(&self) -> f32 {
        self.calls.entity_get_rotation(self.id)
    }

    pub fn set_rotation(&self, rotation: f32) {
        self.calls.entity_set_rotation(self.id, rotation)
    }

    /// Uniform scale factor.
    pub fn scale(&self) -> f32 {
        self.calls.entity_get_scale(self.id)
    }

    pub fn set_scale(&self, scale: f32) {
        self.calls.entity_set_scale(self.id, scale)
    }

    //=====================================================================
    // Time
    //=====================================================================

    /// Duration of the current frame in seconds.
    pub fn delta_time(&self) -> f32 {
        self.calls.get_delta_time()
    }

    pub fn fixed_delta_time(&self) -> f32 {
        self.calls.get_fixed_delta_time()
    }

    //=====================================================================
    // Components
    //=====================================================================

    pub fn has_component<C: Component<'a>>(&self) -> bool {
        self.calls.entity_has_component(self.id, C::KIND)
    }

    pub fn add_component<C: Component<'a>>(&self) {
        self.calls.entity_add_component(self.id, C::KIND)
    }

    /// Detaches the most recently attached component kind. The native entry
    /// point takes the id alone, so the kind cannot be chosen here.
    pub fn remove_component(&self) {
        self.calls.entity_remove_component(self.id)
    }

    /// Returns a view bound to this entity, or `None` when the kind is
    /// absent. The view is only meaningful for the current frame.
    pub fn get_component<C: Component<'a>>(&self) -> Option<C> {
        self.has_component::<C>().then(|| C::bind(*self))
    }
}

impl PartialEq for Entity<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Entity<'_> {}

impl fmt::Debug for Entity<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity").field("id", &self.id).finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::component::{Rigidbody2D, Transform};
    use crate::core::interop::{CallRecorder, InternalCall};
    use crate::platform::NativeWorld;

    //--- Test Helpers -----------------------------------------------------

    fn world_with(raw: u32) -> (NativeWorld, EntityId) {
        let world = NativeWorld::new(1.0 / 60.0);
        let id = EntityId::new(raw).unwrap();
        world.insert_entity(id, Vector2::ZERO, 0.0, 1.0).unwrap();
        (world, id)
    }

    //=====================================================================
    // Id Tests
    //=====================================================================

    #[test]
    fn zero_id_is_rejected() {
        assert!(EntityId::new(EntityId::NONE_RAW).is_none());
        assert!(matches!(EntityId::try_from(0), Err(HostError::NullEntity)));
        assert_eq!(EntityId::try_from(7).unwrap().raw(), 7);
        assert_eq!(EntityId::new(7).unwrap().to_string(), "#7");
    }

    //=====================================================================
    // Accessor Tests
    //=====================================================================

    #[test]
    fn transform_round_trips() {
        let (world, id) = world_with(3);
        let entity = Entity::new(id, &world);

        entity.set_position(Vector2::new(4.0, -2.5));
        entity.set_force(Vector2::new(0.0, 9.8));
        entity.set_rotation(1.25);
        entity.set_scale(3.0);

        assert_eq!(entity.position(), Vector2::new(4.0, -2.5));
        assert_eq!(entity.force(), Vector2::new(0.0, 9.8));
        assert_eq!(entity.rotation(), 1.25);
        assert_eq!(entity.scale(), 3.0);
    }

    #[test]
    fn each_access_is_one_native_call() {
        let (world, id) = world_with(3);
        let recorder = CallRecorder::new(&world);
        let entity = Entity::new(id, &recorder);

        let _ = entity.position();
        let _ = entity.position();
        entity.set_rotation(0.5);
        let _ = entity.delta_time();
        let fixed = entity.fixed_delta_time();

        assert_eq!(fixed, 1.0 / 60.0);
        assert_eq!(
            recorder.take(),
            vec![
                InternalCall::EntityGetPosition,
                InternalCall::EntityGetPosition,
                InternalCall::EntitySetRotation,
                InternalCall::GetDeltaTime,
                InternalCall::GetFixedDeltaTime,
            ]
        );
    }

    #[test]
    fn reads_observe_native_mutation() {
        let (world, id) = world_with(5);
        let entity = Entity::new(id, &world);

        assert_eq!(entity.position(), Vector2::ZERO);
        world.entity_set_position(id, Vector2::new(10.0, 0.0));
        assert_eq!(entity.position(), Vector2::new(10.0, 0.0));
    }

    #[test]
    fn handles_compare_by_id() {
        let (world, id) = world_with(9);
        let other = NativeWorld::new(1.0 / 60.0);

        let a = Entity::new(id, &world);
        let b = Entity::new(id, &other);
        let c = Entity::new(EntityId::new(10).unwrap(), &world);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    //=====================================================================
    // Component Tests
    //=====================================================================

    #[test]
    fn add_then_has_then_remove() {
        let (world, id) = world_with(2);
        let entity = Entity::new(id, &world);

        assert!(!entity.has_component::<Rigidbody2D>());
        entity.add_component::<Rigidbody2D>();
        assert!(entity.has_component::<Rigidbody2D>());

        entity.remove_component();
        assert!(!entity.has_component::<Rigidbody2D>());
    }

    #[test]
    fn every_kind_can_be_removed() {
        let (world, id) = world_with(2);
        let entity = Entity::new(id, &world);
        entity.add_component::<Rigidbody2D>();

        entity.remove_component();
        assert!(!entity.has_component::<Rigidbody2D>());
        assert!(entity.has_component::<Transform>());

        entity.remove_component();
        assert!(!entity.has_component::<Transform>());
        assert!(entity.get_component::<Transform>().is_none());

        // Re-adding puts the kind back on top
        entity.add_component::<Transform>();
        assert!(entity.has_component::<Transform>());
        entity.remove_component();
        assert!(!entity.has_component::<Transform>());
    }

    #[test]
    fn get_component_absent_is_none() {
        let (world, id) = world_with(2);
        let entity = Entity::new(id, &world);

        assert!(entity.get_component::<Rigidbody2D>().is_none());

        let transform = entity.get_component::<Transform>().expect("transform present at spawn");
        assert_eq!(transform.entity(), entity);
    }

    #[test]
    fn remove_forwards_id_only() {
        let (world, id) = world_with(2);
        let recorder = CallRecorder::new(&world);
        let entity = Entity::new(id, &recorder);

        entity.remove_component();

        assert_eq!(recorder.take(), vec![InternalCall::EntityRemoveComponent]);
    }
}
