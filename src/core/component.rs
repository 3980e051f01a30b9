//=========================================================================
// Components
//=========================================================================
//
// Typed views over a subset of an entity's native state.
//
// Responsibilities:
// - Name the closed set of component kinds the native side understands
// - Bind a view to exactly one entity, once, at construction
// - Re-expose the view's state through the same interop calls the
//   entity handle uses
//
// Notes:
// Binding is a purely local association: building a view makes no
// native call, dropping one removes nothing. Membership changes only
// through `Entity::add_component` / `Entity::remove_component`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use crate::core::entity::Entity;
use crate::core::math::Vector2;

//=== ComponentKind =======================================================

/// Type discriminator passed to native membership queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentKind {
    Transform,
    Rigidbody2D,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 2] = [Self::Transform, Self::Rigidbody2D];

    pub fn name(self) -> &'static str {
        match self {
            Self::Transform => "Transform",
            Self::Rigidbody2D => "Rigidbody2D",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//=== Component Traits ====================================================

/// A view bound to one entity.
pub trait Component<'a>: Sized {
    const KIND: ComponentKind;

    /// Binds a view to `entity` without touching native state.
    fn bind(entity: Entity<'a>) -> Self;

    /// The entity this view was bound to.
    fn entity(&self) -> Entity<'a>;
}

/// A component that owns a readable/writable slice of entity state.
pub trait ComponentState<'a>: Component<'a> {
    type State: Copy;

    fn read(&self) -> Self::State;
    fn write(&self, state: Self::State);
}

//=== Transform ===========================================================

/// Position, rotation and scale of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transform<'a> {
    entity: Entity<'a>,
}

impl<'a> Transform<'a> {
    pub fn position(&self) -> Vector2 {
        self.entity.position()
    }

    pub fn set_position(&self, position: Vector2) {
        self.entity.set_position(position)
    }

    pub fn rotation(&self) -> f32 {
        self.entity.rotation()
    }

    pub fn set_rotation(&self, rotation: f32) {
        self.entity.set_rotation(rotation)
    }

    pub fn scale(&self) -> f32 {
        self.entity.scale()
    }

    pub fn set_scale(&self, scale: f32) {
        self.entity.set_scale(scale)
    }
}

impl<'a> Component<'a> for Transform<'a> {
    const KIND: ComponentKind = ComponentKind::Transform;

    fn bind(entity: Entity<'a>) -> Self {
        Self { entity }
    }

    fn entity(&self) -> Entity<'a> {
        self.entity
    }
}

impl<'a> ComponentState<'a> for Transform<'a> {
    type State = Vector2;

    fn read(&self) -> Vector2 {
        self.position()
    }

    fn write(&self, position: Vector2) {
        self.set_position(position)
    }
}

//=== Rigidbody2D =========================================================

/// Physics-facing view: the force applied to the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rigidbody2D<'a> {
    entity: Entity<'a>,
}

impl<'a> Rigidbody2D<'a> {
    pub fn force(&self) -> Vector2 {
        self.entity.force()
    }

    pub fn set_force(&self, force: Vector2) {
        self.entity.set_force(force)
    }
}

impl<'a> Component<'a> for Rigidbody2D<'a> {
    const KIND: ComponentKind = ComponentKind::Rigidbody2D;

    fn bind(entity: Entity<'a>) -> Self {
        Self { entity }
    }

    fn entity(&self) -> Entity<'a> {
        self.entity
    }
}

impl<'a> ComponentState<'a> for Rigidbody2D<'a> {
    type State = Vector2;

    fn read(&self) -> Vector2 {
        self.force()
    }

    fn write(&self, force: Vector2) {
        self.set_force(force)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::EntityId;
    use crate::core::interop::{CallRecorder, InteropTable};
    use crate::platform::NativeWorld;

    fn spawn(world: &NativeWorld) -> EntityId {
        world.spawn(Vector2::new(1.0, 2.0), 0.0, 1.0)
    }

    #[test]
    fn binding_makes_no_native_call() {
        let world = NativeWorld::new(1.0 / 60.0);
        let id = spawn(&world);
        let recorder = CallRecorder::new(&world);
        let entity = Entity::new(id, &recorder);

        let transform = Transform::bind(entity);
        drop(transform);

        assert!(recorder.calls().is_empty());
        assert!(world.entity_has_component(id, ComponentKind::Transform));
    }

    #[test]
    fn views_share_entity_state() {
        let world = NativeWorld::new(1.0 / 60.0);
        let id = spawn(&world);
        let entity = Entity::new(id, &world);

        let transform = Transform::bind(entity);
        transform.set_rotation(0.75);
        assert_eq!(entity.rotation(), 0.75);
        assert_eq!(transform.read(), Vector2::new(1.0, 2.0));

        entity.add_component::<Rigidbody2D>();
        let body = entity.get_component::<Rigidbody2D>().unwrap();
        body.write(Vector2::new(0.0, -9.8));
        assert_eq!(entity.force(), Vector2::new(0.0, -9.8));
    }

    #[test]
    fn kinds_have_distinct_names() {
        assert_eq!(ComponentKind::Transform.to_string(), "Transform");
        assert_ne!(ComponentKind::ALL[0].name(), ComponentKind::ALL[1].name());
    }
}
