//=========================================================================
// Spin Scripts
//=========================================================================
//
// Rotate the entity at a constant angular speed, scaled by frame time.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::behaviour::Behaviour;
use crate::core::context::ScriptContext;

//=== ClockWiseSpin =======================================================

/// Adds `speed * dt` to the rotation every frame.
#[derive(Debug, Clone)]
pub struct ClockWiseSpin {
    /// Radians per second.
    pub speed: f32,
}

impl Default for ClockWiseSpin {
    fn default() -> Self {
        Self { speed: 1.0 }
    }
}

impl Behaviour for ClockWiseSpin {
    fn start(&mut self, ctx: &ScriptContext) {
        ctx.debug().log(&format!("ClockWiseSpin started on {}", ctx.entity().id()));
    }

    fn update(&mut self, ctx: &ScriptContext) {
        let entity = ctx.entity();
        entity.set_rotation(entity.rotation() + self.speed * entity.delta_time());
    }
}

//=== AntiClockWiseSpin ===================================================

/// Subtracts `speed * dt` from the rotation every frame.
#[derive(Debug, Clone)]
pub struct AntiClockWiseSpin {
    pub speed: f32,
}

impl Default for AntiClockWiseSpin {
    fn default() -> Self {
        Self { speed: 1.0 }
    }
}

impl Behaviour for AntiClockWiseSpin {
    fn start(&mut self, ctx: &ScriptContext) {
        ctx.debug().log(&format!("AntiClockWiseSpin started on {}", ctx.entity().id()));
    }

    fn update(&mut self, ctx: &ScriptContext) {
        let entity = ctx.entity();
        entity.set_rotation(entity.rotation() - self.speed * entity.delta_time());
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::EntityId;
    use crate::core::math::Vector2;
    use crate::platform::NativeWorld;

    fn frame(world: &mut NativeWorld, dt: f32, script: &mut dyn Behaviour, id: EntityId) {
        world.begin_frame(dt, &[]);
        script.update(&ScriptContext::new(id, &*world));
        world.end_frame();
    }

    #[test]
    fn clockwise_adds_scaled_speed() {
        let mut world = NativeWorld::new(1.0 / 60.0);
        let id = world.spawn(Vector2::ZERO, 1.0, 1.0);
        let mut spin = ClockWiseSpin { speed: 2.0 };

        frame(&mut world, 0.25, &mut spin, id);
        frame(&mut world, 0.25, &mut spin, id);

        assert_eq!(world.entity(id).unwrap().rotation, 2.0);
    }

    #[test]
    fn anticlockwise_subtracts_scaled_speed() {
        let mut world = NativeWorld::new(1.0 / 60.0);
        let id = world.spawn(Vector2::ZERO, 0.0, 1.0);
        let mut spin = AntiClockWiseSpin::default();

        frame(&mut world, 0.5, &mut spin, id);

        assert_eq!(world.entity(id).unwrap().rotation, -0.5);
    }

    #[test]
    fn start_logs_to_console() {
        let world = NativeWorld::new(1.0 / 60.0);
        let id = world.spawn(Vector2::ZERO, 0.0, 1.0);

        ClockWiseSpin::default().start(&ScriptContext::new(id, &world));

        let console = world.console();
        assert_eq!(console.last().unwrap().message, "ClockWiseSpin started on #1");
    }
}
