//=========================================================================
// Auto-Move Scripts
//=========================================================================
//
// Ping-pong the entity along one axis, one unit per frame, reversing at
// ±800 (X) or ±500 (Y). Movement is per frame, not per second.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::behaviour::Behaviour;
use crate::core::context::ScriptContext;

//=== PingPong ============================================================

#[derive(Debug, Clone)]
struct PingPong {
    speed: f32,
    limit: f32,
    forward: bool,
}

impl PingPong {
    fn new(limit: f32) -> Self {
        Self {
            speed: 1.0,
            limit,
            forward: true,
        }
    }

    /// Moves `value` one step and flips direction once a limit is reached.
    fn step(&mut self, value: f32) -> f32 {
        if self.forward {
            let next = value + self.speed;
            if next >= self.limit {
                self.forward = false;
            }
            next
        } else {
            let next = value - self.speed;
            if next <= -self.limit {
                self.forward = true;
            }
            next
        }
    }
}

//=== AutoMoveX ===========================================================

#[derive(Debug, Clone)]
pub struct AutoMoveX {
    motion: PingPong,
}

impl AutoMoveX {
    pub const LIMIT: f32 = 800.0;

    /// True while moving toward +X.
    pub fn moving_right(&self) -> bool {
        self.motion.forward
    }
}

impl Default for AutoMoveX {
    fn default() -> Self {
        Self {
            motion: PingPong::new(Self::LIMIT),
        }
    }
}

impl Behaviour for AutoMoveX {
    fn start(&mut self, ctx: &ScriptContext) {
        ctx.debug().log(&format!("AutoMoveX started on {}", ctx.entity().id()));
    }

    fn update(&mut self, ctx: &ScriptContext) {
        let entity = ctx.entity();
        let mut position = entity.position();
        position.x = self.motion.step(position.x);
        entity.set_position(position);
    }
}

//=== AutoMoveY ===========================================================

#[derive(Debug, Clone)]
pub struct AutoMoveY {
    motion: PingPong,
}

impl AutoMoveY {
    pub const LIMIT: f32 = 500.0;

    pub fn moving_up(&self) -> bool {
        self.motion.forward
    }
}

impl Default for AutoMoveY {
    fn default() -> Self {
        Self {
            motion: PingPong::new(Self::LIMIT),
        }
    }
}

impl Behaviour for AutoMoveY {
    fn start(&mut self, ctx: &ScriptContext) {
        ctx.debug().log(&format!("AutoMoveY started on {}", ctx.entity().id()));
    }

    fn update(&mut self, ctx: &ScriptContext) {
        let entity = ctx.entity();
        let mut position = entity.position();
        position.y = self.motion.step(position.y);
        entity.set_position(position);
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

    #[test]
    fn ping_pong_reverses_at_limits() {
        let mut motion = PingPong::new(2.0);

        assert_eq!(motion.step(0.0), 1.0);
        assert_eq!(motion.step(1.0), 2.0);
        assert!(!motion.forward);
        assert_eq!(motion.step(2.0), 1.0);
        assert_eq!(motion.step(-1.0), -2.0);
        assert!(motion.forward);
    }

    #[test]
    fn auto_move_x_turns_around_at_800() {
        let world = NativeWorld::new(1.0 / 60.0);
        let id = world.spawn(Vector2::new(799.0, 5.0), 0.0, 1.0);
        let ctx = ScriptContext::new(id, &world);
        let mut script = AutoMoveX::default();

        script.update(&ctx);
        assert_eq!(world.entity(id).unwrap().position, Vector2::new(800.0, 5.0));
        assert!(!script.moving_right());

        script.update(&ctx);
        assert_eq!(world.entity(id).unwrap().position, Vector2::new(799.0, 5.0));
    }

    #[test]
    fn auto_move_y_only_touches_y() {
        let world = NativeWorld::new(1.0 / 60.0);
        let id = world.spawn(Vector2::new(3.0, -500.0), 0.0, 1.0);
        let ctx = ScriptContext::new(id, &world);
        let mut script = AutoMoveY::default();

        script.update(&ctx);

        assert_eq!(world.entity(id).unwrap().position, Vector2::new(3.0, -499.0));
        assert!(script.moving_up());
    }
}
