//=========================================================================
// Player Movement
//=========================================================================
//
// Keyboard-driven movement: the directional axes translate the entity by
// `speed` units per frame, E/Q nudge the rotation on the frame they are
// pressed.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::behaviour::Behaviour;
use crate::core::context::ScriptContext;
use crate::core::input::ScriptKey;
use crate::core::math::Vector2;

//=== PlayerMovement ======================================================

#[derive(Debug, Clone)]
pub struct PlayerMovement {
    /// Units per frame per axis step.
    pub speed: f32,

    /// Radians added (E) or removed (Q) per key press.
    pub rotation_speed: f32,
}

impl Default for PlayerMovement {
    fn default() -> Self {
        Self {
            speed: 1.0,
            rotation_speed: 0.01,
        }
    }
}

impl Behaviour for PlayerMovement {
    fn start(&mut self, ctx: &ScriptContext) {
        ctx.debug().log("PlayerMovement started");
    }

    fn update(&mut self, ctx: &ScriptContext) {
        let entity = ctx.entity();
        let input = ctx.input();

        let horizontal = input.get_axis_horizontal();
        let vertical = input.get_axis_vertical();

        let step = Vector2::new(horizontal as f32, vertical as f32) * self.speed;
        entity.set_position(entity.position() + step);

        if input.get_key_down(ScriptKey::KeyE) {
            entity.set_rotation(entity.rotation() + self.rotation_speed);
        } else if input.get_key_down(ScriptKey::KeyQ) {
            entity.set_rotation(entity.rotation() - self.rotation_speed);
        }

        match (horizontal, vertical) {
            (0, 0) => {}
            (h, v) => ctx.debug().trace(&format!("move ({}, {})", h, v)),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
