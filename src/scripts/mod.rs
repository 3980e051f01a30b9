//=========================================================================
// Built-in Scripts
//=========================================================================
//
// Ready-made behaviours, registered under the class names entities
// refer to them by.
//
//=========================================================================

//=== Module Declarations =================================================

mod auto_move;
mod player;
mod spin;

//=== Public API ==========================================================

pub use auto_move::{AutoMoveX, AutoMoveY};
pub use player::PlayerMovement;
pub use spin::{AntiClockWiseSpin, ClockWiseSpin};

//=== Internal Dependencies ===============================================

use crate::core::behaviour::ScriptRegistry;

//=== Registration ========================================================

/// Class names of every built-in script.
pub const BUILTIN_SCRIPTS: [&str; 5] = [
    "ClockWiseSpin",
    "AntiClockWiseSpin",
    "AutoMoveX",
    "AutoMoveY",
    "PlayerMovement",
];

pub fn register_builtin(registry: &mut ScriptRegistry) {
    registry.register::<ClockWiseSpin>("ClockWiseSpin");
    registry.register::<AntiClockWiseSpin>("AntiClockWiseSpin");
    registry.register::<AutoMoveX>("AutoMoveX");
    registry.register::<AutoMoveY>("AutoMoveY");
    registry.register::<PlayerMovement>("PlayerMovement");
}
