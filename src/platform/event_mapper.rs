//=========================================================================
// Platform Event Mapper
//
// Converts Winit input events to script-level `InputEvent` values.
// Keeps OS-specific key identifiers out of the interop code table.
//
// Responsibilities:
// - Translate physical keys and mouse buttons onto `ScriptKey` codes
// - Ignore events scripts cannot observe (cursor motion, focus, ...)
// - Fall back to the `Unidentified` sentinel for unmapped inputs
//
//=========================================================================

use winit::event::{ElementState, KeyEvent, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::KeyCode as WinitKeyCode;
use winit::keyboard::PhysicalKey;

use crate::core::input::{InputEvent, ScriptKey};

//=== Key Conversion ======================================================
//
// Physical location, not produced character: KeyA is the key left of S
// on any layout.
//

impl From<WinitKeyCode> for ScriptKey {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            Space => ScriptKey::Space,

            //--- Numeric keys -----------------------------------------------------
            Digit0 => ScriptKey::Digit0, Digit1 => ScriptKey::Digit1,
            Digit2 => ScriptKey::Digit2, Digit3 => ScriptKey::Digit3,
            Digit4 => ScriptKey::Digit4, Digit5 => ScriptKey::Digit5,
            Digit6 => ScriptKey::Digit6, Digit7 => ScriptKey::Digit7,
            Digit8 => ScriptKey::Digit8, Digit9 => ScriptKey::Digit9,

            //--- Alphabetic keys --------------------------------------------------
            KeyA => ScriptKey::KeyA, KeyB => ScriptKey::KeyB, KeyC => ScriptKey::KeyC,
            KeyD => ScriptKey::KeyD, KeyE => ScriptKey::KeyE, KeyF => ScriptKey::KeyF,
            KeyG => ScriptKey::KeyG, KeyH => ScriptKey::KeyH, KeyI => ScriptKey::KeyI,
            KeyJ => ScriptKey::KeyJ, KeyK => ScriptKey::KeyK, KeyL => ScriptKey::KeyL,
            KeyM => ScriptKey::KeyM, KeyN => ScriptKey::KeyN, KeyO => ScriptKey::KeyO,
            KeyP => ScriptKey::KeyP, KeyQ => ScriptKey::KeyQ, KeyR => ScriptKey::KeyR,
            KeyS => ScriptKey::KeyS, KeyT => ScriptKey::KeyT, KeyU => ScriptKey::KeyU,
            KeyV => ScriptKey::KeyV, KeyW => ScriptKey::KeyW, KeyX => ScriptKey::KeyX,
            KeyY => ScriptKey::KeyY, KeyZ => ScriptKey::KeyZ,

            //--- Function & arrow keys --------------------------------------------
            Escape => ScriptKey::Escape, Enter => ScriptKey::Enter,
            ArrowDown => ScriptKey::ArrowDown, ArrowLeft => ScriptKey::ArrowLeft,
            ArrowRight => ScriptKey::ArrowRight, ArrowUp => ScriptKey::ArrowUp,

            //--- Fallback ---------------------------------------------------------
            _ => ScriptKey::Unidentified,
        }
    }
}

//=== Mouse Conversion ====================================================

impl From<WinitMouseButton> for ScriptKey {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => ScriptKey::MouseLeft,
            WinitMouseButton::Right => ScriptKey::MouseRight,
            _ => ScriptKey::Unidentified,
        }
    }
}

//=== Full Event Conversion ===============================================
//
// Keyboard and mouse-button events become KeyDown/KeyUp. Everything else
// yields `None`. OS key-repeat presses are dropped: a held key is already
// held.
//

pub fn map_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        //--- Keyboard Input ----------------------------------------------
        WindowEvent::KeyboardInput {
            event: KeyEvent {
                physical_key,
                state,
                repeat,
                ..
            },
            ..
        } => {
            if *repeat {
                return None;
            }

            let key = match physical_key {
                PhysicalKey::Code(code) => ScriptKey::from(*code),
                PhysicalKey::Unidentified(_) => ScriptKey::Unidentified,
            };

            Some(transition(*state, key))
        }

        //--- Mouse Button Input ------------------------------------------
        WindowEvent::MouseInput { state, button, .. } => {
            Some(transition(*state, ScriptKey::from(*button)))
        }

        //--- Unhandled Events --------------------------------------------
        _ => None,
    }
}

fn transition(state: ElementState, key: ScriptKey) -> InputEvent {
    match state {
        ElementState::Pressed => InputEvent::KeyDown(key),
        ElementState::Released => InputEvent::KeyUp(key),
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
