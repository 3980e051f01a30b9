//=========================================================================
// Input Codes & Events
//
// Defines the capability code table shared by scripts and the native
// input layer, plus the low-level events that feed it.
//
// Responsibilities:
// - Fix the numeric code of every key/button scripts can query
// - Provide lossless code <-> variant conversion at the interop boundary
// - Represent press/release transitions coming from the platform
//
// Code Table:
// ```text
//   32        Space
//   48..=57   Digit0..Digit9
//   65..=90   KeyA..KeyZ
//   256       Escape
//   257       Enter
//   262..=265 ArrowRight, ArrowLeft, ArrowDown, ArrowUp
//   501..=502 MouseLeft, MouseRight
//   999       Unidentified (sentinel, never matches physical input)
// ```
//
// The numbers are part of the wire contract with native code and must
// never be renumbered.
//
//=========================================================================

//=== ScriptKey ===========================================================

/// Capability code passed to key-state queries.
///
/// Discriminants are the numeric codes exchanged with the native side,
/// so `key as u32` is always the wire value.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScriptKey {
    //--- Special Keys -----------------------------------------------------

    /// Spacebar
    Space = 32,

    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0 = 48, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA = 65, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Function & Arrow Keys --------------------------------------------

    Escape = 256,
    Enter = 257,
    ArrowRight = 262,
    ArrowLeft = 263,
    ArrowDown = 264,
    ArrowUp = 265,

    //--- Mouse Buttons ----------------------------------------------------

    MouseLeft = 501,
    MouseRight = 502,

    //--- Sentinel ---------------------------------------------------------

    /// "No input" sentinel. Queries for it always report `false`.
    Unidentified = 999,
}

impl ScriptKey {
    /// Every code in the table, in ascending order.
    pub const ALL: [ScriptKey; 46] = {
        use ScriptKey::*;
        [
            Space,
            Digit0, Digit1, Digit2, Digit3, Digit4,
            Digit5, Digit6, Digit7, Digit8, Digit9,
            KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
            KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
            KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,
            Escape, Enter, ArrowRight, ArrowLeft, ArrowDown, ArrowUp,
            MouseLeft, MouseRight,
            Unidentified,
        ]
    };

    /// Numeric wire code.
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Resolves a wire code. Codes outside the table map to `Unidentified`.
    pub fn from_code(code: u32) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|key| key.code() == code)
            .unwrap_or(ScriptKey::Unidentified)
    }

    /// Whether this code names a physical input (everything but the sentinel).
    pub const fn is_physical(self) -> bool {
        !matches!(self, ScriptKey::Unidentified)
    }

    pub const fn is_mouse_button(self) -> bool {
        matches!(self, ScriptKey::MouseLeft | ScriptKey::MouseRight)
    }
}

impl From<ScriptKey> for u32 {
    fn from(key: ScriptKey) -> Self {
        key.code()
    }
}

//=== InputEvent ==========================================================

/// Press/release transition reported by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// Key or mouse button went down.
    KeyDown(ScriptKey),

    /// Key or mouse button went up.
    KeyUp(ScriptKey),
}

impl InputEvent {
    pub fn key(self) -> ScriptKey {
        match self {
            Self::KeyDown(key) | Self::KeyUp(key) => key,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_table_matches_wire_values() {
        assert_eq!(ScriptKey::Space.code(), 32);
        assert_eq!(ScriptKey::Digit0.code(), 48);
        assert_eq!(ScriptKey::Digit9.code(), 57);
        assert_eq!(ScriptKey::KeyA.code(), 65);
        assert_eq!(ScriptKey::KeyZ.code(), 90);
        assert_eq!(ScriptKey::Escape.code(), 256);
        assert_eq!(ScriptKey::Enter.code(), 257);
        assert_eq!(ScriptKey::ArrowRight.code(), 262);
        assert_eq!(ScriptKey::ArrowUp.code(), 265);
        assert_eq!(ScriptKey::MouseLeft.code(), 501);
        assert_eq!(ScriptKey::MouseRight.code(), 502);
        assert_eq!(ScriptKey::Unidentified.code(), 999);
    }

    #[test]
    fn every_code_roundtrips() {
        for key in ScriptKey::ALL {
            assert_eq!(ScriptKey::from_code(key.code()), key);
        }
    }

    #[test]
    fn table_is_sorted_and_unique() {
        let codes: Vec<u32> = ScriptKey::ALL.iter().map(|k| k.code()).collect();
        assert!(codes.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn unknown_codes_resolve_to_sentinel() {
        assert_eq!(ScriptKey::from_code(0), ScriptKey::Unidentified);
        assert_eq!(ScriptKey::from_code(258), ScriptKey::Unidentified);
        assert_eq!(ScriptKey::from_code(91), ScriptKey::Unidentified);
        assert!(!ScriptKey::Unidentified.is_physical());
        assert!(ScriptKey::Space.is_physical());
    }
}
