//=========================================================================
// State Tracker
//=========================================================================
//
// Input state tracking with per-frame delta tracking.
//
// Architecture:
//   InputEvent → process_events() → held keys (press order) → query
//
// Frame lifecycle: process_events() → [scripts query] → clear()
//
// Between process_events() and clear() the state is frozen: every query
// made by scripts during the frame sees the same answer.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, ScriptKey};

//=== Axis Bindings =======================================================

const NEGATIVE_HORIZONTAL: [ScriptKey; 2] = [ScriptKey::KeyA, ScriptKey::ArrowLeft];
const POSITIVE_HORIZONTAL: [ScriptKey; 2] = [ScriptKey::KeyD, ScriptKey::ArrowRight];
const NEGATIVE_VERTICAL: [ScriptKey; 2] = [ScriptKey::KeyS, ScriptKey::ArrowDown];
const POSITIVE_VERTICAL: [ScriptKey; 2] = [ScriptKey::KeyW, ScriptKey::ArrowUp];

//=== StateTracker ========================================================

/// Tracks persistent state (keys held) and per-frame deltas (keys pressed/released).
pub struct StateTracker {
    //--- Persistent State (survives frame boundary) ----------------------
    keys_down: Vec<ScriptKey>,

    //--- Frame Deltas (reset each frame via clear()) --------------------
    keys_pressed_this_frame: HashSet<ScriptKey>,
    keys_released_this_frame: HashSet<ScriptKey>,
}

impl StateTracker {
    /// Creates a new state tracker with empty state.
    pub fn new() -> Self {
        Self {
            keys_down: Vec::new(),
            keys_pressed_this_frame: HashSet::new(),
            keys_released_this_frame: HashSet::new(),
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears frame-specific deltas (pressed/released flags).
    pub fn clear(&mut self) {
        self.keys_pressed_this_frame.clear();
        self.keys_released_this_frame.clear();
    }

    /// Processes input events, updating internal state.
    pub fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(*event);
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn process_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                // Only mark as pressed if it wasn't already down
                if key.is_physical() && !self.keys_down.contains(&key) {
                    self.keys_down.push(key);
                    self.keys_pressed_this_frame.insert(key);
                }
            }

            InputEvent::KeyUp(key) => {
                // Only mark as released if it was actually down
                if let Some(pos) = self.keys_down.iter().position(|&k| k == key) {
                    self.keys_down.remove(pos);
                    self.keys_released_this_frame.insert(key);
                }
            }
        }
    }

    /// Resolves an axis from held keys. The earliest-pressed key wins when
    /// both directions are held.
    fn axis(&self, negative: &[ScriptKey], positive: &[ScriptKey]) -> i32 {
        for key in &self.keys_down {
            if negative.contains(key) {
                return -1;
            }
            if positive.contains(key) {
                return 1;
            }
        }
        0
    }

    //=====================================================================
    // Query API - Keys
    //=====================================================================

    /// Returns `true` if key transitioned UP → DOWN (one frame only).
    pub fn is_key_pressed(&self, key: ScriptKey) -> bool {
        self.keys_pressed_this_frame.contains(&key)
    }

    /// Returns `true` while key is held.
    pub fn is_key_down(&self, key: ScriptKey) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns `true` if key transitioned DOWN → UP.
    pub fn is_key_released(&self, key: ScriptKey) -> bool {
        self.keys_released_this_frame.contains(&key)
    }

    //=====================================================================
    // Query API - Axes
    //=====================================================================

    /// -1 for A/Left, 1 for D/Right, 0 otherwise.
    pub fn axis_horizontal(&self) -> i32 {
        self.axis(&NEGATIVE_HORIZONTAL, &POSITIVE_HORIZONTAL)
    }

    /// 1 for W/Up, -1 for S/Down, 0 otherwise.
    pub fn axis_vertical(&self) -> i32 {
        self.axis(&NEGATIVE_VERTICAL, &POSITIVE_VERTICAL)
    }

    //=====================================================================
    // Query API - Iteration
    //=====================================================================

    /// Returns held keys in the order they were pressed.
    pub fn keys_down(&self) -> impl Iterator<Item = &ScriptKey> {
        self.keys_down.iter()
    }

    pub fn keys_pressed(&self) -> impl Iterator<Item = &ScriptKey> {
        self.keys_pressed_this_frame.iter()
    }
}

//--- Trait Implementations -----------------------------------------------

impl Default for StateTracker {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- Test Helpers -----------------------------------------------------

    fn key_down(key: ScriptKey) -> InputEvent {
        InputEvent::KeyDown(key)
    }

    fn key_up(key: ScriptKey) -> InputEvent {
        InputEvent::KeyUp(key)
    }

    //=====================================================================
    // Key Tests
    //=====================================================================

    /// Tests that key_pressed only returns true on transition frame.
    #[test]
    fn key_pressed_only_on_transition_frame() {
        let mut tracker = StateTracker::new();

        // Frame 1: Key down
        tracker.process_events(&[key_down(ScriptKey::KeyA)]);
        assert!(tracker.is_key_pressed(ScriptKey::KeyA));
        assert!(tracker.is_key_down(ScriptKey::KeyA));
        tracker.clear();

        // Frame 2: Still held
        tracker.process_events(&[]);
        assert!(!tracker.is_key_pressed(ScriptKey::KeyA));
        assert!(tracker.is_key_down(ScriptKey::KeyA));
        tracker.clear();

        // Frame 3: Released
        tracker.process_events(&[key_up(ScriptKey::KeyA)]);
        assert!(!tracker.is_key_pressed(ScriptKey::KeyA));
        assert!(!tracker.is_key_down(ScriptKey::KeyA));
        assert!(tracker.is_key_released(ScriptKey::KeyA));
    }

    #[test]
    fn duplicate_key_down_ignored() {
        let mut tracker = StateTracker::new();

        tracker.process_events(&[key_down(ScriptKey::Space)]);
        tracker.clear();
        tracker.process_events(&[key_down(ScriptKey::Space)]);

        assert!(!tracker.is_key_pressed(ScriptKey::Space), "Repeat must not re-trigger");
        assert_eq!(tracker.keys_down().count(), 1);
    }

    #[test]
    fn key_up_without_down_ignored() {
        let mut tracker = StateTracker::new();

        tracker.process_events(&[key_up(ScriptKey::KeyQ)]);

        assert!(!tracker.is_key_released(ScriptKey::KeyQ));
    }

    #[test]
    fn sentinel_never_registers() {
        let mut tracker = StateTracker::new();

        tracker.process_events(&[key_down(ScriptKey::Unidentified)]);

        assert!(!tracker.is_key_pressed(ScriptKey::Unidentified));
        assert!(!tracker.is_key_down(ScriptKey::Unidentified));
    }

    #[test]
    fn fast_tap_both_transitions_captured() {
        let mut tracker = StateTracker::new();

        tracker.process_events(&[key_down(ScriptKey::KeyE), key_up(ScriptKey::KeyE)]);

        assert!(tracker.is_key_pressed(ScriptKey::KeyE));
        assert!(tracker.is_key_released(ScriptKey::KeyE));
        assert!(!tracker.is_key_down(ScriptKey::KeyE));
    }

    //=====================================================================
    // Axis Tests
    //=====================================================================

    #[test]
    fn axes_follow_held_keys() {
        let mut tracker = StateTracker::new();
        assert_eq!(tracker.axis_horizontal(), 0);
        assert_eq!(tracker.axis_vertical(), 0);

        tracker.process_events(&[key_down(ScriptKey::KeyD), key_down(ScriptKey::ArrowUp)]);
        assert_eq!(tracker.axis_horizontal(), 1);
        assert_eq!(tracker.axis_vertical(), 1);

        // Held across frames
        tracker.clear();
        assert_eq!(tracker.axis_horizontal(), 1);

        tracker.process_events(&[key_up(ScriptKey::KeyD), key_down(ScriptKey::ArrowLeft)]);
        assert_eq!(tracker.axis_horizontal(), -1);

        tracker.process_events(&[key_up(ScriptKey::ArrowUp), key_down(ScriptKey::KeyS)]);
        assert_eq!(tracker.axis_vertical(), -1);
    }

    #[test]
    fn earliest_pressed_direction_wins() {
        let mut tracker = StateTracker::new();

        tracker.process_events(&[key_down(ScriptKey::KeyA), key_down(ScriptKey::KeyD)]);
        assert_eq!(tracker.axis_horizontal(), -1);

        tracker.process_events(&[key_up(ScriptKey::KeyA)]);
        assert_eq!(tracker.axis_horizontal(), 1);
    }
}
