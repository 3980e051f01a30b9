//=========================================================================
// Input
//
// Capability code table and per-frame input state.
//
// Responsibilities:
// - Define the fixed numeric key/button codes scripts query with
// - Track held keys and one-frame press/release edges
// - Derive discretized directional axes in {-1, 0, 1}
//
// Notes:
// The tracker is owned by the native host; scripts never see it directly
// and only observe it through interop queries.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;
mod state_tracker;

//=== Public API ==========================================================

pub use event::{InputEvent, ScriptKey};
pub use state_tracker::StateTracker;
