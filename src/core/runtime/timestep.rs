//=========================================================================
// Fixed Timestep
//=========================================================================
//
// Converts variable frame durations into a whole number of fixed ticks.
//
// Each frame adds its delta to an accumulator and drains as many fixed
// steps as fit. The number of steps per frame is clamped so one long
// frame cannot snowball into ever longer catch-up frames; the excess
// time is discarded.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::warn;

//=== FixedTimestep =======================================================

#[derive(Debug, Clone, PartialEq)]
pub struct FixedTimestep {
    step: f32,
    max_steps: u32,
    accumulator: f32,
}

impl FixedTimestep {
    /// # Panics
    ///
    /// Panics if `step <= 0.0` or `max_steps == 0`.
    pub fn new(step: f32, max_steps: u32) -> Self {
        assert!(step > 0.0, "Fixed step must be positive, got {}", step);
        assert!(max_steps > 0, "Max fixed steps must be positive");
        Self {
            step,
            max_steps,
            accumulator: 0.0,
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    /// Unconsumed time carried into the next frame.
    pub fn accumulated(&self) -> f32 {
        self.accumulator
    }

    //--- advance() --------------------------------------------------------
    //
    // Adds `delta` seconds and returns how many fixed steps to run now.
    // Negative or non-finite deltas are treated as zero.
    //
    pub fn advance(&mut self, delta: f32) -> u32 {
        if delta.is_finite() && delta > 0.0 {
            self.accumulator += delta;
        }

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps {
            self.accumulator -= self.step;
            steps += 1;
        }

        if self.accumulator >= self.step {
            warn!(
                "Fixed timestep fell behind, dropping {:.4}s of simulation time",
                self.accumulator
            );
            self.accumulator %= self.step;
        }

        steps
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_frames_accumulate() {
        let mut timestep = FixedTimestep::new(0.5, 8);

        assert_eq!(timestep.advance(0.25), 0);
        assert_eq!(timestep.advance(0.25), 1);
        assert_eq!(timestep.accumulated(), 0.0);
    }

    #[test]
    fn long_frame_runs_several_steps() {
        let mut timestep = FixedTimestep::new(0.25, 8);

        assert_eq!(timestep.advance(1.0), 4);
        assert_eq!(timestep.accumulated(), 0.0);
    }

    #[test]
    fn steps_are_clamped_and_excess_dropped() {
        let mut timestep = FixedTimestep::new(0.25, 2);

        assert_eq!(timestep.advance(2.0), 2);
        assert!(timestep.accumulated() < timestep.step());
    }

    #[test]
    fn invalid_delta_is_ignored() {
        let mut timestep = FixedTimestep::new(0.5, 8);

        assert_eq!(timestep.advance(-1.0), 0);
        assert_eq!(timestep.advance(f32::NAN), 0);
        assert_eq!(timestep.accumulated(), 0.0);
    }

    #[test]
    #[should_panic(expected = "Fixed step must be positive")]
    fn zero_step_panics() {
        FixedTimestep::new(0.0, 8);
    }
}
