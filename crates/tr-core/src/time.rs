//! Step counter and simulated clock.
//!
//! The external simulator advances in fixed steps and the decision engine is
//! called once per step.  `Tick` counts steps; `SimClock` turns a count into
//! simulated seconds as `start_secs + tick * step_length_secs`.

use std::fmt;

use crate::{CoreError, CoreResult};

/// Number of simulator steps since the start of the run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;

    fn add(self, steps: u64) -> Tick {
        Tick(self.0.saturating_add(steps))
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Converts between tick counts and simulated seconds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Simulated time of tick 0, in seconds.
    pub start_secs: f64,
    /// Simulated seconds per tick.  Must be finite and positive.
    pub step_length_secs: f64,
    /// Step the clock is on.
    pub current_tick: Tick,
}

impl SimClock {
    /// Create a clock starting at `start_secs` with the given step length.
    pub fn new(start_secs: f64, step_length_secs: f64) -> CoreResult<Self> {
        if !(step_length_secs.is_finite() && step_length_secs > 0.0) {
            return Err(CoreError::Config(format!(
                "step length must be positive and finite, got {step_length_secs}"
            )));
        }
        Ok(Self {
            start_secs,
            step_length_secs,
            current_tick: Tick::ZERO,
        })
    }

    pub fn advance(&mut self) {
        self.current_tick = self.current_tick + 1;
    }

    /// Simulated time of `tick`.
    #[inline]
    pub fn time_at(&self, tick: Tick) -> f64 {
        self.start_secs + tick.0 as f64 * self.step_length_secs
    }

    /// Simulated time of the current tick.
    #[inline]
    pub fn time_secs(&self) -> f64 {
        self.time_at(self.current_tick)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1} s)", self.current_tick, self.time_secs())
    }
}
