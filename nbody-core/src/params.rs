//! Run parameters for the integrator
//!
//! `SimulationParams` holds:
//! - total simulated time and the fixed step size,
//! - the gravitational constant,
//! - the order in which bodies are updated within a step

use crate::integrator::SimulationError;
use crate::vector::GRAVITATIONAL_CONSTANT;
use std::fmt;
use std::str::FromStr;

/// Default total time in seconds when none is supplied
pub const DEFAULT_TOTAL_TIME: f64 = 100_000_000.0;
/// Default step size in seconds when none is supplied
pub const DEFAULT_TIME_STEP: f64 = 25_000.0;

/// How bodies are advanced within a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateScheme {
    /// Every net force is computed from the start-of-step state before any
    /// body moves.
    #[default]
    Simultaneous,
    /// Each body moves as soon as its own force is summed, so bodies later
    /// in index order see the already-moved earlier bodies.
    Sequential,
}

impl fmt::Display for UpdateScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simultaneous => f.write_str("simultaneous"),
            Self::Sequential => f.write_str("sequential"),
        }
    }
}

impl FromStr for UpdateScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "simultaneous" => Ok(Self::Simultaneous),
            "sequential" => Ok(Self::Sequential),
            other => Err(format!(
                "unknown update scheme '{}', expected 'simultaneous' or 'sequential'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParams {
    pub total_time: f64,             // simulated duration
    pub time_step: f64,              // dt per iteration
    pub gravitational_constant: f64, // G
    pub scheme: UpdateScheme,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            total_time: DEFAULT_TOTAL_TIME,
            time_step: DEFAULT_TIME_STEP,
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            scheme: UpdateScheme::default(),
        }
    }
}

impl SimulationParams {
    pub fn new(total_time: f64, time_step: f64) -> Self {
        Self {
            total_time,
            time_step,
            ..Self::default()
        }
    }

    pub fn with_scheme(mut self, scheme: UpdateScheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn with_gravitational_constant(mut self, g: f64) -> Self {
        self.gravitational_constant = g;
        self
    }

    /// Check that the loop terminates and the arithmetic stays finite.
    ///
    /// A negative total time is accepted and runs zero steps, the same as
    /// a total time of zero.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(SimulationError::InvalidParams(format!(
                "time step must be positive and finite, got {}",
                self.time_step
            )));
        }
        if self.total_time.is_nan() || self.total_time == f64::INFINITY {
            return Err(SimulationError::InvalidParams(format!(
                "total time must be finite, got {}",
                self.total_time
            )));
        }
        if !self.gravitational_constant.is_finite() {
            return Err(SimulationError::InvalidParams(format!(
                "gravitational constant must be finite, got {}",
                self.gravitational_constant
            )));
        }
        Ok(())
    }

    /// Duration the loop actually covers.
    ///
    /// A run shorter than a single step is a no-op. Otherwise the loop runs
    /// while elapsed time is below this value, so the last step may
    /// overshoot it by less than one step.
    pub fn run_length(&self) -> f64 {
        if self.total_time < self.time_step {
            0.0
        } else {
            self.total_time
        }
    }

    /// Number of iterations the loop will run, assuming exact arithmetic
    pub fn expected_steps(&self) -> usize {
        let length = self.run_length();
        if length <= 0.0 {
            0
        } else {
            (length / self.time_step).ceil() as usize
        }
    }
}
