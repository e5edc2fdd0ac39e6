use crate::forces::{net_force, net_forces};
use crate::params::{SimulationParams, UpdateScheme};
use crate::recorder::{StepObserver, Trajectory, TrajectoryRecorder};
use crate::universe::{Body, Universe};
use glam::DVec2;
use thiserror::Error;
use tracing::{info, trace};

/// Fatal faults raised while running the simulation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("invalid simulation parameters: {0}")]
    InvalidParams(String),
    #[error("bodies {i} and {j} occupy the same position at step {step}")]
    ZeroDistance { step: usize, i: usize, j: usize },
}

/// Where the time loop is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegratorState {
    Running,
    Done,
}

/// Semi-implicit Euler update for one body: v += a*dt, then x += v*dt
fn kick_drift(body: &mut Body, force: DVec2, dt: f64) {
    let accel = force / body.mass;
    body.velocity += accel * dt;
    body.position += body.velocity * dt;
}

/// Advance every body by `dt`, all forces taken from the state at the start
/// of the step. Nothing is moved if any force fails.
pub fn step_simultaneous(bodies: &mut [Body], dt: f64, g: f64, step: usize) -> Result<(), SimulationError> {
    let forces = net_forces(bodies, g, step)?;
    for (body, force) in bodies.iter_mut().zip(forces) {
        kick_drift(body, force, dt);
    }
    Ok(())
}

/// Advance bodies one at a time in index order, each moved right after its
/// own force is summed. On error, bodies before the failing index have
/// already moved.
pub fn step_sequential(bodies: &mut [Body], dt: f64, g: f64, step: usize) -> Result<(), SimulationError> {
    for i in 0..bodies.len() {
        let force = net_force(bodies, i, g, step)?;
        kick_drift(&mut bodies[i], force, dt);
    }
    Ok(())
}

/// Drives the fixed-step time loop over a universe it owns
#[derive(Debug, Clone)]
pub struct Integrator {
    universe: Universe,
    params: SimulationParams,
    elapsed: f64,
    steps: usize,
}

impl Integrator {
    pub fn new(universe: Universe, params: SimulationParams) -> Result<Self, SimulationError> {
        params.validate()?;
        Ok(Self {
            universe,
            params,
            elapsed: 0.0,
            steps: 0,
        })
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn steps_taken(&self) -> usize {
        self.steps
    }

    pub fn state(&self) -> IntegratorState {
        if self.elapsed < self.params.run_length() {
            IntegratorState::Running
        } else {
            IntegratorState::Done
        }
    }

    /// Run one iteration if still running. Returns the state afterwards.
    ///
    /// A failed step leaves the universe, step count and elapsed time as
    /// they were before the call.
    pub fn step(&mut self) -> Result<IntegratorState, SimulationError> {
        if self.state() == IntegratorState::Done {
            return Ok(IntegratorState::Done);
        }

        let dt = self.params.time_step;
        let g = self.params.gravitational_constant;
        match self.params.scheme {
            UpdateScheme::Simultaneous => {
                step_simultaneous(self.universe.bodies_mut(), dt, g, self.steps)?
            }
            UpdateScheme::Sequential => {
                // Bodies move one by one, so work on a copy and commit it whole
                let mut next = self.universe.bodies().to_vec();
                step_sequential(&mut next, dt, g, self.steps)?;
                self.universe.bodies_mut().clone_from_slice(&next);
            }
        }

        self.steps += 1;
        // Derived from the count so fractional steps do not drift
        self.elapsed = self.steps as f64 * dt;
        trace!(step = self.steps, elapsed = self.elapsed, "step complete");
        Ok(self.state())
    }

    /// Step until done, notifying `observer` after each step, then hand
    /// back the final positions.
    pub fn run<O: StepObserver + ?Sized>(mut self, observer: &mut O) -> Result<Trajectory, SimulationError> {
        info!(
            bodies = self.universe.len(),
            total_time = self.params.total_time,
            time_step = self.params.time_step,
            scheme = %self.params.scheme,
            "starting simulation"
        );

        while self.state() == IntegratorState::Running {
            self.step()?;
            observer.on_step(self.steps, self.elapsed, &self.universe);
        }

        info!(steps = self.steps, elapsed = self.elapsed, "simulation finished");
        Ok(TrajectoryRecorder::finish(&self))
    }
}
