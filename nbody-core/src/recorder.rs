//! Capturing simulation output
//!
//! The result of a run is the final position of every body, index-aligned
//! with the input. Anything that wants to watch the run as it happens
//! (a renderer, a CSV dump) plugs in as a [`StepObserver`].

use crate::integrator::Integrator;
use crate::universe::Universe;

/// Final positions of a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    /// Simulated time covered, possibly past the requested total
    pub elapsed: f64,
    pub steps: usize,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn position(&self, index: usize) -> Option<(f64, f64)> {
        Some((*self.xs.get(index)?, *self.ys.get(index)?))
    }
}

/// Extracts the run result once the integrator is done
pub struct TrajectoryRecorder;

impl TrajectoryRecorder {
    pub fn finish(integrator: &Integrator) -> Trajectory {
        let (xs, ys) = integrator.universe().positions();
        Trajectory {
            xs,
            ys,
            elapsed: integrator.elapsed(),
            steps: integrator.steps_taken(),
        }
    }
}

/// Called after every completed step with read-only access to the state
pub trait StepObserver {
    fn on_step(&mut self, step: usize, elapsed: f64, universe: &Universe);
}

impl<F> StepObserver for F
where
    F: FnMut(usize, f64, &Universe),
{
    fn on_step(&mut self, step: usize, elapsed: f64, universe: &Universe) {
        self(step, elapsed, universe)
    }
}

/// Observer that ignores every step
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl StepObserver for NoopObserver {
    fn on_step(&mut self, _step: usize, _elapsed: f64, _universe: &Universe) {}
}

/// Positions of every body at one step
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub step: usize,
    pub elapsed: f64,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

/// Picks every k-th step for observers that only want a sample of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSampler {
    every: usize,
}

impl StepSampler {
    /// `every` of zero is treated as one
    pub fn new(every: usize) -> Self {
        Self { every: every.max(1) }
    }

    pub fn every(&self) -> usize {
        self.every
    }

    pub fn is_due(&self, step: usize) -> bool {
        step % self.every == 0
    }
}

/// Keeps a snapshot every `every` steps
#[derive(Debug, Clone)]
pub struct SnapshotRecorder {
    sampler: StepSampler,
    snapshots: Vec<Snapshot>,
}

impl SnapshotRecorder {
    pub fn new(every: usize) -> Self {
        Self {
            sampler: StepSampler::new(every),
            snapshots: Vec::new(),
        }
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn into_snapshots(self) -> Vec<Snapshot> {
        self.snapshots
    }
}

impl StepObserver for SnapshotRecorder {
    fn on_step(&mut self, step: usize, elapsed: f64, universe: &Universe) {
        if !self.sampler.is_due(step) {
            return;
        }
        let (xs, ys) = universe.positions();
        self.snapshots.push(Snapshot { step, elapsed, xs, ys });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampler_picks_multiples() {
        let sampler = StepSampler::new(4);
        let due: Vec<_> = (1..=12).filter(|&s| sampler.is_due(s)).collect();
        assert_eq!(due, vec![4, 8, 12]);
    }

    #[test]
    fn sampler_of_zero_takes_every_step() {
        let sampler = StepSampler::new(0);
        assert_eq!(sampler.every(), 1);
        assert!((1..5).all(|s| sampler.is_due(s)));
    }
}
