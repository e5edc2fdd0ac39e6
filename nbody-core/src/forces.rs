//! Direct-summation gravity: the net force on one body from every other body

use crate::integrator::SimulationError;
use crate::universe::Body;
use crate::vector::{distance, force_components};
use glam::DVec2;

/// Net gravitational force on `bodies[i]`.
///
/// Contributions are summed in index order. The body itself contributes
/// nothing. A distinct body at exactly the same position has no defined
/// direction, so it is reported as [`SimulationError::ZeroDistance`]
/// rather than poisoning the state with NaN.
pub fn net_force(bodies: &[Body], i: usize, g: f64, step: usize) -> Result<DVec2, SimulationError> {
    let target = &bodies[i];
    let mut force = DVec2::ZERO;

    for (j, other) in bodies.iter().enumerate() {
        if j == i {
            continue;
        }
        let r = distance(target.position, other.position);
        if r == 0.0 {
            return Err(SimulationError::ZeroDistance { step, i, j });
        }
        force += force_components(g, target.position, target.mass, other.position, other.mass, r);
    }

    Ok(force)
}

/// Net force on every body, all read from the same state
pub fn net_forces(bodies: &[Body], g: f64, step: usize) -> Result<Vec<DVec2>, SimulationError> {
    (0..bodies.len()).map(|i| net_force(bodies, i, g, step)).collect()
}
