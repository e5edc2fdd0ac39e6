use crate::vector::{distance, force_magnitude};
use glam::DVec2;
use thiserror::Error;

/// Rejected initial state
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UniverseError {
    #[error("body {index} has non-positive mass {mass}")]
    NonPositiveMass { index: usize, mass: f64 },
    #[error("body {index} has a non-finite {field}")]
    NonFinite { index: usize, field: &'static str },
    #[error("universe radius must be finite, got {0}")]
    InvalidRadius(f64),
}

/// A point mass in the simulation
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub position: DVec2,
    pub velocity: DVec2,
    pub mass: f64,
    /// Visual asset name, carried through untouched
    pub image: String,
}

impl Body {
    pub fn new(position: DVec2, velocity: DVec2, mass: f64, image: impl Into<String>) -> Self {
        Self {
            position,
            velocity,
            mass,
            image: image.into(),
        }
    }
}

/// All bodies plus the display radius.
///
/// Body order is fixed at construction; index `i` names the same body for
/// the lifetime of the universe. Only the integrator moves bodies, and
/// masses never change.
#[derive(Debug, Clone)]
pub struct Universe {
    radius: f64,
    bodies: Vec<Body>,
}

impl Universe {
    pub fn new(radius: f64, bodies: Vec<Body>) -> Result<Self, UniverseError> {
        if !radius.is_finite() {
            return Err(UniverseError::InvalidRadius(radius));
        }
        for (index, body) in bodies.iter().enumerate() {
            if !body.position.is_finite() {
                return Err(UniverseError::NonFinite { index, field: "position" });
            }
            if !body.velocity.is_finite() {
                return Err(UniverseError::NonFinite { index, field: "velocity" });
            }
            if !(body.mass.is_finite() && body.mass > 0.0) {
                return Err(UniverseError::NonPositiveMass { index, mass: body.mass });
            }
        }
        Ok(Self { radius, bodies })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub(crate) fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    /// Current x and y coordinates, index-aligned with the input order
    pub fn positions(&self) -> (Vec<f64>, Vec<f64>) {
        self.bodies
            .iter()
            .map(|b| (b.position.x, b.position.y))
            .unzip()
    }

    /// Sum of `m * v` over all bodies
    pub fn total_momentum(&self) -> DVec2 {
        self.bodies
            .iter()
            .fold(DVec2::ZERO, |acc, b| acc + b.velocity * b.mass)
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies
            .iter()
            .map(|b| 0.5 * b.mass * b.velocity.length_squared())
            .sum()
    }

    /// Pairwise gravitational potential energy. Coincident pairs are skipped.
    pub fn potential_energy(&self, g: f64) -> f64 {
        let mut energy = 0.0;
        for (i, a) in self.bodies.iter().enumerate() {
            for b in &self.bodies[i + 1..] {
                let r = distance(a.position, b.position);
                if r > 0.0 {
                    // U = -G m1 m2 / r = -F * r
                    energy -= force_magnitude(g, a.mass, b.mass, r) * r;
                }
            }
        }
        energy
    }
}
