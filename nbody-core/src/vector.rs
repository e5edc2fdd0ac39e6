//! Distance and force primitives for point masses in the plane

use glam::DVec2;

/// Newton's gravitational constant in m^3 kg^-1 s^-2
pub const GRAVITATIONAL_CONSTANT: f64 = 6.674e-11;

/// Euclidean distance between two points. Zero when they coincide.
pub fn distance(a: DVec2, b: DVec2) -> f64 {
    let d = a - b;
    (d.x * d.x + d.y * d.y).sqrt()
}

/// Magnitude of the gravitational attraction between masses `m1` and `m2`
/// separated by `r`.
///
/// Not defined for `r == 0`; callers exclude self-interaction and
/// coincident bodies before calling this.
pub fn force_magnitude(g: f64, m1: f64, m2: f64, r: f64) -> f64 {
    g * m1 * m2 / (r * r)
}

/// Force exerted on the body at `pos_i` by the body at `pos_j`, given the
/// separation `r` between them. Points from i toward j.
pub fn force_components(g: f64, pos_i: DVec2, m_i: f64, pos_j: DVec2, m_j: f64, r: f64) -> DVec2 {
    let f = force_magnitude(g, m_i, m_j, r);
    DVec2::new(f * (pos_j.x - pos_i.x) / r, f * (pos_j.y - pos_i.y) / r)
}
