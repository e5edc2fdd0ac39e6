//! Determinism and symmetry tests - same input, same physics

use nbody_core::tests::test_helpers::{
    rel_eq, run_source_str, run_universe_file, trajectories_approx_equal, universe_from_rows,
};
use nbody_core::{run_universe, NoopObserver, SimulationParams, UpdateScheme};
use std::path::PathBuf;

fn test_data_path(filename: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path.push(filename);
    path
}

#[test]
fn test_planets_determinism() {
    let path = test_data_path("planets.txt");
    let params = SimulationParams::new(1e7, 25000.0);

    let first = run_universe_file(path.to_str().unwrap(), &params).expect("First run failed");
    let second = run_universe_file(path.to_str().unwrap(), &params).expect("Second run failed");

    // Bit-identical, not just close
    assert_eq!(first, second);
}

#[test]
fn test_sequential_determinism() {
    let source = std::fs::read_to_string(test_data_path("planets.txt")).unwrap();
    let params = SimulationParams::new(1e7, 25000.0).with_scheme(UpdateScheme::Sequential);

    let results: Vec<_> = (0..3)
        .map(|_| run_source_str(&source, &params).expect("Run failed"))
        .collect();

    for i in 1..results.len() {
        assert_eq!(results[0], results[i], "Run {} should match run 0", i);
    }
}

#[test]
fn test_swapping_bodies_swaps_trajectories() {
    let a = (-1.0, 0.0, 0.1, -0.4, 2.0);
    let b = (1.5, 0.5, -0.2, 0.3, 1.0);
    let params = SimulationParams::new(2.0, 0.01).with_gravitational_constant(1.0);

    let ab = run_universe(universe_from_rows(10.0, &[a, b]), &params, &mut NoopObserver).unwrap();
    let ba = run_universe(universe_from_rows(10.0, &[b, a]), &params, &mut NoopObserver).unwrap();

    assert_eq!(ab.xs, vec![ba.xs[1], ba.xs[0]]);
    assert_eq!(ab.ys, vec![ba.ys[1], ba.ys[0]]);
}

#[test]
fn test_permuting_bodies_permutes_trajectories() {
    let rows = [
        (0.0, 0.0, 0.0, 0.0, 5.0),
        (2.0, 0.0, 0.0, 1.5, 0.5),
        (-3.0, 1.0, 0.3, -1.0, 0.2),
        (0.0, -4.0, 1.1, 0.0, 0.1),
    ];
    let order = [2, 0, 3, 1];
    let permuted: Vec<_> = order.iter().map(|&i| rows[i]).collect();
    let params = SimulationParams::new(1.0, 0.001).with_gravitational_constant(1.0);

    let original = run_universe(universe_from_rows(10.0, &rows), &params, &mut NoopObserver).unwrap();
    let shuffled = run_universe(universe_from_rows(10.0, &permuted), &params, &mut NoopObserver).unwrap();

    for (k, &i) in order.iter().enumerate() {
        assert!(rel_eq(shuffled.xs[k], original.xs[i], 1e-9), "x of body {}", i);
        assert!(rel_eq(shuffled.ys[k], original.ys[i], 1e-9), "y of body {}", i);
    }
}

#[test]
fn test_identical_bodies_are_interchangeable() {
    let source_a = "2 10\n-1 0 0 -0.5 1 left.gif\n1 0 0 0.5 1 right.gif\n";
    let source_b = "2 10\n1 0 0 0.5 1 right.gif\n-1 0 0 -0.5 1 left.gif\n";
    let params = SimulationParams::new(3.0, 0.01).with_gravitational_constant(1.0);

    let a = run_source_str(source_a, &params).unwrap();
    let b = run_source_str(source_b, &params).unwrap();
    let b_swapped = nbody_core::Trajectory {
        xs: vec![b.xs[1], b.xs[0]],
        ys: vec![b.ys[1], b.ys[0]],
        ..b
    };

    assert!(trajectories_approx_equal(&a, &b_swapped, 1e-12));
}
