pub mod diagnostics;
pub mod forces;
pub mod integrator;
pub mod params;
pub mod parser;
pub mod recorder;
pub mod runtime;
pub mod universe;
pub mod vector;

pub use diagnostics::{format_parse_error, format_runtime_error, Span};
pub use integrator::{Integrator, IntegratorState, SimulationError};
pub use params::{SimulationParams, UpdateScheme};
pub use parser::{parse_universe, ParseError};
pub use recorder::{NoopObserver, Snapshot, SnapshotRecorder, StepObserver, StepSampler, Trajectory, TrajectoryRecorder};
pub use runtime::{run_source, run_universe, RunError};
pub use universe::{Body, Universe, UniverseError};
pub use vector::GRAVITATIONAL_CONSTANT;
