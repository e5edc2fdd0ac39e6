use crate::integrator::{Integrator, SimulationError};
use crate::params::SimulationParams;
use crate::parser::{parse_universe, ParseError};
use crate::recorder::{NoopObserver, StepObserver, Trajectory};
use crate::universe::Universe;
use thiserror::Error;

/// Anything that can stop a run from source text
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RunError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

/// Run a universe to completion, reporting each step to `observer`
pub fn run_universe<O: StepObserver + ?Sized>(
    universe: Universe,
    params: &SimulationParams,
    observer: &mut O,
) -> Result<Trajectory, SimulationError> {
    Integrator::new(universe, params.clone())?.run(observer)
}

/// Main entry point: parse a universe file and run it
pub fn run_source(source: &str, params: &SimulationParams) -> Result<Trajectory, RunError> {
    let universe = parse_universe(source)?;
    Ok(run_universe(universe, params, &mut NoopObserver)?)
}
