//! Draw command implementation.

use anyhow::Result;

use super::common::resolve_experiment;
use crate::CircuitArgs;

/// Execute the draw command.
pub fn execute(circuit: &CircuitArgs) -> Result<()> {
    let experiment = resolve_experiment(circuit)?;
    println!("{}", experiment.circuit);
    Ok(())
}
