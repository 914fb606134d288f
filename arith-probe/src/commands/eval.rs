use anyhow::Result;

use crate::probe::{Calculator, ExportedCalculator, Operation};

/// Evaluate a single call and print the result
pub fn execute(op: &str, a: f64, b: f64) -> Result<()> {
    let op: Operation = op.parse()?;
    let result = ExportedCalculator.apply(op, a, b);
    println!("{}", result);
    Ok(())
}
