use anyhow::{bail, Result};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Signature shared by every exported entry point
pub type EntryPoint = extern "C" fn(f64, f64) -> f64;

/// One of the four exported operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    /// Name of the exported symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Add => "Add",
            Operation::Subtract => "Subtract",
            Operation::Multiply => "Multiply",
            Operation::Divide => "Divide",
        }
    }

    /// The exported C-ABI function for this operation
    pub fn entry(&self) -> EntryPoint {
        match self {
            Operation::Add => arith::Add,
            Operation::Subtract => arith::Subtract,
            Operation::Multiply => arith::Multiply,
            Operation::Divide => arith::Divide,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        for op in Operation::ALL {
            if op.symbol().eq_ignore_ascii_case(s.trim()) {
                return Ok(op);
            }
        }
        bail!(
            "unknown operation '{}'. Expected one of: Add, Subtract, Multiply, Divide",
            s
        )
    }
}

impl TryFrom<String> for Operation {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}
