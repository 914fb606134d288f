//! Arith: a native shared library exporting four `(f64, f64) -> f64` entry points
//! (`Add`, `Subtract`, `Multiply`, `Divide`) with the C calling convention.

pub mod ops;

pub use ops::{add, divide, multiply, subtract};
pub use ops::{Add, Divide, Multiply, Subtract};
