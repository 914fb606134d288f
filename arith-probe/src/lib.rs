//! Harness for the arith shared library: runs TOML case files against its entry
//! points, either linked in or loaded from a built library file, and checks the
//! `#[ffi]` export surface in its sources.

pub mod probe;
pub mod surface;
pub mod cases;
pub mod commands;
