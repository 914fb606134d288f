// Arithmetic export surface
//
// Every function here is exported through the C ABI by #[ffi]. The Rust
// functions stay available to Rust callers under their snake_case names.

use arith_ffi_macro::ffi;

#[ffi(export = "Add")]
pub fn add(a: f64, b: f64) -> f64 {
    a + b
}

#[ffi(export = "Subtract")]
pub fn subtract(a: f64, b: f64) -> f64 {
    a - b
}

#[ffi(export = "Multiply")]
pub fn multiply(a: f64, b: f64) -> f64 {
    a * b
}

/// Divides `a` by `b`, returning 0 when `b` is zero (of either sign).
#[ffi(export = "Divide")]
pub fn divide(a: f64, b: f64) -> f64 {
    if b == 0.0 {
        return 0.0;
    }
    a / b
}
