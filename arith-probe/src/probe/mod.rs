//! Evaluates case files against the exported entry points.

pub mod library;
pub mod operation;

pub use library::DynamicCalculator;
pub use operation::{EntryPoint, Operation};

use crate::cases::{Case, CaseFile};

/// Anything that can evaluate an operation on two doubles
pub trait Calculator {
    fn apply(&self, op: Operation, a: f64, b: f64) -> f64;
}

/// Calls the C-ABI entry points linked into this binary
#[derive(Debug, Default, Clone, Copy)]
pub struct ExportedCalculator;

impl Calculator for ExportedCalculator {
    fn apply(&self, op: Operation, a: f64, b: f64) -> f64 {
        (op.entry())(a, b)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub case: Case,
    pub actual: f64,
    pub passed: bool,
}

#[derive(Debug, Default)]
pub struct Report {
    pub outcomes: Vec<Outcome>,
}

impl Report {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn failures(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|o| !o.passed)
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// Run every case in `file` through `calculator`
pub fn run_cases(calculator: &dyn Calculator, file: &CaseFile) -> Report {
    let outcomes = file
        .cases
        .iter()
        .map(|case| {
            let actual = calculator.apply(case.op, case.a, case.b);
            Outcome {
                case: case.clone(),
                actual,
                passed: matches(actual, case.expected, file.probe.tolerance),
            }
        })
        .collect();

    Report { outcomes }
}

/// NaN matches NaN; equal values (infinities, signed zeros) always match
pub fn matches(actual: f64, expected: f64, tolerance: f64) -> bool {
    if actual.is_nan() || expected.is_nan() {
        return actual.is_nan() && expected.is_nan();
    }
    actual == expected || (actual - expected).abs() <= tolerance
}
