use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::time::Instant;

use crate::cases;
use crate::probe::{self, Calculator, DynamicCalculator, ExportedCalculator};

/// Run a case file against the exported entry points.
/// With `library`, the entry points are loaded from that built shared library.
pub fn execute(path: &str, library: Option<&str>) -> Result<()> {
    let start = Instant::now();

    let file = cases::load_cases(path)?;
    let calculator: Box<dyn Calculator> = match library {
        Some(library) => Box::new(DynamicCalculator::open(Path::new(library))?),
        None => Box::new(ExportedCalculator),
    };
    let report = probe::run_cases(calculator.as_ref(), &file);

    let elapsed = start.elapsed();

    if !report.is_success() {
        eprintln!("{} {} case(s) failed:\n", "error:".red().bold(), report.failed());
        for outcome in report.failures() {
            let case = &outcome.case;
            eprintln!(
                "  {} expected {}, got {}",
                format!("{}({}, {})", case.op, case.a, case.b).yellow(),
                case.expected,
                outcome.actual
            );
        }
        anyhow::bail!("Probe failed with {} failing case(s)", report.failed());
    }

    println!("    {} {} case(s) in {:.2}s",
        "Passed".green().bold(),
        report.passed(),
        elapsed.as_secs_f64()
    );

    Ok(())
}
