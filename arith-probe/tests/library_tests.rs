use anyhow::{Context, Result};
use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};
use std::fs;
use std::path::{Path, PathBuf};

use arith_probe::commands::run;
use arith_probe::probe::{Calculator, DynamicCalculator, ExportedCalculator, Operation};

/// Find the arith cdylib cargo built next to this test binary
fn built_library() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let deps_dir = exe.parent().context("test binary has no parent directory")?;
    let search = [Some(deps_dir), deps_dir.parent()];

    let mut candidates: Vec<PathBuf> = Vec::new();
    for dir in search.into_iter().flatten() {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if is_arith_library(&path) {
                candidates.push(path);
            }
        }
    }

    // Newest build wins if stale copies are around
    candidates.sort_by_key(|path| fs::metadata(path).and_then(|m| m.modified()).ok());
    candidates
        .pop()
        .context(format!("no {}arith{} found near {}", DLL_PREFIX, DLL_SUFFIX, deps_dir.display()))
}

fn is_arith_library(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let Some(stem) = name
        .strip_prefix(DLL_PREFIX)
        .and_then(|rest| rest.strip_suffix(DLL_SUFFIX))
    else {
        return false;
    };
    stem == "arith" || stem.strip_prefix("arith-").is_some_and(|hash| !hash.contains('.'))
}

#[test]
fn test_built_library_exports_entry_points() -> Result<()> {
    let path = built_library()?;
    let calculator = DynamicCalculator::open(&path)?;

    assert_eq!(calculator.apply(Operation::Add, 2.0, 3.0), 5.0);
    assert_eq!(calculator.apply(Operation::Subtract, 5.0, 2.0), 3.0);
    assert_eq!(calculator.apply(Operation::Multiply, 4.0, 2.5), 10.0);
    assert_eq!(calculator.apply(Operation::Divide, 10.0, 2.0), 5.0);
    assert_eq!(calculator.apply(Operation::Divide, 7.0, 0.0), 0.0);
    assert_eq!(calculator.apply(Operation::Divide, 7.0, -0.0), 0.0);

    Ok(())
}

#[test]
fn test_built_library_matches_linked_functions() -> Result<()> {
    let calculator = DynamicCalculator::open(&built_library()?)?;
    let samples = [(2.0, 3.0), (-1.5, 0.25), (1e300, 1e10), (0.0, 0.0)];

    for op in Operation::ALL {
        for (a, b) in samples {
            assert_eq!(
                calculator.apply(op, a, b),
                ExportedCalculator.apply(op, a, b),
                "{}({}, {})",
                op,
                a,
                b
            );
        }
    }

    Ok(())
}

#[test]
fn test_run_with_library() -> Result<()> {
    let library = built_library()?;
    let temp_dir = tempfile::TempDir::new()?;
    let cases_path = temp_dir.path().join("cases.toml");
    fs::write(
        &cases_path,
        r#"
[[case]]
op = "Multiply"
a = 4.0
b = 2.5
expected = 10.0

[[case]]
op = "Divide"
a = 7.0
b = 0.0
expected = 0.0
"#,
    )?;

    run::execute(cases_path.to_str().unwrap(), library.to_str())?;

    Ok(())
}
