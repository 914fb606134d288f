use anyhow::Result;
use serde::Deserialize;
use std::fs;

use crate::probe::Operation;

pub const DEFAULT_CASES_FILE: &str = "arith-cases.toml";

#[derive(Debug, Deserialize)]
pub struct CaseFile {
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default, rename = "case")]
    pub cases: Vec<Case>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProbeConfig {
    /// Largest absolute difference accepted between actual and expected
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
        }
    }
}

fn default_tolerance() -> f64 {
    1e-9
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Case {
    pub op: Operation,
    pub a: f64,
    pub b: f64,
    pub expected: f64,
}

/// Load and validate a case file
pub fn load_cases(path: &str) -> Result<CaseFile> {
    let content = fs::read_to_string(path)
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("could not find `{}`", path)
            } else {
                anyhow::anyhow!("failed to read `{}`: {}", path, e)
            }
        })?;

    parse_cases(&content)
        .map_err(|e| anyhow::anyhow!("failed to parse `{}`: {}", path, e))
}

/// Parse case file contents (testable)
pub fn parse_cases(content: &str) -> Result<CaseFile> {
    let file: CaseFile = toml::from_str(content)?;
    validate(&file)?;
    Ok(file)
}

fn validate(file: &CaseFile) -> Result<()> {
    let tolerance = file.probe.tolerance;
    if !tolerance.is_finite() || tolerance < 0.0 {
        anyhow::bail!(
            "Invalid tolerance {}. Must be a finite, non-negative number",
            tolerance
        );
    }

    if file.cases.is_empty() {
        anyhow::bail!("No cases defined. Add at least one [[case]] table");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cases() {
        let content = r#"
            [probe]
            tolerance = 0.001

            [[case]]
            op = "Add"
            a = 2.0
            b = 3.0
            expected = 5.0

            [[case]]
            op = "divide"
            a = 7.0
            b = 0.0
            expected = 0.0
        "#;

        let file = parse_cases(content).unwrap();
        assert_eq!(file.probe.tolerance, 0.001);
        assert_eq!(file.cases.len(), 2);
        assert_eq!(file.cases[0].op, Operation::Add);
        assert_eq!(file.cases[1].op, Operation::Divide);
        assert_eq!(file.cases[1].b, 0.0);
    }

    #[test]
    fn test_default_tolerance() {
        let content = r#"
            [[case]]
            op = "Multiply"
            a = 4.0
            b = 2.5
            expected = 10.0
        "#;

        let file = parse_cases(content).unwrap();
        assert_eq!(file.probe.tolerance, 1e-9);
    }

    #[test]
    fn test_non_finite_values() {
        let content = r#"
            [[case]]
            op = "Add"
            a = inf
            b = 1.0
            expected = inf

            [[case]]
            op = "Subtract"
            a = inf
            b = inf
            expected = nan
        "#;

        let file = parse_cases(content).unwrap();
        assert_eq!(file.cases[0].expected, f64::INFINITY);
        assert!(file.cases[1].expected.is_nan());
    }

    #[test]
    fn test_rejects_invalid() {
        // No cases
        assert!(parse_cases("[probe]\ntolerance = 0.1\n").is_err());

        // Negative tolerance
        let content = r#"
            [probe]
            tolerance = -1.0

            [[case]]
            op = "Add"
            a = 1.0
            b = 1.0
            expected = 2.0
        "#;
        assert!(parse_cases(content).is_err());

        // Unknown operation
        let content = r#"
            [[case]]
            op = "Modulo"
            a = 1.0
            b = 1.0
            expected = 0.0
        "#;
        let err = parse_cases(content).unwrap_err();
        assert!(err.to_string().contains("unknown operation"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_cases("definitely-missing-cases.toml").unwrap_err();
        assert_eq!(err.to_string(), "could not find `definitely-missing-cases.toml`");
    }
}
