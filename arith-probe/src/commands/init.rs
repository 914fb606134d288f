use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

const CASES_TEMPLATE: &str = include_str!("../../templates/arith-cases.toml");

/// Write the template case file to `path`
pub fn execute(path: &str) -> Result<()> {
    let cases_path = Path::new(path);

    if cases_path.exists() {
        anyhow::bail!("File '{}' already exists", path);
    }

    if let Some(parent) = cases_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .context(format!("Failed to create directory {}", parent.display()))?;
        }
    }

    fs::write(cases_path, CASES_TEMPLATE)
        .context(format!("Failed to write {}", path))?;

    println!("     {} case file `{}`", "Created".green().bold(), path);

    Ok(())
}
