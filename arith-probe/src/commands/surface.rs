use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::surface::{discover_exports, validate_surface};

/// List the #[ffi] exports under `path` and check they form the full surface
pub fn execute(path: &str) -> Result<()> {
    let functions = discover_exports(Path::new(path))?;

    if functions.is_empty() {
        println!("{} No #[ffi] functions found in {}", "warning:".yellow().bold(), path);
    }

    for function in &functions {
        println!("  {} {}",
            function.c_signature(),
            format!("({})", function.source_file.display()).dimmed()
        );
    }

    let errors = validate_surface(&functions);
    if !errors.is_empty() {
        eprintln!("{} {} error(s) found:\n", "error:".red().bold(), errors.len());
        for error in &errors {
            eprintln!("  {}", error);
        }
        anyhow::bail!("Surface check failed with {} error(s)", errors.len());
    }

    println!("   {} {} export(s)", "Checked".green().bold(), functions.len());

    Ok(())
}
