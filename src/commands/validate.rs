use crate::validation::validate_spec;
use crate::{Curl2OpenApiError, Result};
use colored::*;
use std::fs;
use std::path::Path;

/// Execute the validate command
pub fn execute_validate(spec_path: &Path) -> Result<()> {
    println!("{}", "Validating OpenAPI document...".bright_blue());
    println!("  Path: {}", spec_path.display());

    let content = fs::read_to_string(spec_path).map_err(|e| {
        Curl2OpenApiError::InvalidPath(format!(
            "Failed to read {}: {}",
            spec_path.display(),
            e
        ))
    })?;

    let result = validate_spec(&content);

    if !result.errors.is_empty() {
        println!("  {}", "✗ Errors:".red().bold());
        for error in &result.errors {
            println!("    - {}", error.format().red());
        }
    }

    if !result.warnings.is_empty() {
        println!("  {}", "⚠ Warnings:".yellow());
        for warning in &result.warnings {
            println!("    - {}", warning.format().yellow());
        }
    }

    println!();
    if result.is_valid {
        println!("{}", "✓ Document is valid".green().bold());
        Ok(())
    } else {
        Err(Curl2OpenApiError::ValidationError(format!(
            "{} error(s) found",
            result.errors.len()
        )))
    }
}
