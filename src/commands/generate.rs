use super::LOCAL_PROJECT;
use crate::Result;
use crate::loader::import_captures;
use crate::store::{CaptureStore, InMemoryCaptureStore};
use crate::synthesis::{DocumentFormat, SynthesisOptions, render_document, synthesize};
use colored::*;
use std::fs;
use std::path::Path;

/// Settings for the generate command
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub title: String,
    pub description: String,
    pub version: String,
    pub format: DocumentFormat,
    pub operation_security: bool,
}

impl GenerateOptions {
    fn synthesis_options(&self) -> SynthesisOptions {
        SynthesisOptions {
            title: self.title.clone(),
            description: Some(self.description.clone()),
            version: self.version.clone(),
            operation_security: self.operation_security,
        }
    }
}

/// Generate a document and return the rendered text.
///
/// Progress goes to stderr so the document itself can be piped.
pub fn generate_document(input: &Path, options: &GenerateOptions) -> Result<String> {
    let store = InMemoryCaptureStore::new();
    let report = import_captures(input, &store, LOCAL_PROJECT)?;

    eprintln!(
        "{} {} capture(s) from {}",
        "Loaded".bright_blue(),
        report.imported,
        input.display()
    );
    for (entry, error) in &report.rejected {
        eprintln!("  {} #{}: {}", "⚠ Skipped command".yellow(), entry, error);
    }

    let captures = store.find_many_by_project(LOCAL_PROJECT);
    let synthesis = synthesize(&captures, &options.synthesis_options())?;

    for warning in &synthesis.warnings {
        eprintln!("  {} {}", "⚠".yellow(), warning.format().yellow());
    }
    eprintln!(
        "  Paths: {}, Operations: {}",
        synthesis.document.paths.len(),
        synthesis.document.operation_count()
    );

    render_document(&synthesis.document, options.format)
}

/// Execute the generate command
pub fn execute_generate(
    input: &Path,
    options: &GenerateOptions,
    output: Option<&Path>,
) -> Result<()> {
    let content = generate_document(input, options)?;

    match output {
        Some(path) => {
            fs::write(path, &content)?;
            eprintln!(
                "{} {}",
                "✓ OpenAPI document written to".green(),
                path.display()
            );
        }
        None => println!("{}", content),
    }

    Ok(())
}
