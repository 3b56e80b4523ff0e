use super::LOCAL_PROJECT;
use crate::Result;
use crate::inference::endpoint::contextual_template;
use crate::loader::import_captures;
use crate::store::{CaptureStore, InMemoryCaptureStore};
use crate::synthesis::aggregate_captures;
use colored::*;
use std::path::Path;

/// Execute the endpoints command
pub fn execute_endpoints(input: &Path) -> Result<()> {
    let store = InMemoryCaptureStore::new();
    let report = import_captures(input, &store, LOCAL_PROJECT)?;
    for (entry, error) in &report.rejected {
        println!("{} #{}: {}", "⚠ Skipped command".yellow(), entry, error);
    }

    let captures = store.find_many_by_project(LOCAL_PROJECT);
    let aggregation = aggregate_captures(&captures);

    println!("{}", "Servers:".bright_blue());
    for server in &aggregation.servers {
        println!("  {}", server.url);
    }
    println!();

    println!("{}", "Endpoints:".bright_blue());
    for group in &aggregation.groups {
        println!(
            "  {} {}",
            group.key.to_string().bold(),
            format!("({} capture(s))", group.capture_count()).dimmed()
        );

        let mut labeled: Vec<String> = group
            .members
            .iter()
            .map(|m| contextual_template(m.url.path()))
            .filter(|t| *t != group.key.path)
            .collect();
        labeled.dedup();
        for template in labeled {
            println!("    {} {}", "→".dimmed(), template.cyan());
        }
    }

    for warning in &aggregation.warnings {
        println!("{} {}", "⚠".yellow(), warning.format().yellow());
    }

    Ok(())
}
