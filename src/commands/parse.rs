use crate::parser::{extract_api_info, parse_curl};
use crate::Result;
use colored::*;

/// Execute the parse command
pub fn execute_parse(curl: &str, info: bool) -> Result<()> {
    let parsed = parse_curl(curl)?;

    println!("{}", "Parsed request".bright_blue());
    println!("{}", serde_json::to_string_pretty(&parsed)?);

    if info {
        let api_info = extract_api_info(&parsed)?;
        println!();
        println!("{}", "API info".bright_blue());
        println!("  Base URL: {}", api_info.base_url.bold());
        println!("  Path: {}", api_info.path);
        if !api_info.path_params.is_empty() {
            println!("  Path parameters: {}", api_info.path_params.join(", ").cyan());
        }
        if let Some(query) = &api_info.query_params {
            for (name, value) in query {
                println!("  Query: {} = {}", name.cyan(), value);
            }
        }
        if let Some(content_type) = &api_info.content_type {
            println!("  Content-Type: {}", content_type);
        }
    }

    Ok(())
}
