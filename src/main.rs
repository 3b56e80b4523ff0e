use clap::Parser;
use curl2openapi::{
    cli::{Cli, Commands},
    commands, telemetry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let _telemetry = telemetry::init_telemetry()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { curl, info } => {
            commands::execute_parse(&curl, info)?;
        }
        Commands::Generate {
            input,
            title,
            description,
            api_version,
            format,
            output,
            operation_security,
        } => {
            let options = commands::GenerateOptions {
                title,
                description,
                version: api_version,
                format: format.into(),
                operation_security,
            };
            commands::execute_generate(&input, &options, output.as_deref())?;
        }
        Commands::Endpoints { input } => {
            commands::execute_endpoints(&input)?;
        }
        Commands::Validate { spec } => {
            commands::execute_validate(&spec)?;
        }
        Commands::Serve { port } => {
            commands::execute_serve(port).await?;
        }
    }

    Ok(())
}
