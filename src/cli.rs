use crate::synthesis::DocumentFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "curl2openapi")]
#[command(version)]
#[command(about = "Synthesize OpenAPI documents from captured cURL commands", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a single cURL command and print the request as JSON
    Parse {
        /// The cURL command (quote it as one shell argument)
        curl: String,

        /// Also print base URL, path parameters and content type
        #[arg(long)]
        info: bool,
    },

    /// Generate an OpenAPI document from a capture file or directory
    Generate {
        /// Capture file (.curl/.txt/.sh, .yaml/.json) or directory of them
        #[arg(short, long)]
        input: PathBuf,

        /// Document title
        #[arg(short, long, default_value = "Generated API")]
        title: String,

        /// Document description
        #[arg(short, long, default_value = "Generated from cURL commands")]
        description: String,

        /// Document version
        #[arg(long, default_value = "1.0.0")]
        api_version: String,

        /// Output format
        #[arg(short, long, default_value = "yaml")]
        format: ExportFormat,

        /// Output file (stdout if not specified)
        #[arg(short = 'O', long)]
        output: Option<PathBuf>,

        /// Require bearerAuth on operations whose captures sent an Authorization header
        #[arg(long)]
        operation_security: bool,
    },

    /// List the endpoints a capture file groups into
    Endpoints {
        /// Capture file or directory
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Validate an OpenAPI document (YAML or JSON)
    Validate {
        /// Path to the document
        spec: PathBuf,
    },

    /// Start the HTTP API
    Serve {
        /// Port number
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    Yaml,
    Json,
}

impl From<ExportFormat> for DocumentFormat {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Yaml => DocumentFormat::Yaml,
            ExportFormat::Json => DocumentFormat::Json,
        }
    }
}
