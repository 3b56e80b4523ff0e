mod config;
mod shutdown;

pub use config::TelemetryConfig;
pub use shutdown::TelemetryGuard;

use crate::error::{Curl2OpenApiError, Result};
use opentelemetry::KeyValue;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::{WithExportConfig, WithHttpConfig};
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_FILTER: &str = "curl2openapi=info,tower_http=debug";

/// Install the global subscriber. Logs go to stderr so that documents
/// printed on stdout stay clean.
pub fn init_telemetry() -> Result<TelemetryGuard> {
    let config = TelemetryConfig::from_env();

    if config.otel_enabled {
        match init_with_otel(&config) {
            Ok(provider) => return Ok(TelemetryGuard::new(Some(provider))),
            Err(e) => {
                eprintln!(
                    "Failed to initialize OpenTelemetry: {}. Falling back to stderr-only logging.",
                    e
                );
            }
        }
    }

    init_stderr_only(&config);
    Ok(TelemetryGuard::default())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn init_with_otel(config: &TelemetryConfig) -> Result<SdkTracerProvider> {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .map_err(|e| {
            Curl2OpenApiError::ValidationError(format!("Failed to build HTTP client: {}", e))
        })?;

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_http()
        .with_http_client(client)
        .with_endpoint(&config.endpoint)
        .with_protocol(opentelemetry_otlp::Protocol::HttpBinary)
        .with_timeout(std::time::Duration::from_secs(5))
        .with_headers(config.headers.clone())
        .build()
        .map_err(|e| {
            Curl2OpenApiError::ValidationError(format!("Failed to build OTLP exporter: {}", e))
        })?;

    let resource = opentelemetry_sdk::Resource::builder_empty()
        .with_service_name(config.service_name.clone())
        .with_attributes([KeyValue::new("service.version", env!("CARGO_PKG_VERSION"))])
        .build();

    let provider = SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(resource)
        .build();

    // Tracer must be taken before the provider is handed to the global slot
    let tracer = provider.tracer("curl2openapi");
    opentelemetry::global::set_tracer_provider(provider.clone());

    let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);
    let registry = tracing_subscriber::registry()
        .with(env_filter())
        .with(otel_layer);

    if config.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    tracing::info!(
        "OpenTelemetry initialized with endpoint: {}",
        config.endpoint
    );
    Ok(provider)
}

fn init_stderr_only(config: &TelemetryConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr);

    if config.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }

    tracing::debug!("Tracing initialized (OpenTelemetry disabled)");
}
