//! Tracing subscriber wiring.
//!
//! Diagnostic logs always go to stderr so they never interleave with the
//! progress lines on stdout. The filter comes from `RUST_LOG`; the default is
//! `error` so the console lines on stderr are not repeated as log events. ANSI
//! colours are used only when stderr is a terminal. When
//! `OTEL_EXPORTER_OTLP_ENDPOINT` is set, spans are also exported over
//! OTLP/gRPC.

use std::io::IsTerminal;

use anyhow::Context;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::trace::TracerProvider;
use opentelemetry_sdk::Resource;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::args::LogFormat;

const SERVICE_NAME: &str = "assign-security-policy";
const OTLP_ENDPOINT_VAR: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";
const DEFAULT_FILTER: &str = "error";

/// Keeps the OTLP pipeline alive; call [`Observability::shutdown`] before exit
/// to flush buffered spans.
pub struct Observability {
    provider: Option<TracerProvider>,
}

impl Observability {
    /// Installs the global subscriber: one stderr layer in `format`, plus the
    /// OTLP layer when an exporter endpoint is configured.
    ///
    /// Fails if a subscriber is already installed or the exporter cannot be
    /// built.
    pub fn init(format: LogFormat) -> anyhow::Result<Self> {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let ansi = std::io::stderr().is_terminal();

        let (json_layer, text_layer) = match format {
            LogFormat::Json => (
                Some(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_ansi(false),
                ),
                None,
            ),
            LogFormat::Text => (
                None,
                Some(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_ansi(ansi)
                        .with_target(false)
                        .compact(),
                ),
            ),
        };

        let provider = match std::env::var_os(OTLP_ENDPOINT_VAR) {
            Some(_) => Some(otlp_provider()?),
            None => None,
        };
        let otel_layer = provider
            .as_ref()
            .map(|p| tracing_opentelemetry::layer().with_tracer(p.tracer(SERVICE_NAME)));

        tracing_subscriber::registry()
            .with(filter)
            .with(json_layer)
            .with(text_layer)
            .with(otel_layer)
            .try_init()
            .context("failed to install tracing subscriber")?;

        Ok(Self { provider })
    }

    /// Flushes and stops the OTLP exporter, if one was started.
    ///
    /// The SDK's shutdown blocks, so it runs off the runtime thread.
    pub async fn shutdown(self) {
        let Some(provider) = self.provider else {
            return;
        };
        match tokio::task::spawn_blocking(move || provider.shutdown()).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => eprintln!("Warning: failed to flush traces: {err}"),
            Err(err) => eprintln!("Warning: trace shutdown task failed: {err}"),
        }
    }
}

fn otlp_provider() -> anyhow::Result<TracerProvider> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()
        .context("failed to build OTLP span exporter")?;

    Ok(TracerProvider::builder()
        .with_batch_exporter(exporter, opentelemetry_sdk::runtime::Tokio)
        .with_resource(Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]))
        .build())
}
