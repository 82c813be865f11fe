//! Tracing and OpenTelemetry setup for Quizforge services.

use opentelemetry::KeyValue;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::{
    Resource,
    trace::{RandomIdGenerator, Sampler, TracerProvider},
};
use opentelemetry_stdout::SpanExporter;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

const SERVICE_NAME: &str = "quizforge";

/// Filter from `RUST_LOG`, defaulting to info-level events for this
/// workspace when the variable is unset. The rate limiter logs its waits at
/// info, so the default surfaces throttling decisions out of the box.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quizforge=info"))
}

fn tracer_provider() -> TracerProvider {
    TracerProvider::builder()
        .with_simple_exporter(SpanExporter::default())
        .with_id_generator(RandomIdGenerator::default())
        .with_sampler(Sampler::AlwaysOn)
        .with_resource(Resource::new([KeyValue::new(
            "service.name",
            SERVICE_NAME,
        )]))
        .build()
}

/// Initialize tracing with an OpenTelemetry stdout exporter.
///
/// Installs two layers on the global subscriber: an OpenTelemetry span
/// layer exporting to stdout under the `quizforge` service name, and an fmt
/// layer for human-readable logs. Intended for development; a deployment
/// would swap the exporter for an OTLP one.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_telemetry() -> Result<(), Box<dyn std::error::Error>> {
    let tracer = tracer_provider().tracer(SERVICE_NAME);

    let telemetry_layer = tracing_opentelemetry::layer()
        .with_tracer(tracer)
        .with_filter(env_filter());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_filter(env_filter());

    tracing_subscriber::registry()
        .with(telemetry_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Shutdown OpenTelemetry and flush pending spans.
///
/// Call this before application exit to ensure all spans are exported.
pub fn shutdown_telemetry() {
    opentelemetry::global::shutdown_tracer_provider();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_installs_the_global_subscriber_once() {
        init_telemetry().unwrap();
        tracing::info!(check = true, "telemetry smoke event");

        // A second init must refuse to replace the installed subscriber.
        assert!(init_telemetry().is_err());

        shutdown_telemetry();
    }
}
