// Monitoring: tracing subscriber setup and optional Sentry error reporting

use serde_json::Value;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` controls the filter (default `info`). When Sentry is active,
/// error events are forwarded to it as well.
pub fn init_tracing(with_sentry: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

    let registry = tracing_subscriber::registry().with(filter).with(fmt_layer);

    if with_sentry {
        registry.with(sentry_tracing::layer()).init();
    } else {
        registry.init();
    }
}

/// Initialize Sentry when a DSN is configured. Keep the guard alive for the
/// lifetime of the process.
pub fn init_sentry(dsn: Option<&str>) -> Option<sentry::ClientInitGuard> {
    let dsn = dsn.filter(|d| !d.is_empty())?;

    let guard = sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some(
                std::env::var("ENVIRONMENT")
                    .unwrap_or_else(|_| "development".to_string())
                    .into(),
            ),
            traces_sample_rate: 0.0,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Report a failed call to an external collaborator
pub fn capture_upstream_error(service: &str, err: &dyn std::error::Error) {
    error!(service = %service, error = %err, "Upstream call failed");

    sentry::with_scope(
        |scope| scope.set_tag("upstream", service),
        || sentry::capture_error(err),
    );
}

/// Record a payment lifecycle step as a breadcrumb
pub fn record_payment_event(event: &str, data: Value) {
    info!(event = %event, data = %data, "Payment event");

    let mut breadcrumb = sentry::Breadcrumb {
        ty: "default".into(),
        category: Some("payments".into()),
        level: sentry::Level::Info,
        message: Some(event.to_string()),
        ..Default::default()
    };

    if let Value::Object(map) = data {
        for (key, value) in map {
            breadcrumb.data.insert(key, value);
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
