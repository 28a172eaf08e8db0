use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global fmt subscriber. An invalid filter falls back to `info`.
pub fn setup_tracing(filter: &str) {
    let env_filter = EnvFilter::builder().parse(filter).unwrap_or_else(|e| {
        eprintln!("Couldn't create env filter from {}: {}", filter, e);
        EnvFilter::new("info")
    });

    let result = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::Layer::default().with_target(false))
        .try_init();
    if let Err(e) = result {
        eprintln!("Tracing already initialised: {}", e);
    }
}
