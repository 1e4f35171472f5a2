use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a stderr logger. `RUST_LOG` wins over `level` when set.
///
/// stdout is reserved for command output, so every event goes to stderr.
pub fn init_logging(level: &str) {
    let default_filter = format!("compound_interest_cli={level},compound_interest_core={level}");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    let result = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false),
        )
        .try_init();

    if let Err(e) = result {
        eprintln!("Warning: failed to initialise logging: {}", e);
    }
}
