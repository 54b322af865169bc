/// Initializes the tracing/logging infrastructure for a host program.
///
/// The runtime itself only *emits* `tracing` events (lifecycle transitions
/// at `info`, message receipt at `debug`, handler failures at `warn`);
/// installing a subscriber is the host's choice. This helper wires up the
/// common case:
/// - **Environment-based filtering**: controlled via the `RUST_LOG`
///   environment variable
/// - **Human-readable formatting**: timestamps and log levels
///
/// # Environment Variables
///
/// - `RUST_LOG=info` - lifecycle transitions only
/// - `RUST_LOG=mailroom=debug` - plus per-message receipt logs
/// - `RUST_LOG=trace` - everything, including discarded late replies
///
/// # Example
///
/// ```ignore
/// setup_tracing();
/// tracing::info!("pipeline starting");
/// ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}
