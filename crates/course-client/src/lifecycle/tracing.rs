//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered
//! by `RUST_LOG`. Module paths are hidden (`with_target(false)`); every log line
//! from the store already carries a `slice` field and every search line a
//! `session` field, which is what you filter and grep on.
//!
//! ```bash
//! RUST_LOG=info course-client sync      # one line per fetch and write
//! RUST_LOG=debug course-client search rust   # payloads, discarded writes, capture states
//! ```

use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}

/// Like [`setup_tracing`], but falls back to `default_level` when `RUST_LOG`
/// is unset or invalid.
pub fn setup_tracing_with_default(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
