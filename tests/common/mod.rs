use tracing_subscriber::EnvFilter;

/// Install a test-writer subscriber so synthesis logging shows up under
/// `--nocapture`. Safe to call from every test; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
