/// Initializes tracing for the command-line binary.
/// The log level comes from the RUST_LOG environment variable
/// (e.g., RUST_LOG=rsp_questions=debug).
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

/// Initializes tracing for tests: once per process, everything at trace
/// level, output captured by the test runner.
#[cfg(test)]
pub fn init_test_logging() {
    static TRACING_INIT: std::sync::Once = std::sync::Once::new();
    TRACING_INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("trace")
            .with_test_writer()
            .try_init()
            .ok(); // Ignore error if already initialized by another test
    });
}
