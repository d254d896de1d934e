/// Install `env_logger` for the current test binary.
///
/// Safe to call from every test: only the first call installs the logger,
/// later calls are ignored. Output is captured by the test harness and the
/// level comes from `RUST_LOG`.
pub fn init_test_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .try_init();
}
