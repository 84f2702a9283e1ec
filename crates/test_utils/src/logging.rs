//! Tracing setup for tests
//!
//! Installs a fmt subscriber that writes through the test harness so log
//! lines only show for failing tests. Filter with `RUST_LOG`, e.g.
//! `RUST_LOG=domain_quote=debug`.

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

static INIT: OnceCell<()> = OnceCell::new();

/// Installs the test subscriber once per test binary
pub fn init_tracing() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
