//! Test-only logger setup.

use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

/// Install an `env_logger` once per test binary. `RUST_LOG` overrides the
/// default `trace` level for this crate.
pub(crate) fn init_test_logger() {
    INIT.call_once_force(|_| {
        let _ = Builder::new()
            .filter_level(LevelFilter::Warn)
            .filter_module("pjw_hashtable", LevelFilter::Trace)
            .is_test(true)
            .parse_default_env()
            .try_init();
    });
}
