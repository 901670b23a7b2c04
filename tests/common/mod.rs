use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

pub fn init_test_logger() {
    INIT.call_once_force(|_| {
        let _ = Builder::new()
            .filter_level(LevelFilter::Info)
            .filter_module("pjw_hashtable", LevelFilter::Debug)
            .is_test(true)
            .parse_default_env()
            .try_init();
    });
}
