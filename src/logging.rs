use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging once (reads RUST_LOG, defaults to info). Safe to
/// call from multiple entry points.
pub fn init() {
    INIT.call_once(|| {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    });
}
