//! Logger setup for the `lsystem-tree` binary. The library only uses `log`.

use std::sync::Once;

static INIT: Once = Once::new();

/// Installs `env_logger` on stderr, keeping stdout free for geometry.
///
/// `filter` uses the `env_logger` syntax (`debug`, `lsystem_tree=trace`).
/// Without it `RUST_LOG` applies, then `info`. Only the first call counts.
pub fn init_logging(filter: Option<&str>) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        match filter.map(str::to_owned).or_else(|| std::env::var("RUST_LOG").ok()) {
            Some(filter) => builder.parse_filters(&filter),
            None => builder.filter_level(log::LevelFilter::Info),
        };
        builder.target(env_logger::Target::Stderr);

        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}
