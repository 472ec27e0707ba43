pub mod estimator;
pub mod figure;
pub mod output;
pub mod presets;
pub mod run_wrapper;
pub mod workload;

pub mod flags;

pub mod error;

/// Sets up `env_logger`; `RUST_LOG` takes precedence over `verbose`
pub fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
