use env_logger::{Builder, Env};

/// Install the stderr logger. `RUST_LOG` wins over the verbosity flag.
pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "pairdup=debug"
    } else {
        "pairdup=info"
    };

    Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_target(false)
        .format_timestamp(None)
        .init();
}
