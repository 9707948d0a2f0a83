use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "example_client=info";
const VERBOSE_FILTER: &str = "example_client=debug,info";

fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER }))
}

// shared by both output formats: message and fields only
fn bare_layer<S>() -> fmt::Layer<S> {
    fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
}

/// Compact human-readable output. `RUST_LOG` overrides the level.
pub fn init_logger(verbose: bool) {
    // try_init: tests may install a subscriber more than once
    let _ = tracing_subscriber::registry()
        .with(filter(verbose))
        .with(bare_layer().compact())
        .try_init();
}

/// Line-delimited JSON, for CI log collectors.
pub fn init_json_logger(verbose: bool) {
    let _ = tracing_subscriber::registry()
        .with(filter(verbose))
        .with(bare_layer().json())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_ignored() {
        init_json_logger(true);
        init_logger(false);
        tracing::info!(target: "example_client", "still logging");
    }
}
