use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Environment;

fn default_filter(environment: Environment) -> &'static str {
    match environment {
        Environment::Development => "simple_blog=debug,tower_http=debug",
        Environment::Production => "simple_blog=info,tower_http=info",
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the default filter;
/// production logs are JSON lines.
pub fn init(environment: Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter(environment).into());

    let registry = tracing_subscriber::registry().with(filter);
    match environment {
        Environment::Production => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        Environment::Development => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    install_panic_hook();
}

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!("Panic: {}", info);
        default_hook(info);
    }));
}
