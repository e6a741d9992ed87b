use std::env;
use std::sync::Once;
use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::Node;

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "debug");
        }
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Two-root sample forest used across tests.
///
/// ```text
/// electronics (1500)          furniture (1000)
/// ├── phones (800)            ├── tables (300)
/// └── laptops (700)           └── chairs (700)
/// ```
pub fn sample_forest() -> Vec<Node> {
    vec![
        Node::branch(
            "electronics",
            "Electronics",
            vec![
                Node::leaf("phones", "Phones", 800.0),
                Node::leaf("laptops", "Laptops", 700.0),
            ],
        ),
        Node::branch(
            "furniture",
            "Furniture",
            vec![
                Node::leaf("tables", "Tables", 300.0),
                Node::leaf("chairs", "Chairs", 700.0),
            ],
        ),
    ]
}
