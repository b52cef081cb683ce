//! Test Module
//!
//! Integration-level test suite for the engine.
//!
//! ## Test Categories
//! - `analyzer_tests`: orchestration policy, fallback, hybrid recommendation
//! - `provider_tests`: concrete provider behavior against a mock HTTP server

pub mod provider_tests;

use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a test subscriber once so engine logs show up under
/// `cargo test -- --nocapture` with `RUST_LOG` set.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
