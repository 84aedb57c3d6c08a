//! Shared helpers for the `wslctl` integration tests.
//!
//! [`SpyRunner`] stands in for the real process runner so remote commands,
//! probes and provisioning can be checked without a WSL front end.

pub mod builders;
pub mod spy_runner;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

pub use spy_runner::{RecordedCall, SpyRunner};

static TRACING: Once = Once::new();

/// Route `wslctl` events into the test harness output.
///
/// Filtering follows `RUST_LOG` and falls back to `wslctl=debug`, so the
/// runner's spawn, exit and kill events show up next to a failing test.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("wslctl=debug"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(false)
            .init();
    });
}

/// Fail the test instead of hanging when a runner never returns.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: Future<Output = T>,
{
    tokio::time::timeout(Duration::from_secs(5), f)
        .await
        .expect("wslctl call did not finish within 5 seconds")
}
