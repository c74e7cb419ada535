//! Test harness that boots the API server on an ephemeral port.
//!
//! Each test gets its own server with a fresh in-memory favorites store,
//! serving the fixture catalog.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use axum::Router;
use hub_client::{HubClient, HubClientOptions};
use server_core::domains::resources::Catalog;
use server_core::kernel::ServerDeps;
use server_core::server::build_app;
use test_context::AsyncTestContext;
use tokio::task::JoinHandle;

/// Fixture catalog shipped with the tests
pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/resources.json")
}

pub fn fixture_catalog() -> Catalog {
    Catalog::load(&fixture_path())
}

/// Router over the fixture catalog, for `oneshot` tests
pub fn test_app() -> Router {
    build_app(ServerDeps::in_memory(fixture_catalog()), &[])
}

/// A running server plus a client pointed at it.
///
/// # Example using test-context
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let client = ctx.client();
///     // ... test code
/// }
/// ```
pub struct TestHarness {
    pub addr: SocketAddr,
    server: JoinHandle<()>,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        self.server.abort();
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        // Uses try_init() to avoid panicking if already initialized.
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("Failed to bind test listener")?;
        let addr = listener.local_addr()?;
        let app = test_app();

        let server = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "Test server exited");
            }
        });

        Ok(Self { addr, server })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self) -> HubClient {
        HubClient::new(HubClientOptions::new(self.base_url()))
    }
}
