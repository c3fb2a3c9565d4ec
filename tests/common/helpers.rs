//! Test helper functions and utilities

use std::sync::Once;
use swyft_core::context_error::Result;
use tokio::net::TcpListener;

static INIT_LOGGER: Once = Once::new();

/// Initialize test logging (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    });
}

/// Find an available port for testing
pub async fn find_available_port() -> Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    Ok(port)
}

/// Create a test HTTP client
pub fn create_test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .expect("Failed to create HTTP client")
}

/// Serve an axum router on an ephemeral port, returning its base URL
pub async fn spawn_server(app: axum::Router) -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let _ = axum::serve(listener, app.into_make_service()).await;
    });

    Ok(format!("http://{addr}"))
}

/// Log in against a running server, returning the bearer token
pub async fn login(base_url: &str, email: &str, password: &str) -> Result<String> {
    let client = create_test_client();
    let response = client
        .post(format!("{base_url}/api/auth/login"))
        .json(&serde_json::json!({ "email": email, "password": password }))
        .send()
        .await
        .map_err(|e| swyft_core::context_error!("Login request failed: {}", e))?;

    let body: serde_json::Value = response
        .json()
        .await
        .map_err(|e| swyft_core::context_error!("Login response unparsable: {}", e))?;

    body["token"]
        .as_str()
        .map(String::from)
        .ok_or_else(|| swyft_core::context_error!("Login response missing token"))
}
