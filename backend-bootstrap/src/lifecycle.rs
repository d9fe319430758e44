use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use backend_application::AppState;
use backend_infrastructure::AppConfig;
use backend_interfaces_http::build_router;

use crate::context::AppContext;

fn build_router_with_layers(state: AppState) -> Router {
    build_router(state.clone())
        .layer(CorsLayer::permissive())
        // max_body_bytes replaces axum's 2 MB extractor limit
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(
            usize::try_from(state.config.max_body_bytes).unwrap_or(usize::MAX),
        ))
        .layer(TimeoutLayer::new(std::time::Duration::from_secs(
            state.config.request_timeout_seconds,
        )))
        .layer(TraceLayer::new_for_http())
}

pub async fn run_standalone(config: AppConfig) -> Result<()> {
    let context = AppContext::new(&config).await?;
    let state = context.state;

    let app = build_router_with_layers(state.clone());
    let addr: std::net::SocketAddr = state.config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("sigterm handler unavailable: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    async fn memory_state(max_body_bytes: u64) -> AppState {
        let config = AppConfig {
            data_path: String::new(),
            max_body_bytes,
            ..AppConfig::default()
        };
        AppContext::new(&config).await.expect("context").state
    }

    /// Posts a JSON import over a real socket and returns the status line.
    async fn post_import(state: AppState, body: Vec<u8>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        let app = build_router_with_layers(state);
        tokio::spawn(async move { axum::serve(listener, app).await });

        let mut stream = TcpStream::connect(addr).await.expect("connect");
        let head = format!(
            "POST /v1/import HTTP/1.1\r\nHost: {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            addr,
            body.len()
        );
        stream.write_all(head.as_bytes()).await.expect("head");
        // A rejected request may be answered before the body is consumed.
        let _ = stream.write_all(&body).await;

        let mut response = Vec::new();
        let mut chunk = [0u8; 1024];
        while !response.windows(2).any(|pair| pair == b"\r\n") {
            match stream.read(&mut chunk).await {
                Ok(0) | Err(_) => break,
                Ok(read) => response.extend_from_slice(&chunk[..read]),
            }
        }
        String::from_utf8_lossy(&response)
            .lines()
            .next()
            .unwrap_or("")
            .to_string()
    }

    fn rows_with_notes(notes_len: usize) -> Vec<u8> {
        format!(
            r#"[{{"Barcode":"1","Name":"Ly","Notes":"{}"}}]"#,
            "x".repeat(notes_len)
        )
        .into_bytes()
    }

    #[tokio::test]
    async fn import_accepts_bodies_above_two_megabytes() {
        let state = memory_state(16 * 1024 * 1024).await;
        let status = post_import(state.clone(), rows_with_notes(3 * 1024 * 1024)).await;
        assert!(status.contains(" 200 "), "status line: {}", status);
        let record = state
            .record_repo
            .get_record("1")
            .await
            .expect("get")
            .expect("record");
        assert_eq!(record.notes.len(), 3 * 1024 * 1024);
    }

    #[tokio::test]
    async fn import_over_configured_limit_is_rejected() {
        let state = memory_state(1024).await;
        let status = post_import(state, rows_with_notes(4096)).await;
        assert!(status.contains(" 413 "), "status line: {}", status);
    }
}
