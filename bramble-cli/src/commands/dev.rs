//! Dev server command implementation with live rebuild.

use super::build::build_site_with_config;
use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use bramble_core::Config;
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::sync::mpsc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
struct AppState {
    output_dir: PathBuf,
}

/// Start development server with file watching
pub async fn dev_server(config_path: &Path, port: Option<u16>) -> Result<()> {
    let config = Config::from_file(config_path).context("Failed to load configuration")?;
    let port = resolve_port(port, &config);
    build_site_with_config(config.clone()).context("Failed to build site")?;

    let output_dir = config.output_dir();
    let config_path_buf = config_path.to_path_buf();

    tracing::info!("Starting dev server on http://localhost:{}", port);
    println!("\nServing at http://localhost:{}", port);
    println!("   Press Ctrl+C to stop\n");

    // Watch the posts directory, the config file, and every watched
    // passthrough source
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut _watcher = RecommendedWatcher::new(
        move |res| {
            let _ = tx.send(res);
        },
        notify::Config::default(),
    )
    .context("Failed to initialize file watcher")?;

    let posts_dir = config.posts_dir();
    _watcher
        .watch(&posts_dir, RecursiveMode::Recursive)
        .with_context(|| format!("Failed to watch {:?}", posts_dir))?;
    _watcher
        .watch(config_path, RecursiveMode::NonRecursive)
        .with_context(|| format!("Failed to watch {:?}", config_path))?;
    for target in config.watch_targets() {
        if !target.exists() {
            tracing::warn!("Watch target {:?} does not exist, skipping", target);
            continue;
        }
        _watcher
            .watch(&target, RecursiveMode::Recursive)
            .with_context(|| format!("Failed to watch {:?}", target))?;
    }

    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event {
                Ok(_ev) => {
                    // Debounce a bit by draining pending events
                    while rx.try_recv().is_ok() {}
                    tracing::info!("Change detected, rebuilding site...");
                    let res = tokio::task::spawn_blocking({
                        let config_path = config_path_buf.clone();
                        move || {
                            let config = Config::from_file(&config_path)?;
                            build_site_with_config(config)
                        }
                    })
                    .await;

                    match res {
                        Ok(Ok(_)) => tracing::info!("Rebuild complete"),
                        Ok(Err(e)) => tracing::error!("Rebuild failed: {:?}", e),
                        Err(e) => tracing::error!("Rebuild task panicked: {}", e),
                    }
                }
                Err(err) => tracing::warn!("Watcher error: {}", err),
            }
        }
    });

    let state = AppState {
        output_dir: output_dir.clone(),
    };

    let app = Router::new()
        .route("/", get(serve_index))
        .route("/{*path}", get(serve_with_404))
        .fallback(serve_404)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("127.0.0.1:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Serve index.html for root path
async fn serve_index(State(state): State<AppState>) -> Response {
    let index_path = state.output_dir.join("index.html");
    match fs::read_to_string(&index_path).await {
        Ok(content) => Html(content).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "Index not found").into_response(),
    }
}

/// Serve files with custom 404 handling
async fn serve_with_404(State(state): State<AppState>, uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    if !is_within_output(path) {
        return serve_404_inner(state).await;
    }
    let file_path = state.output_dir.join(path);

    match fs::read(&file_path).await {
        Ok(content) => Response::builder()
            .status(StatusCode::OK)
            .header("Content-Type", content_type_for_path(path))
            .body(Body::from(content))
            .unwrap(),
        Err(_) => serve_404_inner(state).await,
    }
}

/// Serve custom 404 page
async fn serve_404(State(state): State<AppState>) -> Response {
    serve_404_inner(state).await
}

async fn serve_404_inner(state: AppState) -> Response {
    let not_found_path = state.output_dir.join("404.html");

    match fs::read_to_string(&not_found_path).await {
        Ok(content) => Response::builder()
            .status(StatusCode::NOT_FOUND)
            .header("Content-Type", "text/html; charset=utf-8")
            .body(Body::from(content))
            .unwrap(),
        Err(_) => {
            // Fallback if 404.html doesn't exist
            Response::builder()
                .status(StatusCode::NOT_FOUND)
                .body(Body::from("404 Not Found"))
                .unwrap()
        }
    }
}

/// Resolve the listen port: CLI flag wins, otherwise the config value
fn resolve_port(flag: Option<u16>, config: &Config) -> u16 {
    flag.unwrap_or(config.server.port)
}

/// A request path stays inside the output directory only if it has no
/// parent-directory components
fn is_within_output(path: &str) -> bool {
    !Path::new(path)
        .components()
        .any(|c| matches!(c, Component::ParentDir))
}

fn content_type_for_path(path: &str) -> &'static str {
    match Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
        .as_str()
    {
        "html" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" => "application/javascript; charset=utf-8",
        "json" => "application/json; charset=utf-8",
        "xml" => "application/xml; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        _ => "application/octet-stream",
    }
}
