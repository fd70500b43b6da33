//! # CLI Server
//!
//! Server startup and management for the Loantrack CLI.

use std::{net::SocketAddr, sync::Arc};

use anyhow::anyhow;
use auth::{JwtConfig, JwtKeys};
use error::Result;
use rustls::ServerConfig;
use server::{AppState, CorsConfig, create_app_router};
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;
use tower_service::Service as _;
use tracing::{info, warn};

use crate::{commands::ServeArgs, config::parse_socket_addr, tls};

/// Starts the API server with optional TLS support
///
/// Migrations and reference seeds run before the listener is bound.
///
/// # Arguments
///
/// * `database_url` - Connection URL
/// * `args` - Serve command arguments
pub async fn serve(database_url: &str, args: &ServeArgs) -> Result<()> {
    info!(target: "serve", "Starting API server...");

    // Fail on bad keys or TLS files before touching the database
    let jwt_config = JwtConfig {
        issuer:             args.jwt_issuer.clone(),
        expiration_seconds: args.jwt_expiration_seconds,
    };
    let jwt = JwtKeys::from_files(&args.rsa_private_key, &args.rsa_public_key, jwt_config)?;

    let tls_config = match (&args.tls_cert, &args.tls_key) {
        (Some(cert), Some(key)) if args.tls => Some(tls::server_config(cert, key)?),
        _ if args.tls => return Err(anyhow!("TLS requires both a certificate and a key").into()),
        _ => None,
    };

    let address = parse_socket_addr(&args.host, args.port)
        .map_err(|e| anyhow!("Invalid address {}:{}: {}", args.host, args.port, e))?;

    info!(target: "serve", "Connecting to database...");
    let db = migration::connect_to_database(database_url)
        .await
        .map_err(|e| anyhow!("Failed to connect to database: {}", e))?;

    info!(target: "serve", "Running database migrations and seeds...");
    migration::migrate_and_seed(&db).await?;
    info!(target: "serve", "Database is up to date");

    let cors = CorsConfig::from_origin_list(&args.cors_allowed_origins);
    info!(target: "serve", origins = ?cors.allowed_origins, "CORS configured");

    let state = AppState::new(db, jwt)
        .with_cookie_secure(args.cookie_secure)
        .with_cors(cors)
        .with_tls(args.tls);

    let app = create_app_router(state);

    match tls_config {
        Some(tls_config) => serve_https(app, address, tls_config).await,
        None => serve_http(app, address).await,
    }
}

/// Serves the application over plain HTTP
async fn serve_http(app: axum::Router, address: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(address)
        .await
        .map_err(|e| anyhow!("Failed to bind to {}: {}", address, e))?;

    info!(target: "serve", %address, "Starting HTTP server...");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| anyhow!("HTTP server error: {}", e))?;

    info!(target: "serve", "HTTP server stopped");
    Ok(())
}

/// Serves the application over HTTPS with TLS
#[allow(
    clippy::integer_division_remainder_used,
    reason = "tokio::select! macro triggers false positive"
)]
async fn serve_https(app: axum::Router, address: SocketAddr, tls_config: Arc<ServerConfig>) -> Result<()> {
    let tls_acceptor = TlsAcceptor::from(tls_config);

    let listener = TcpListener::bind(address)
        .await
        .map_err(|e| anyhow!("Failed to bind to {}: {}", address, e))?;

    info!(target: "serve", %address, "Starting HTTPS server (TLS enabled)...");

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            () = &mut shutdown => {
                info!(target: "serve", "Received shutdown signal, stopping HTTPS server...");
                break;
            }
            result = listener.accept() => {
                let (tcp_stream, peer_addr) = match result {
                    Ok(accepted) => accepted,
                    Err(e) => {
                        warn!(target: "serve", error = %e, "Failed to accept connection");
                        continue;
                    },
                };
                let tls_acceptor = tls_acceptor.clone();
                let app = app.clone();

                tokio::spawn(async move {
                    let tls_stream = match tls_acceptor.accept(tcp_stream).await {
                        Ok(stream) => stream,
                        Err(e) => {
                            warn!(target: "serve", peer = %peer_addr, error = %e, "TLS handshake failed");
                            return;
                        },
                    };

                    let hyper_service =
                        hyper::service::service_fn(move |mut request: hyper::Request<hyper::body::Incoming>| {
                            request.extensions_mut().insert(axum::extract::ConnectInfo(peer_addr));
                            let mut app = app.clone();
                            async move { app.call(request).await }
                        });

                    if let Err(err) = hyper_util::server::conn::auto::Builder::new(
                        hyper_util::rt::TokioExecutor::new(),
                    )
                    .serve_connection(hyper_util::rt::TokioIo::new(tls_stream), hyper_service)
                    .await
                    {
                        warn!(target: "serve", peer = %peer_addr, error = %err, "Error serving connection");
                    }
                });
            }
        }
    }

    Ok(())
}

/// Waits for shutdown signals (Ctrl+C or SIGTERM)
///
/// A signal handler that cannot be installed is logged and never fires.
#[allow(
    clippy::integer_division_remainder_used,
    reason = "tokio::select! macro triggers false positive"
)]
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(target: "serve", error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                warn!(target: "serve", error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
