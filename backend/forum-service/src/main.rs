use actix_web::{web, App, HttpResponse, HttpServer};
use anyhow::Context;
use chrono::Utc;
use forum_service::db::{create_pool, ping, run_migrations};
use forum_service::enrichment::IdentityGateway;
use forum_service::{Config, ForumServices};
use identity_client::HttpIdentityClient;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn health_summary(pool: web::Data<PgPool>) -> HttpResponse {
    match ping(pool.get_ref()).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "forum-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "forum-service"
        })),
    }
}

async fn readiness_summary(pool: web::Data<PgPool>) -> HttpResponse {
    let start = Instant::now();
    let result = ping(pool.get_ref()).await;
    let latency_ms = start.elapsed().as_millis() as u64;

    let (ready, message) = match result {
        Ok(()) => (true, "PostgreSQL connection successful".to_string()),
        Err(e) => (false, format!("PostgreSQL connection failed: {}", e)),
    };

    let body = serde_json::json!({
        "ready": ready,
        "checks": {
            "postgresql": {
                "status": if ready { "healthy" } else { "unhealthy" },
                "message": message,
                "latency_ms": latency_ms,
            }
        },
        "timestamp": Utc::now().to_rfc3339(),
    });

    if ready {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}

async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = terminate.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable, waiting for Ctrl+C");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,sqlx=warn".into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Forum Service
///
/// Posts, comments and reports with identity enrichment. The binary owns
/// the process lifecycle: configuration, the database pool, the identity
/// client and the operational HTTP endpoints.
///
/// # Routes
///
/// - `/api/v1/health` - Database-backed health summary
/// - `/api/v1/health/ready` - Readiness probe
/// - `/api/v1/health/live` - Liveness probe
/// - `/metrics` - Prometheus metrics
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()
        .map_err(anyhow::Error::msg)
        .context("Failed to load configuration")?;

    init_tracing(config.app.json_logs);

    tracing::info!("Starting forum-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);
    tracing::debug!(database = ?config.database, "Database configuration");

    let pool = create_pool(&config.database)
        .await
        .context("Failed to create database pool")?;

    if config.database.run_migrations {
        run_migrations(&pool)
            .await
            .context("Failed to apply database schema")?;
    }

    let identity = HttpIdentityClient::new(&config.identity)
        .context("Failed to build identity client")?;
    tracing::info!(
        endpoint = identity.endpoint(),
        timeout_ms = config.identity.request_timeout_ms,
        "Identity client initialized"
    );
    let gateway = IdentityGateway::new(Arc::new(identity), config.identity.request_timeout());

    let services = web::Data::new(ForumServices::new(pool.clone(), gateway));
    let pool_data = web::Data::new(pool);

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(pool_data.clone())
            .app_data(services.clone())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/metrics", web::get().to(forum_service::metrics::serve_metrics))
            .route("/api/v1/health", web::get().to(health_summary))
            .route("/api/v1/health/ready", web::get().to(readiness_summary))
            .route("/api/v1/health/live", web::get().to(liveness_check))
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .disable_signals()
    .run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    shutdown_signal().await;
    tracing::info!("Shutdown signal received");
    server_handle.stop(true).await;

    match server_task.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!(error = %e, "HTTP server exited with error"),
        Err(e) => tracing::error!(error = %e, "HTTP server task failed"),
    }

    tracing::info!("forum-service stopped");
    Ok(())
}
