/*
 * Responsibility
 * - Config読み込み → 依存生成 → seed → Router 組み立て
 * - Middleware の適用 (cancel / http)
 * - axum::serve() で起動、shutdown 時に in-flight request を cancel
 */
use std::{panic, sync::Arc};

use anyhow::Result;
use axum::Router;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::{AppEnv, Config, ConfigError};
use crate::error::AppError;
use crate::middleware;
use crate::repos::{NewPerson, PersonRepo};
use crate::services::{
    auth::{build_authenticator, build_token_issuer},
    password::Argon2Hasher,
};
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,people_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook() {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Surface panics via tracing so they don't get "lost".
        // The panicking request task dies; the server keeps serving others.
        tracing::error!(?info, "panic");
        default_hook(info);
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    init_panic_hook();

    let config = Config::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "failed to load configuration");
    })?;

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let shutdown = CancellationToken::new();
    let state = build_state(&config)
        .inspect_err(|e| {
            tracing::error!(error = %e, "failed to load signing keys");
        })?
        .with_shutdown(shutdown.clone());
    seed(&state, &config).await?;

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

fn build_state(config: &Config) -> Result<AppState, ConfigError> {
    // Keys are loaded once here and shared read-only from then on.
    let people = PersonRepo::new();
    let auth = build_authenticator(config, people.clone())?;
    let tokens = build_token_issuer(config)?;

    Ok(AppState::new(people, auth, tokens, Arc::new(Argon2Hasher))
        .with_timings(config.simulated_work, config.request_timeout))
}

/// Seed the first person so there is an identity to authenticate as.
async fn seed(state: &AppState, config: &Config) -> Result<(), AppError> {
    let password = config
        .seed_password
        .clone()
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let credential_hash = state.hasher.hash(password).await?;

    let name = "Oguz";
    let id = state.people.save(NewPerson {
        name: name.to_string(),
        age: 15,
        credential_hash,
    });
    let token = state.tokens.issue_person_token(id, name)?;

    match config.app_env {
        AppEnv::Development => {
            tracing::info!(
                person_id = id,
                people = state.people.count(),
                %token,
                "seeded person (development token)"
            )
        }
        AppEnv::Production => {
            tracing::info!(person_id = id, people = state.people.count(), "seeded person")
        }
    }

    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let router = api::routes(&state);
    let router = middleware::cancel::apply(router, &state);
    middleware::http::apply(router.with_state(state))
}

async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
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

    tracing::info!("shutdown signal received, cancelling in-flight requests");
    shutdown.cancel();
}
