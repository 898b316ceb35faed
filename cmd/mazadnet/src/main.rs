//! # MAZADNET server
//!
//! Loads settings, seeds the in-memory stores, wires the services and
//! serves the JSON API until Ctrl-C.

use anyhow::Context;
use api_adapters::{build_router, AppState};
use configs::{LogConfig, Settings};
use services::{FeedPolicy, Repositories, ServiceConfig, Services};
use storage_adapters::MemoryStores;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load configuration")?;
    init_tracing(&settings.log);

    let services = Services::new(repositories(MemoryStores::seeded()), service_config(&settings));
    let state = AppState::new(services, settings.site.default_actor.as_str().into());
    let app = build_router(state);

    let addr = settings.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, site_admin = %settings.site.admin_user_id, "MAZADNET listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    tracing::info!("shut down cleanly");
    Ok(())
}

fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn repositories(stores: MemoryStores) -> Repositories {
    Repositories {
        posts: stores.posts,
        users: stores.users,
        conversations: stores.conversations,
        notifications: stores.notifications,
        supervisors: stores.supervisors,
        site: stores.site,
    }
}

fn service_config(settings: &Settings) -> ServiceConfig {
    let feed = &settings.feed;
    ServiceConfig {
        admin_user_id: settings.site.admin_user_id.as_str().into(),
        feed: FeedPolicy {
            auction_category: feed.auction_category.clone(),
            home_category: feed.home_category.clone(),
            max_post_length: feed.max_post_length,
            strict_reply_parent: feed.strict_reply_parent,
            cascade_reply_deletes: feed.cascade_reply_deletes,
        },
        timestamp_format: settings.messaging.timestamp_format.clone(),
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

