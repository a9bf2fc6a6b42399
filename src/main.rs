use crate::config::AppConfig;
use crate::resolver::ListingResolver;
use crate::responses::html_error_response;
use crate::router::{handle, AppState};
use astra::Server;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod domain;
mod errors;
mod resolver;
mod responses;
mod router;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,listing_board=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 1️⃣ Load configuration
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    if config.service.is_none() {
        tracing::warn!("SUPABASE_URL / SUPABASE_ANON_KEY not set, serving bundled sample listings only");
    }

    // 2️⃣ Build the listing resolver
    let resolver = match ListingResolver::new(config.service.clone(), config.http_timeout) {
        Ok(resolver) => resolver,
        Err(e) => {
            tracing::error!(error = %e, "failed to initialise listing resolver");
            std::process::exit(1);
        }
    };
    let state = Arc::new(AppState { resolver });

    // 3️⃣ Start the server
    let addr = config.bind_addr;
    tracing::info!(%addr, configured = state.resolver.is_configured(), "starting server");

    let server = Server::bind(&addr).max_workers(8);

    // 4️⃣ Serve requests, sharing the resolver across workers
    let result = server.serve(move |req, _info| match handle(req, &state) {
        Ok(resp) => resp,
        Err(err) => {
            tracing::warn!(error = %err, "request failed");
            html_error_response(err)
        }
    });

    if let Err(e) = result {
        tracing::error!(error = %e, "server ended with error");
    }

    tracing::info!("server shut down cleanly");
}
