use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;

mod ai;
mod config;
mod controllers;
mod ingest;
mod sessions;
mod swarm;
mod tools;

use ai::OpenAIClient;
use config::Config;
use sessions::SessionStore;
use swarm::SwarmRouter;

pub struct AppState {
    pub config: Config,
    pub sessions: SessionStore,
    pub router: SwarmRouter,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let port = config.port;

    log::info!(
        "Initializing OpenAI client (model {}, endpoint {})",
        config.openai_model,
        config.openai_endpoint
    );
    let client = OpenAIClient::new(
        &config.openai_api_key,
        &config.openai_endpoint,
        &config.openai_model,
        None,
    )
    .expect("Failed to create OpenAI client");

    let router = SwarmRouter::new(Arc::new(client));
    let state = web::Data::new(AppState {
        config,
        sessions: SessionStore::new(),
        router,
    });

    log::info!("Starting article explainer backend on port {}", port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .app_data(state.clone())
            .configure(controllers::health::config)
            .configure(controllers::documents::config)
            .configure(controllers::chat::config)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
