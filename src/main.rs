mod api;
mod blockchain;
mod config;
mod error;
mod ledger;
mod transaction;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::info;
use uuid::Uuid;

use api::AppState;
use config::Settings;
use ledger::LedgerEngine;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let settings = Settings::from_env();
    // Globally unique address for this node, used as the mining reward recipient.
    let node_id = settings
        .node_id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().simple().to_string());

    info!(
        "⛓️ Starting ledger node {} at http://{}:{} (difficulty={})",
        node_id, settings.host, settings.port, settings.difficulty
    );

    let state = web::Data::new(AppState::new(
        LedgerEngine::new(settings.difficulty),
        node_id,
    ));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await
}
