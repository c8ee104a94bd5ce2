use actix_web::{HttpResponse, get, web};
use log::info;

use super::models::{AppState, ChainResponse, MineResponse, ValidateResponse};

/// Get the full blockchain.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> HttpResponse {
    let chain = state.engine.chain();
    HttpResponse::Ok().json(ChainResponse {
        length: chain.len(),
        chain,
    })
}

/// Validate the whole chain.
#[get("/validate/")]
pub async fn validate_chain(state: web::Data<AppState>) -> HttpResponse {
    let chain_len = state.engine.len();
    HttpResponse::Ok().json(ValidateResponse {
        valid: state.engine.validate(),
        length: chain_len,
        difficulty: state.engine.difficulty(),
    })
}

/// Mine a new block from the pending pool, rewarding this node.
/// The puzzle runs on the blocking pool so chain reads stay served.
#[get("/mine/")]
pub async fn mine_block(state: web::Data<AppState>) -> actix_web::Result<HttpResponse> {
    let worker = state.clone();
    let block = web::block(move || worker.engine.mine(&worker.node_id)).await?;

    info!(
        "GET /mine/ - block #{} forged for node {}",
        block.index, state.node_id
    );
    Ok(HttpResponse::Ok().json(MineResponse::from(block)))
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test, web};
    use serde_json::{Value, json};

    use crate::api::{AppState, init_routes};
    use crate::ledger::LedgerEngine;
    use crate::transaction::Transaction;

    fn state() -> web::Data<AppState> {
        web::Data::new(AppState::new(LedgerEngine::new(1), "node-A"))
    }

    #[actix_web::test]
    async fn chain_starts_with_genesis() {
        let app = test::init_service(App::new().app_data(state()).configure(init_routes)).await;
        let req = test::TestRequest::get().uri("/api/v1/chain/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["length"], 1);
        assert_eq!(body["chain"][0]["index"], 1);
        assert_eq!(body["chain"][0]["proof"], 100);
        assert_eq!(body["chain"][0]["previous_hash"], "1");
    }

    #[actix_web::test]
    async fn mine_forges_block_with_reward() {
        let data = state();
        data.engine.submit(Transaction::new("alice", "bob", 5));
        let app =
            test::init_service(App::new().app_data(data.clone()).configure(init_routes)).await;

        let req = test::TestRequest::get().uri("/api/v1/mine/").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let body: Value = test::read_body_json(resp).await;

        assert_eq!(body["message"], "New Block Forged");
        assert_eq!(body["index"], 2);
        assert_eq!(
            body["transactions"],
            json!([
                {"sender": "alice", "recipient": "bob", "amount": 5},
                {"sender": "0", "recipient": "node-A", "amount": 1},
            ])
        );
        let genesis_hash = data.engine.chain()[0].compute_hash();
        assert_eq!(body["previous_hash"], genesis_hash);
        assert!(data.engine.pending().is_empty());

        let req = test::TestRequest::get().uri("/api/v1/validate/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["valid"], true);
        assert_eq!(body["length"], 2);
        assert_eq!(body["difficulty"], 1);
    }

    #[actix_web::test]
    async fn health_reports_node_identity() {
        let app = test::init_service(App::new().app_data(state()).configure(init_routes)).await;
        let req = test::TestRequest::get().uri("/api/v1/health/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["node_id"], "node-A");
    }
}
