use actix_web::{HttpResponse, get, post, web};
use log::{debug, warn};
use serde_json::{Map, Value};

use super::models::{AppState, MempoolResponse, NewTxResponse};
use crate::blockchain::REWARD_SENDER;
use crate::error::ValidationError;
use crate::transaction::Transaction;

/// Submit a new transaction into the pending pool.
#[post("/transactions/new/")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ValidationError> {
    let tx = parse_transaction(&body).inspect_err(|e| {
        warn!("POST /transactions/new/ - rejected: {e}");
    })?;
    debug!(
        "POST /transactions/new/ - {} -> {} ({})",
        tx.sender, tx.recipient, tx.amount
    );

    let index = state.engine.submit(tx);
    Ok(HttpResponse::Ok().json(NewTxResponse {
        message: format!("Transaction will be added to Block {index}"),
        index,
    }))
}

/// List the transactions waiting for the next block.
#[get("/mempool/")]
pub async fn get_mempool(state: web::Data<AppState>) -> HttpResponse {
    let transactions = state.engine.pending();
    HttpResponse::Ok().json(MempoolResponse {
        size: transactions.len(),
        transactions,
    })
}

/// Strict schema check: a JSON object with string `sender`/`recipient` and
/// a non-negative integer `amount`. Extra keys are ignored. The reward
/// sender is reserved for mining.
fn parse_transaction(body: &[u8]) -> Result<Transaction, ValidationError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| ValidationError::Unparsable(e.to_string()))?;
    let Value::Object(fields) = value else {
        return Err(ValidationError::NotAnObject);
    };

    let sender = string_field(&fields, "sender")?;
    if sender == REWARD_SENDER {
        return Err(ValidationError::ReservedSender);
    }
    let recipient = string_field(&fields, "recipient")?;
    let amount = required(&fields, "amount")?
        .as_u64()
        .ok_or(ValidationError::InvalidField {
            field: "amount",
            expected: "a non-negative integer",
        })?;

    Ok(Transaction::new(sender, recipient, amount))
}

fn required<'a>(
    fields: &'a Map<String, Value>,
    name: &'static str,
) -> Result<&'a Value, ValidationError> {
    match fields.get(name) {
        None | Some(Value::Null) => Err(ValidationError::MissingField(name)),
        Some(v) => Ok(v),
    }
}

fn string_field(fields: &Map<String, Value>, name: &'static str) -> Result<String, ValidationError> {
    required(fields, name)?
        .as_str()
        .map(str::to_owned)
        .ok_or(ValidationError::InvalidField {
            field: name,
            expected: "a string",
        })
}
