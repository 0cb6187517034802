// src/response.rs

use axum::Json;
use serde::Serialize;
use serde_json::{Value, json};

/// Success envelope `{code, msg, data}` shared by every endpoint.
pub fn ok<T: Serialize>(msg: &str, data: T) -> Json<Value> {
    Json(json!({
        "code": 200,
        "msg": msg,
        "data": data,
    }))
}

/// Success envelope without a data payload.
pub fn ok_msg(msg: &str) -> Json<Value> {
    Json(json!({
        "code": 200,
        "msg": msg,
        "data": null,
    }))
}
