use wasm_bindgen::prelude::*;

use crate::catalog::ErrorCatalog;
use crate::classify::Classifier;
use crate::classify::response::{http_status, response_body};
use crate::logs;
use crate::types::TransactionRecord;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = JSON)]
    fn parse(s: &str) -> JsValue;
}

fn to_js(value: &serde_json::Value) -> JsValue {
    match serde_json::to_string(value) {
        Ok(json_str) => parse(&json_str),
        Err(_) => JsValue::NULL,
    }
}

fn log_lines_from_js(logs: JsValue) -> Result<Vec<String>, JsValue> {
    serde_wasm_bindgen::from_value(logs)
        .map_err(|_| error_result("Expected an array of log line strings"))
}

/// First custom program error in a log array, or null.
#[wasm_bindgen]
pub fn scan_logs(logs: JsValue) -> JsValue {
    let lines = match log_lines_from_js(logs) {
        Ok(lines) => lines,
        Err(e) => return e,
    };
    match logs::scan(&lines) {
        Some(m) => to_js(&serde_json::json!({
            "programId": m.program_id,
            "errorCode": m.error_code,
            "matchedLine": m.matched_line,
        })),
        None => JsValue::NULL,
    }
}

/// Error catalog held on the JS side so it is parsed once.
#[wasm_bindgen]
pub struct Catalog {
    inner: ErrorCatalog,
}

#[wasm_bindgen]
impl Catalog {
    #[wasm_bindgen(constructor)]
    pub fn new(json: &str) -> Result<Catalog, JsError> {
        let inner = ErrorCatalog::from_json_str(json).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self { inner })
    }

    #[wasm_bindgen(js_name = displayName)]
    pub fn display_name(&self, program_id: &str) -> String {
        self.inner.display_name(program_id).to_string()
    }

    /// `{name, message}` for a known code, or null.
    pub fn lookup(&self, program_id: &str, error_code: &str) -> JsValue {
        match self.inner.lookup(program_id, error_code) {
            Some(entry) => to_js(&serde_json::json!({
                "name": entry.name,
                "message": entry.message,
            })),
            None => JsValue::NULL,
        }
    }

    /// Classify a transaction the caller already fetched. Returns the API
    /// response body with its HTTP status under `httpStatus`.
    pub fn classify(&self, succeeded: bool, logs: JsValue) -> JsValue {
        let log_lines = match log_lines_from_js(logs) {
            Ok(lines) => lines,
            Err(e) => return e,
        };
        let record = TransactionRecord {
            succeeded,
            log_lines,
            slot: None,
        };
        let result = Classifier::classify_record(&self.inner, record);
        let mut body = response_body(&result);
        if let Some(obj) = body.as_object_mut() {
            obj.insert("httpStatus".into(), http_status(&result).into());
        }
        to_js(&body)
    }
}

fn error_result(msg: &str) -> JsValue {
    let obj = serde_json::json!({"error": msg});
    to_js(&obj)
}
