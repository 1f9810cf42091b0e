use crate::classify::ClassifiedResult;

const SUCCESS_MESSAGE: &str = "This transaction completed successfully. No errors were found.";

const UNPARSED_MESSAGE: &str = "The transaction failed, but no custom program error code was \
    found in the transaction logs. The error may be a system-level failure (e.g., insufficient \
    SOL for fees, account not found).";

const NOT_FOUND_DETAIL: &str = "Transaction not found. The signature may be invalid, the \
    transaction may not have been confirmed yet, or it may have been pruned from the RPC node's \
    history.";

/// HTTP status code the API answers with for `result`.
pub fn http_status(result: &ClassifiedResult) -> u16 {
    match result {
        ClassifiedResult::Success
        | ClassifiedResult::ErrorUnparsed { .. }
        | ClassifiedResult::ErrorFound { .. }
        | ClassifiedResult::ErrorUnknown { .. } => 200,
        ClassifiedResult::FetchFailed { .. } => 400,
        ClassifiedResult::NotFound => 404,
        ClassifiedResult::FetchUnreachable { .. } => 502,
    }
}

/// JSON body the API answers with for `result`.
///
/// Domain outcomes carry their payload fields next to `status`; fetch
/// failures and absence carry a human explanation under `detail`.
pub fn response_body(result: &ClassifiedResult) -> serde_json::Value {
    let status = result.status();
    match result {
        ClassifiedResult::Success => serde_json::json!({
            "status": status,
            "message": SUCCESS_MESSAGE,
        }),
        ClassifiedResult::ErrorUnparsed { raw_logs } => serde_json::json!({
            "status": status,
            "message": UNPARSED_MESSAGE,
            "raw_logs": raw_logs,
        }),
        ClassifiedResult::ErrorFound {
            program_id,
            program_name,
            error_code,
            name,
            message,
        } => serde_json::json!({
            "status": status,
            "program_id": program_id,
            "program_name": program_name,
            "error_code": error_code,
            "name": name,
            "message": message,
        }),
        ClassifiedResult::ErrorUnknown {
            program_id,
            program_name,
            error_code,
            raw_log,
        } => serde_json::json!({
            "status": status,
            "program_id": program_id,
            "program_name": program_name,
            "error_code": error_code,
            "message": format!(
                "The transaction failed with error code {error_code} from program \
                 {program_id}, but this code is not yet in our database."
            ),
            "raw_log": raw_log,
        }),
        ClassifiedResult::FetchFailed { detail } => serde_json::json!({
            "status": status,
            "detail": format!("Invalid transaction signature: {detail}"),
        }),
        ClassifiedResult::FetchUnreachable { detail } => serde_json::json!({
            "status": status,
            "detail": format!("Failed to reach the Solana RPC node: {detail}"),
        }),
        ClassifiedResult::NotFound => serde_json::json!({
            "status": status,
            "detail": NOT_FOUND_DETAIL,
        }),
    }
}
