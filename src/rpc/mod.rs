#[cfg(feature = "native")]
pub mod client;

use std::future::Future;

use crate::types::{FetchError, FetchOutcome, TransactionRecord};

/// JSON-RPC "invalid params", which nodes return for unparseable signatures.
pub const RPC_INVALID_PARAMS: i64 = -32602;

/// Length in bytes of an ed25519 transaction signature.
pub const SIGNATURE_LEN: usize = 64;

/// Source of transaction records for a signature.
///
/// Implementations own timeouts and transport concerns; callers never retry.
pub trait TransactionFetcher: Send + Sync {
    fn fetch(&self, signature: &str) -> impl Future<Output = FetchOutcome> + Send;
}

/// Reject anything that is not a base58 string decoding to 64 bytes.
#[cfg(feature = "native")]
pub fn validate_signature(signature: &str) -> Result<(), FetchError> {
    if signature.is_empty() {
        return Err(FetchError::Invalid {
            detail: "signature is empty".into(),
        });
    }
    let bytes = bs58::decode(signature)
        .into_vec()
        .map_err(|e| FetchError::Invalid {
            detail: format!("not valid base58: {e}"),
        })?;
    if bytes.len() != SIGNATURE_LEN {
        return Err(FetchError::Invalid {
            detail: format!(
                "decoded to {} bytes, expected {SIGNATURE_LEN}",
                bytes.len()
            ),
        });
    }
    Ok(())
}

/// Interpret a `getTransaction` JSON-RPC response body.
pub fn decode_get_transaction(payload: &serde_json::Value) -> FetchOutcome {
    if let Some(err) = payload.get("error").filter(|e| !e.is_null()) {
        let code = err.get("code").and_then(|v| v.as_i64());
        let message = err
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown RPC error");
        return Err(match code {
            Some(RPC_INVALID_PARAMS) => FetchError::Invalid {
                detail: message.to_string(),
            },
            Some(code) => FetchError::Unreachable {
                detail: format!("RPC error {code}: {message}"),
            },
            None => FetchError::Unreachable {
                detail: format!("RPC error: {message}"),
            },
        });
    }

    let result = payload.get("result").ok_or_else(|| FetchError::Unreachable {
        detail: "RPC response has neither result nor error".into(),
    })?;
    if result.is_null() {
        return Ok(None);
    }

    let meta = result
        .get("meta")
        .filter(|m| !m.is_null())
        .ok_or_else(|| FetchError::Unreachable {
            detail: "transaction has no status meta".into(),
        })?;

    let succeeded = meta.get("err").is_none_or(serde_json::Value::is_null);
    let log_lines = meta
        .get("logMessages")
        .and_then(|v| v.as_array())
        .map(|lines| {
            lines
                .iter()
                .filter_map(|l| l.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default();
    let slot = result.get("slot").and_then(|v| v.as_u64());

    Ok(Some(TransactionRecord {
        succeeded,
        log_lines,
        slot,
    }))
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use super::decode_get_transaction;
    use crate::types::{FetchError, TransactionRecord};

    #[test]
    fn null_result_is_absent() {
        let payload = serde_json::json!({ "jsonrpc": "2.0", "id": 1, "result": null });
        assert_eq!(decode_get_transaction(&payload), Ok(None));
    }

    #[test]
    fn successful_transaction_decodes() {
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {
                "slot": 250_000_000_u64,
                "meta": {
                    "err": null,
                    "logMessages": ["Program 11111111111111111111111111111111 invoke [1]",
                                    "Program 11111111111111111111111111111111 success"]
                }
            }
        });
        let record = decode_get_transaction(&payload).unwrap().unwrap();
        assert!(record.succeeded);
        assert_eq!(record.log_lines.len(), 2);
        assert_eq!(record.slot, Some(250_000_000));
    }

    #[test]
    fn failed_transaction_decodes_logs_in_order() {
        let payload = serde_json::json!({
            "result": {
                "slot": 7,
                "meta": {
                    "err": { "InstructionError": [0, { "Custom": 1 }] },
                    "logMessages": ["first", "second", "third"]
                }
            }
        });
        assert_eq!(
            decode_get_transaction(&payload),
            Ok(Some(TransactionRecord {
                succeeded: false,
                log_lines: vec![
                    "first".to_string(),
                    "second".to_string(),
                    "third".to_string()
                ],
                slot: Some(7),
            }))
        );
    }

    #[test]
    fn missing_log_messages_become_empty() {
        let payload = serde_json::json!({
            "result": { "meta": { "err": "AccountNotFound", "logMessages": null } }
        });
        let record = decode_get_transaction(&payload).unwrap().unwrap();
        assert!(!record.succeeded);
        assert!(record.log_lines.is_empty());
        assert_eq!(record.slot, None);
    }

    #[test]
    fn invalid_params_error_is_invalid_input() {
        let payload = serde_json::json!({
            "error": { "code": -32602, "message": "Invalid param: Invalid" }
        });
        assert_eq!(
            decode_get_transaction(&payload),
            Err(FetchError::Invalid {
                detail: "Invalid param: Invalid".to_string()
            })
        );
    }

    #[test]
    fn other_rpc_errors_are_unreachable() {
        let payload = serde_json::json!({
            "error": { "code": -32005, "message": "Node is behind by 42 slots" }
        });
        assert_eq!(
            decode_get_transaction(&payload),
            Err(FetchError::Unreachable {
                detail: "RPC error -32005: Node is behind by 42 slots".to_string()
            })
        );
    }

    #[test]
    fn malformed_envelopes_are_unreachable() {
        assert!(matches!(
            decode_get_transaction(&serde_json::json!({ "jsonrpc": "2.0" })),
            Err(FetchError::Unreachable { .. })
        ));
        assert!(matches!(
            decode_get_transaction(&serde_json::json!({ "result": { "slot": 1 } })),
            Err(FetchError::Unreachable { .. })
        ));
        assert!(matches!(
            decode_get_transaction(&serde_json::json!({ "result": { "meta": null } })),
            Err(FetchError::Unreachable { .. })
        ));
    }

    #[cfg(feature = "native")]
    #[test]
    fn signature_format_is_checked() {
        use super::validate_signature;

        let valid = bs58::encode([7_u8; 64]).into_string();
        assert!(validate_signature(&valid).is_ok());

        let short = bs58::encode([7_u8; 32]).into_string();
        assert!(matches!(
            validate_signature(&short),
            Err(FetchError::Invalid { .. })
        ));
        assert!(matches!(
            validate_signature("0OIl not base58"),
            Err(FetchError::Invalid { .. })
        ));
        assert!(matches!(
            validate_signature(""),
            Err(FetchError::Invalid { .. })
        ));
    }
}
