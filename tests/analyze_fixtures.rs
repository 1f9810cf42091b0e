#![expect(
    clippy::unwrap_used,
    clippy::panic,
    reason = "test code uses unwrap/panic for concise assertions"
)]

use solana_error_translator::{
    ClassifiedResult, Classifier, ErrorCatalog, FetchError, decode_get_transaction, http_status,
    response_body,
};

const JUPITER_V6: &str = "JUP6LkbZbjS1jKKwapdHNy74zcZ3tLUZoi5QNyVTaV4";
const TOKEN_PROGRAM: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";
const WHIRLPOOL: &str = "whirLbMiicVdio4qvUfM5KAg6Ct8VwpYzGff3uctyCc";

#[derive(serde::Deserialize)]
struct Fixture {
    name: String,
    response: serde_json::Value,
}

fn shipped_catalog() -> ErrorCatalog {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let path = format!("{manifest_dir}/errors.json");
    ErrorCatalog::load(&path).unwrap_or_else(|e| panic!("failed to load {path}: {e}"))
}

fn load_fixtures() -> Vec<Fixture> {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let path = format!("{manifest_dir}/tests/fixtures/get_transaction_responses.json");
    let data =
        std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {path}: {e}"));
    serde_json::from_str(&data).unwrap_or_else(|e| panic!("failed to parse {path}: {e}"))
}

fn classify_fixture(name: &str) -> ClassifiedResult {
    let fixtures = load_fixtures();
    let fixture = fixtures
        .iter()
        .find(|f| f.name == name)
        .unwrap_or_else(|| panic!("missing fixture {name}"));
    Classifier::classify(&shipped_catalog(), decode_get_transaction(&fixture.response))
}

#[test]
fn shipped_catalog_loads() {
    let catalog = shipped_catalog();
    assert_eq!(catalog.program_count(), 5);
    assert_eq!(catalog.display_name(TOKEN_PROGRAM), "SPL Token");
    assert_eq!(
        catalog.lookup(TOKEN_PROGRAM, "0x1").unwrap().name,
        "InsufficientFunds"
    );
    assert_eq!(
        catalog.lookup(JUPITER_V6, "0x1771").unwrap().name,
        "SlippageToleranceExceeded"
    );
}

#[test]
fn jupiter_slippage_is_error_found() {
    let result = classify_fixture("jupiter_slippage");
    let ClassifiedResult::ErrorFound {
        program_id,
        program_name,
        error_code,
        name,
        message,
    } = &result
    else {
        panic!("expected ErrorFound, got {result:?}");
    };
    assert_eq!(program_id, JUPITER_V6);
    assert_eq!(program_name, "Jupiter Aggregator v6");
    assert_eq!(error_code, "0x1771");
    assert_eq!(name, "SlippageToleranceExceeded");
    assert_eq!(message, "Slippage tolerance exceeded");
    assert_eq!(http_status(&result), 200);
}

#[test]
fn first_failure_line_wins_even_when_it_is_an_inner_instruction() {
    let result = classify_fixture("token_insufficient_funds_in_cpi");
    let ClassifiedResult::ErrorFound {
        program_id, name, ..
    } = &result
    else {
        panic!("expected ErrorFound, got {result:?}");
    };
    assert_eq!(program_id, TOKEN_PROGRAM);
    assert_eq!(name, "InsufficientFunds");
}

#[test]
fn unknown_program_code_is_error_unknown() {
    let result = classify_fixture("unknown_program_code");
    assert_eq!(
        result,
        ClassifiedResult::ErrorUnknown {
            program_id: WHIRLPOOL.to_string(),
            program_name: WHIRLPOOL.to_string(),
            error_code: "0x1784".to_string(),
            raw_log: format!("Program {WHIRLPOOL} failed: custom program error: 0x1784"),
        }
    );
    let body = response_body(&result);
    assert_eq!(body["status"], "error_unknown");
    assert_eq!(body["program_name"], WHIRLPOOL);
}

#[test]
fn system_level_failure_is_error_unparsed_with_all_logs() {
    let result = classify_fixture("insufficient_fee_balance");
    let ClassifiedResult::ErrorUnparsed { raw_logs } = &result else {
        panic!("expected ErrorUnparsed, got {result:?}");
    };
    assert_eq!(raw_logs.len(), 2);
    assert_eq!(response_body(&result)["raw_logs"].as_array().unwrap().len(), 2);
}

#[test]
fn successful_transaction_is_success() {
    let result = classify_fixture("successful_transfer");
    assert_eq!(result, ClassifiedResult::Success);
    assert_eq!(response_body(&result)["status"], "success");
}

#[test]
fn null_result_is_not_found() {
    let result = classify_fixture("not_found");
    assert_eq!(result, ClassifiedResult::NotFound);
    assert_eq!(http_status(&result), 404);
}

#[test]
fn rpc_errors_map_to_fetch_states() {
    let invalid = classify_fixture("invalid_signature");
    assert!(matches!(invalid, ClassifiedResult::FetchFailed { .. }));
    assert_eq!(http_status(&invalid), 400);

    let unhealthy = classify_fixture("node_behind");
    assert_eq!(
        unhealthy,
        ClassifiedResult::FetchUnreachable {
            detail: "RPC error -32005: Node is unhealthy".to_string()
        }
    );
    assert_eq!(http_status(&unhealthy), 502);
}

#[test]
fn every_fixture_classifies_deterministically() {
    let catalog = shipped_catalog();
    for fixture in load_fixtures() {
        let first = Classifier::classify(&catalog, decode_get_transaction(&fixture.response));
        let second = Classifier::classify(&catalog, decode_get_transaction(&fixture.response));
        assert_eq!(first, second, "fixture {} is not deterministic", fixture.name);
    }
}

#[test]
fn fetch_error_variants_cover_both_failure_states() {
    let catalog = shipped_catalog();
    let cases = [
        (
            FetchError::Invalid {
                detail: "x".to_string(),
            },
            "fetch_failed",
        ),
        (
            FetchError::Unreachable {
                detail: "x".to_string(),
            },
            "fetch_unreachable",
        ),
    ];
    for (err, status) in cases {
        assert_eq!(Classifier::classify(&catalog, Err(err)).status(), status);
    }
}
