use std::future::Future;
use std::time::Duration;

use crate::error::Error;
use crate::rpc::{TransactionFetcher, decode_get_transaction, validate_signature};
use crate::types::{FetchError, FetchOutcome};

/// [`TransactionFetcher`] backed by a Solana JSON-RPC node.
#[derive(Debug, Clone)]
pub struct RpcFetcher {
    client: reqwest::Client,
    url: reqwest::Url,
}

impl RpcFetcher {
    /// The URL may carry provider credentials in its query string; it is never
    /// echoed back in errors or logs.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, Error> {
        let url = reqwest::Url::parse(url).map_err(|e| Error::Config {
            reason: format!("SOLANA_RPC_URL is not a valid URL: {e}"),
        })?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config {
                reason: format!("failed to build RPC client: {e}"),
            })?;
        Ok(Self { client, url })
    }

    /// Host part of the RPC URL, safe to log.
    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or("<no host>")
    }

    async fn get_transaction(&self, signature: &str) -> FetchOutcome {
        validate_signature(signature)?;

        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getTransaction",
            "params": [
                signature,
                {
                    "encoding": "json",
                    "maxSupportedTransactionVersion": 0,
                    "commitment": "confirmed",
                }
            ],
        });

        let response = self
            .client
            .post(self.url.clone())
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Unreachable {
                detail: format!("RPC node answered HTTP {status}"),
            });
        }

        let payload: serde_json::Value = response.json().await.map_err(transport_error)?;
        decode_get_transaction(&payload)
    }
}

impl TransactionFetcher for RpcFetcher {
    fn fetch(&self, signature: &str) -> impl Future<Output = FetchOutcome> + Send {
        let signature = signature.trim().to_string();
        async move {
            let outcome = self.get_transaction(&signature).await;
            match &outcome {
                Ok(Some(record)) => tracing::debug!(
                    signature = %signature,
                    slot = ?record.slot,
                    succeeded = record.succeeded,
                    "transaction fetched"
                ),
                Ok(None) => tracing::debug!(signature = %signature, "transaction not found"),
                Err(e) => tracing::warn!(signature = %signature, error = %e, "fetch failed"),
            }
            outcome
        }
    }
}

/// reqwest's `Display` includes the request URL, which can hold an API key.
fn transport_error(e: reqwest::Error) -> FetchError {
    let e = e.without_url();
    let detail = if e.is_timeout() {
        format!("request timed out: {e}")
    } else if e.is_decode() {
        format!("undecodable RPC response: {e}")
    } else {
        e.to_string()
    };
    FetchError::Unreachable { detail }
}
