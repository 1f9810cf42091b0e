/// The parts of a confirmed Solana transaction that classification needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    /// `true` when the transaction meta carries no error.
    pub succeeded: bool,
    /// Program log lines in emission order (`meta.logMessages`).
    pub log_lines: Vec<String>,
    /// Slot the transaction landed in, when the node reports it.
    pub slot: Option<u64>,
}

/// Why a transaction could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The signature is not a well-formed transaction signature.
    #[error("invalid transaction signature: {detail}")]
    Invalid { detail: String },
    /// The node could not be reached or returned something unusable.
    #[error("failed to reach the Solana RPC node: {detail}")]
    Unreachable { detail: String },
}

/// What a [`TransactionFetcher`](crate::rpc::TransactionFetcher) produced for one signature.
///
/// `Ok(None)` means the node answered but has no such transaction: not
/// confirmed yet, pruned, or never submitted.
pub type FetchOutcome = Result<Option<TransactionRecord>, FetchError>;

/// Inbound request body of `POST /api/analyze`.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct AnalyzeRequest {
    pub signature: String,
}
