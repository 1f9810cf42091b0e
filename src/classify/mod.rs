pub mod response;

use crate::catalog::ErrorCatalog;
use crate::logs;
use crate::rpc::TransactionFetcher;
use crate::types::{FetchError, FetchOutcome, TransactionRecord};

/// Every way an analysis request can end. Exactly one is produced per request.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::AsRefStr,
    strum_macros::EnumCount,
)]
#[strum(serialize_all = "snake_case")]
pub enum ClassifiedResult {
    /// The signature was rejected as malformed.
    FetchFailed { detail: String },
    /// The RPC node could not be reached or answered unusably.
    FetchUnreachable { detail: String },
    /// The node has no transaction for the signature.
    NotFound,
    /// The transaction executed without error.
    Success,
    /// The transaction failed but no log line carried a custom program error.
    ErrorUnparsed { raw_logs: Vec<String> },
    /// The failing program and code are in the catalog.
    ErrorFound {
        program_id: String,
        program_name: String,
        error_code: String,
        name: String,
        message: String,
    },
    /// A custom program error was logged but the catalog does not know it.
    ErrorUnknown {
        program_id: String,
        program_name: String,
        error_code: String,
        raw_log: String,
    },
}

impl ClassifiedResult {
    /// Wire label, e.g. `"error_found"`.
    pub fn status(&self) -> &str {
        self.as_ref()
    }

    /// `true` for the outcomes that describe an existing transaction.
    pub fn is_domain_outcome(&self) -> bool {
        match self {
            Self::Success
            | Self::ErrorUnparsed { .. }
            | Self::ErrorFound { .. }
            | Self::ErrorUnknown { .. } => true,
            Self::FetchFailed { .. } | Self::FetchUnreachable { .. } | Self::NotFound => false,
        }
    }
}

pub struct Classifier;

impl Classifier {
    /// Map a fetch outcome to its [`ClassifiedResult`]. Never fails.
    pub fn classify(catalog: &ErrorCatalog, outcome: FetchOutcome) -> ClassifiedResult {
        match outcome {
            Err(FetchError::Invalid { detail }) => ClassifiedResult::FetchFailed { detail },
            Err(FetchError::Unreachable { detail }) => {
                ClassifiedResult::FetchUnreachable { detail }
            }
            Ok(None) => ClassifiedResult::NotFound,
            Ok(Some(record)) => Self::classify_record(catalog, record),
        }
    }

    /// Fetch `signature` and classify whatever came back.
    ///
    /// The fetch is the only await point; everything after it is synchronous.
    pub async fn analyze<F>(
        catalog: &ErrorCatalog,
        fetcher: &F,
        signature: &str,
    ) -> ClassifiedResult
    where
        F: TransactionFetcher,
    {
        let outcome = fetcher.fetch(signature).await;
        Self::classify(catalog, outcome)
    }

    pub fn classify_record(catalog: &ErrorCatalog, record: TransactionRecord) -> ClassifiedResult {
        if record.succeeded {
            return ClassifiedResult::Success;
        }

        let Some(found) = logs::scan(&record.log_lines) else {
            tracing::debug!(
                lines = record.log_lines.len(),
                "failed transaction has no custom program error"
            );
            return ClassifiedResult::ErrorUnparsed {
                raw_logs: record.log_lines,
            };
        };

        let program_name = catalog.display_name(&found.program_id).to_string();
        match catalog.lookup(&found.program_id, &found.error_code) {
            Some(entry) => ClassifiedResult::ErrorFound {
                program_id: found.program_id,
                program_name,
                error_code: found.error_code,
                name: entry.name.clone(),
                message: entry.message.clone(),
            },
            None => {
                tracing::debug!(
                    program_id = %found.program_id,
                    error_code = %found.error_code,
                    "custom program error missing from catalog"
                );
                ClassifiedResult::ErrorUnknown {
                    program_id: found.program_id,
                    program_name,
                    error_code: found.error_code,
                    raw_log: found.matched_line,
                }
            }
        }
    }
}
