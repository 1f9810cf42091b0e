#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::dbg_macro,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::panic,
    )
)]

pub mod catalog;
pub mod classify;
pub mod error;
pub mod logs;
pub mod rpc;
pub mod types;

#[cfg(feature = "server")]
pub mod config;
#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use catalog::{ErrorCatalog, ErrorEntry, ProgramEntry};
pub use classify::response::{http_status, response_body};
pub use classify::{ClassifiedResult, Classifier};
pub use error::Error;
pub use logs::{LogMatch, parse_line, scan};
pub use rpc::{TransactionFetcher, decode_get_transaction};
pub use types::{AnalyzeRequest, FetchError, FetchOutcome, TransactionRecord};
