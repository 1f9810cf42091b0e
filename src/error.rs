#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("catalog error: {reason}")]
    Catalog { reason: String },

    #[error("config error: {reason}")]
    Config { reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
