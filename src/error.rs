use thiserror::Error;

/// 数据访问错误 (合同/收款读写)
#[derive(Error, Debug)]
pub enum DataAccessError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Query timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("Data source unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum LinkerError {
    #[error(transparent)]
    DataAccess(#[from] DataAccessError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Scoring task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl From<sqlx::Error> for LinkerError {
    fn from(e: sqlx::Error) -> Self {
        LinkerError::DataAccess(DataAccessError::Database(e))
    }
}

pub type LinkerResult<T> = Result<T, LinkerError>;
