pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod service;

pub use config::AppConfig;
pub use db::{create_pool, MemoryStore, PgStore};
pub use error::{DataAccessError, LinkerError, LinkerResult};
pub use service::SmartPaymentLinker;
