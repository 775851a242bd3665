pub mod export;
pub mod memory;
pub mod pg_store;
pub mod pool;
pub mod queries;
pub mod source;

pub use export::export_outcomes_csv;
pub use memory::MemoryStore;
pub use pg_store::PgStore;
pub use pool::create_pool;
pub use source::{ContractSource, PaymentStore};
