pub mod history;
pub mod linker;
pub mod ranker;
pub mod reconcile;
pub mod scorer;

pub use history::DecisionHistory;
pub use linker::SmartPaymentLinker;
pub use reconcile::{ReconcileReport, ReconcileRow};
pub use scorer::{match_reasons, score};
