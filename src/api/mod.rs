pub mod handlers;

pub use handlers::*;

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;

use crate::db::{ContractSource, PaymentStore};
use crate::service::SmartPaymentLinker;

/// 构建路由
pub fn router<S>(linker: Arc<SmartPaymentLinker<S>>) -> Router
where
    S: ContractSource + PaymentStore + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/api/link/contract", post(find_best_contract::<S>))
        .route("/api/link/batch", post(batch_link::<S>))
        .route("/api/link/history", delete(clear_history::<S>))
        .route("/api/link/history/:payment_id", get(linking_history::<S>))
        .route("/api/reconcile", post(reconcile::<S>))
        .layer(ServiceBuilder::new())
        .with_state(linker)
}
