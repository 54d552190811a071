use std::sync::Arc;

use axum::Router;
use clientele_db::{DbPool, SqlCustomerRepository};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::{customers, customers::CustomerService, fault, health};

pub fn router(db_pool: DbPool) -> Router {
    let service = CustomerService::new(Arc::new(SqlCustomerRepository::new(db_pool.clone())));
    build(service, db_pool)
}

pub fn build(service: CustomerService, db_pool: DbPool) -> Router {
    customers::router(service)
        .merge(health::router(db_pool))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(fault::handle_panic))
}
