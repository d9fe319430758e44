use axum::Router;

use backend_application::AppState;

use crate::handlers::{ops_handlers, person_handlers, record_handlers, transfer_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/v1/records",
            axum::routing::get(record_handlers::list_records)
                .delete(record_handlers::clear_records),
        )
        .route(
            "/v1/records/:id",
            axum::routing::get(record_handlers::get_record)
                .put(record_handlers::save_record)
                .delete(record_handlers::delete_record),
        )
        .route(
            "/v1/people",
            axum::routing::get(person_handlers::list_people).post(person_handlers::add_person),
        )
        .route(
            "/v1/people/:id",
            axum::routing::delete(person_handlers::delete_person),
        )
        .route(
            "/v1/import",
            axum::routing::post(transfer_handlers::import_records),
        )
        .route(
            "/v1/export",
            axum::routing::get(transfer_handlers::export_records),
        )
        .route(
            "/v1/ops/health/live",
            axum::routing::get(ops_handlers::health_live),
        )
        .route(
            "/v1/ops/health/ready",
            axum::routing::get(ops_handlers::health_ready),
        )
        .route(
            "/v1/ops/metrics/prometheus",
            axum::routing::get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}
