use crate::handlers;
use crate::state::AppState;
use axum::{routing::{delete, get, post, put}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/tasks/add", post(handlers::add_task_form))
        .route("/api/today", get(handlers::get_today))
        .route("/api/list", get(handlers::get_list))
        .route("/api/dates", get(handlers::get_dates))
        .route("/api/select", post(handlers::select_date))
        .route("/api/tasks", post(handlers::add_task))
        .route("/api/tasks/:id", delete(handlers::delete_task))
        .route("/api/tasks/:id/toggle", post(handlers::toggle_task))
        .route("/api/tasks/:id/move", post(handlers::move_task))
        .route("/api/order", put(handlers::reorder))
        .with_state(state)
}
