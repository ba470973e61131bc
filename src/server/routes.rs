use axum::{
    routing::{delete, get},
    Router,
};

use crate::server::{handlers, AppState};

pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/expenses/{user_id}",
            get(handlers::list_expenses).post(handlers::add_expense),
        )
        .route(
            "/expenses/{user_id}/{expense_id}",
            delete(handlers::delete_expense),
        )
        .route(
            "/salary/{user_id}",
            get(handlers::get_salary).post(handlers::update_salary),
        )
        .route(
            "/savings/{user_id}",
            get(handlers::get_savings).post(handlers::update_savings),
        )
}
