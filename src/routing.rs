//! Application router configuration.

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::{
    AppState,
    diaria::{
        begin_edit_endpoint, cancel_edit_endpoint, clear_filters_endpoint, delete_diaria_endpoint,
        get_diarias_page, insert_diaria_endpoint, load_diarias_endpoint, save_edit_endpoint,
        set_filters_endpoint,
    },
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_diarias_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .route(
            endpoints::DIARIAS_API,
            get(load_diarias_endpoint).post(insert_diaria_endpoint),
        )
        .route(
            endpoints::DIARIA,
            put(save_edit_endpoint).delete(delete_diaria_endpoint),
        )
        .route(endpoints::EDIT_DIARIA, get(begin_edit_endpoint))
        .route(endpoints::CANCEL_EDIT, post(cancel_edit_endpoint))
        .route(
            endpoints::FILTERS_API,
            post(set_filters_endpoint).delete(clear_filters_endpoint),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}
