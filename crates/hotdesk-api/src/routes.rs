use axum::{
    Router,
    routing::{get, post, put},
};

use crate::auth::{self, AppState};
use crate::{bookings, spaces};

/// The full API surface. Authentication happens per handler through the
/// `Identity` extractor; admin routes additionally run the authorization
/// policy before touching the catalog.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/spaces", get(spaces::list_spaces).post(spaces::create_space))
        .route(
            "/spaces/{id}",
            put(spaces::update_space).delete(spaces::delete_space),
        )
        .route(
            "/bookings",
            post(bookings::create_booking).get(bookings::list_bookings),
        )
        .with_state(state)
}
