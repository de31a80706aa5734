use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, create_booking, decide_booking, delete_booking, get_booking, list_bookings,
    list_owner_bookings,
};

/// Creates the API router with all booking endpoints
///
/// Command endpoints (Write operations):
/// - POST /bookings - Submit a booking request
/// - PATCH /bookings/:id?approved= - Approve or reject a booking request
/// - DELETE /bookings/:id - Delete a booking request
///
/// Query endpoints (Read operations):
/// - GET /bookings/:id - Get booking details (booker or owner only)
/// - GET /bookings?state&from&size - List bookings placed by the caller
/// - GET /bookings/owner?state&from&size - List bookings on the caller's items
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        // Command endpoints (Write operations)
        .route("/bookings", post(create_booking))
        .route("/bookings/:booking_id", patch(decide_booking))
        .route("/bookings/:booking_id", delete(delete_booking))
        // Query endpoints (Read operations)
        .route("/bookings/:booking_id", get(get_booking))
        .route("/bookings", get(list_bookings))
        .route("/bookings/owner", get(list_owner_bookings))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
