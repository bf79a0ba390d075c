use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use uuid::Uuid;

use hotdesk_types::api::{BookingRequest, BookingResponse};
use hotdesk_types::models::{Booking, BookingStatus};

use crate::auth::AppState;
use crate::convert;
use crate::error::ApiError;
use crate::middleware::Identity;

/// POST /bookings — any authenticated user.
///
/// No overlap check is performed against existing bookings for the same space
/// and date: concurrent requests for the same slot all persist. The ledger
/// records intent; reconciliation is outside this system.
pub async fn create_booking(
    State(state): State<AppState>,
    Identity(claims): Identity,
    Json(req): Json<BookingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if !req.duration.is_finite() || req.duration <= 0.0 {
        return Err(ApiError::Validation(
            "Duration must be a positive number of hours".into(),
        ));
    }

    let booking_id = Uuid::new_v4();

    let db = state.clone();
    let space_id = req.space_id.to_string();
    let user_id = claims.sub.to_string();
    let booking_date = req.booking_date.to_string();
    let duration = req.duration;
    let space_exists = tokio::task::spawn_blocking(move || -> anyhow::Result<bool> {
        if db.db.get_space(&space_id)?.is_none() {
            return Ok(false);
        }
        db.db.insert_booking(
            &booking_id.to_string(),
            &user_id,
            &space_id,
            &booking_date,
            duration,
            BookingStatus::Pending.as_str(),
        )?;
        Ok(true)
    })
    .await??;

    if !space_exists {
        return Err(ApiError::NotFound("Space"));
    }

    Ok((
        StatusCode::CREATED,
        Json(Booking {
            id: booking_id,
            user_id: claims.sub,
            space_id: req.space_id,
            booking_date: req.booking_date,
            duration: req.duration,
            status: BookingStatus::Pending,
            created_at: chrono::Utc::now(),
        }),
    ))
}

/// GET /bookings — the caller's own bookings, each with its space embedded
/// for display. Order is unspecified.
pub async fn list_bookings(
    State(state): State<AppState>,
    Identity(claims): Identity,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    let user_id = claims.sub.to_string();
    let rows = tokio::task::spawn_blocking(move || db.db.get_bookings_for_user(&user_id)).await??;

    let bookings: Vec<BookingResponse> = rows.into_iter().map(convert::booking_from_row).collect();

    Ok(Json(bookings))
}
