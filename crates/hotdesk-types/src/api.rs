use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Booking, Role, User};

// -- JWT Claims --

/// Identity-token claims shared by token issuance (auth handlers) and
/// verification (middleware). Canonical definition lives here in
/// hotdesk-types to eliminate duplication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: Role,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

// -- Spaces --

/// Full space payload, used for both create and update (updates replace the
/// whole record, matching the admin form that always submits every field).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SpaceInput {
    pub name: String,
    pub location: String,
    pub price: f64,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default = "default_true")]
    pub availability: bool,
}

fn default_true() -> bool {
    true
}

// -- Bookings --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BookingRequest {
    pub space_id: Uuid,
    pub booking_date: NaiveDate,
    pub duration: f64,
}

/// The subset of Space fields embedded in booking listings for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceSummary {
    pub name: String,
    pub location: String,
    pub price: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    #[serde(flatten)]
    pub booking: Booking,
    /// None when the referenced space was deleted after booking — deletes do
    /// not cascade and the ledger keeps the dangling row.
    pub space: Option<SpaceSummary>,
}

// -- Errors --

/// Uniform failure body: `{"message": "...", "error": "detail"?}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
