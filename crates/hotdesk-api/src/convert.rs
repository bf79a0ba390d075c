//! Row → API model conversion. Rows come back from SQLite as plain text;
//! corrupt fields are logged and replaced with defaults rather than failing
//! the whole listing.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::warn;
use uuid::Uuid;

use hotdesk_db::models::{BookingRow, SpaceRow, UserRow};
use hotdesk_types::api::{BookingResponse, SpaceSummary};
use hotdesk_types::models::{Booking, BookingStatus, Role, Space, User};

pub(crate) fn parse_uuid(value: &str, field: &str) -> Uuid {
    value.parse().unwrap_or_else(|e| {
        warn!("Corrupt {} '{}': {}", field, value, e);
        Uuid::default()
    })
}

pub(crate) fn parse_timestamp(value: &str, field: &str) -> DateTime<Utc> {
    value
        .parse::<DateTime<Utc>>()
        .or_else(|_| {
            // SQLite stores timestamps as "YYYY-MM-DD HH:MM:SS" without
            // timezone. Parse as naive UTC and convert.
            chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
                .map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!("Corrupt {} '{}': {}", field, value, e);
            DateTime::default()
        })
}

pub(crate) fn user_from_row(row: UserRow) -> User {
    User {
        id: parse_uuid(&row.id, "user id"),
        role: row.role.parse().unwrap_or_else(|e| {
            warn!("Corrupt role on user '{}': {}", row.id, e);
            Role::User
        }),
        created_at: parse_timestamp(&row.created_at, "created_at"),
        name: row.name,
        email: row.email,
    }
}

pub(crate) fn space_from_row(row: SpaceRow) -> Space {
    Space {
        id: parse_uuid(&row.id, "space id"),
        amenities: serde_json::from_str(&row.amenities).unwrap_or_else(|e| {
            warn!("Corrupt amenities on space '{}': {}", row.id, e);
            Vec::new()
        }),
        created_at: parse_timestamp(&row.created_at, "created_at"),
        name: row.name,
        location: row.location,
        price: row.price,
        availability: row.availability,
    }
}

pub(crate) fn booking_from_row(row: BookingRow) -> BookingResponse {
    let space = match (row.space_name, row.space_location, row.space_price) {
        (Some(name), Some(location), Some(price)) => Some(SpaceSummary {
            name,
            location,
            price,
        }),
        // Dangling reference: the space was deleted after booking
        _ => None,
    };

    BookingResponse {
        booking: Booking {
            id: parse_uuid(&row.id, "booking id"),
            user_id: parse_uuid(&row.user_id, "user_id"),
            space_id: parse_uuid(&row.space_id, "space_id"),
            booking_date: row.booking_date.parse::<NaiveDate>().unwrap_or_else(|e| {
                warn!("Corrupt booking_date on '{}': {}", row.id, e);
                NaiveDate::default()
            }),
            duration: row.duration,
            status: row.status.parse().unwrap_or_else(|e| {
                warn!("Corrupt status on booking '{}': {}", row.id, e);
                BookingStatus::Pending
            }),
            created_at: parse_timestamp(&row.created_at, "created_at"),
        },
        space,
    }
}
