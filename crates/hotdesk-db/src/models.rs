/// Database row types — these map directly to SQLite rows.
/// Distinct from hotdesk-types API models to keep the DB layer independent;
/// the API layer owns the conversion (uuid/date parsing, amenity JSON).

pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub created_at: String,
}

pub struct SpaceRow {
    pub id: String,
    pub name: String,
    pub location: String,
    pub price: f64,
    /// JSON array of amenity tags.
    pub amenities: String,
    pub availability: bool,
    pub created_at: String,
}

pub struct BookingRow {
    pub id: String,
    pub user_id: String,
    pub space_id: String,
    pub booking_date: String,
    pub duration: f64,
    pub status: String,
    pub created_at: String,
    /// Joined space fields, None when the space row no longer exists.
    pub space_name: Option<String>,
    pub space_location: Option<String>,
    pub space_price: Option<f64>,
}
