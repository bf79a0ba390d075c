use crate::Database;
use crate::models::{BookingRow, SpaceRow, UserRow};
use anyhow::Result;
use rusqlite::Connection;

impl Database {
    // -- Users --

    pub fn create_user(
        &self,
        id: &str,
        name: &str,
        email: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, name, email, password, role) VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![id, name, email, password_hash, role],
            )?;
            Ok(())
        })
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_email(conn, email))
    }

    // -- Spaces --

    pub fn insert_space(
        &self,
        id: &str,
        name: &str,
        location: &str,
        price: f64,
        amenities_json: &str,
        availability: bool,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO spaces (id, name, location, price, amenities, availability)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![id, name, location, price, amenities_json, availability],
            )?;
            Ok(())
        })
    }

    /// Full-record update. Returns false when the id is unknown.
    pub fn update_space(
        &self,
        id: &str,
        name: &str,
        location: &str,
        price: f64,
        amenities_json: &str,
        availability: bool,
    ) -> Result<bool> {
        self.with_conn(|conn| {
            let n = conn.execute(
                "UPDATE spaces SET name = ?2, location = ?3, price = ?4, amenities = ?5,
                 availability = ?6 WHERE id = ?1",
                rusqlite::params![id, name, location, price, amenities_json, availability],
            )?;
            Ok(n > 0)
        })
    }

    /// Returns false when the id is unknown. Bookings referencing the space
    /// are left in place.
    pub fn delete_space(&self, id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let n = conn.execute("DELETE FROM spaces WHERE id = ?1", [id])?;
            Ok(n > 0)
        })
    }

    pub fn get_space(&self, id: &str) -> Result<Option<SpaceRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, location, price, amenities, availability, created_at
                 FROM spaces WHERE id = ?1",
            )?;
            let row = stmt.query_row([id], space_from_row).optional()?;
            Ok(row)
        })
    }

    /// Every space with availability = true; filter policy (location, price,
    /// amenities) is applied by the caller.
    pub fn list_available_spaces(&self) -> Result<Vec<SpaceRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, location, price, amenities, availability, created_at
                 FROM spaces WHERE availability = 1",
            )?;
            let rows = stmt
                .query_map([], space_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    // -- Bookings --

    pub fn insert_booking(
        &self,
        id: &str,
        user_id: &str,
        space_id: &str,
        booking_date: &str,
        duration: f64,
        status: &str,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO bookings (id, user_id, space_id, booking_date, duration, status)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![id, user_id, space_id, booking_date, duration, status],
            )?;
            Ok(())
        })
    }

    pub fn get_bookings_for_user(&self, user_id: &str) -> Result<Vec<BookingRow>> {
        self.with_conn(|conn| query_bookings(conn, user_id))
    }
}

fn query_user_by_email(conn: &Connection, email: &str) -> Result<Option<UserRow>> {
    let mut stmt = conn
        .prepare("SELECT id, name, email, password, role, created_at FROM users WHERE email = ?1")?;

    let row = stmt
        .query_row([email], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
                password: row.get(3)?,
                role: row.get(4)?,
                created_at: row.get(5)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn space_from_row(row: &rusqlite::Row<'_>) -> std::result::Result<SpaceRow, rusqlite::Error> {
    Ok(SpaceRow {
        id: row.get(0)?,
        name: row.get(1)?,
        location: row.get(2)?,
        price: row.get(3)?,
        amenities: row.get(4)?,
        availability: row.get(5)?,
        created_at: row.get(6)?,
    })
}

fn query_bookings(conn: &Connection, user_id: &str) -> Result<Vec<BookingRow>> {
    // LEFT JOIN keeps bookings whose space was deleted (no cascade)
    let mut stmt = conn.prepare(
        "SELECT b.id, b.user_id, b.space_id, b.booking_date, b.duration, b.status, b.created_at,
                s.name, s.location, s.price
         FROM bookings b
         LEFT JOIN spaces s ON b.space_id = s.id
         WHERE b.user_id = ?1",
    )?;

    let rows = stmt
        .query_map([user_id], |row| {
            Ok(BookingRow {
                id: row.get(0)?,
                user_id: row.get(1)?,
                space_id: row.get(2)?,
                booking_date: row.get(3)?,
                duration: row.get(4)?,
                status: row.get(5)?,
                created_at: row.get(6)?,
                space_name: row.get(7)?,
                space_location: row.get(8)?,
                space_price: row.get(9)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn add_space(db: &Database, name: &str, price: f64, available: bool) -> String {
        let id = Uuid::new_v4().to_string();
        db.insert_space(&id, name, "Berlin", price, "[\"wifi\"]", available)
            .unwrap();
        id
    }

    #[test]
    fn duplicate_email_rejected_by_unique_constraint() {
        let db = db();
        db.create_user("u1", "Ada", "ada@example.com", "hash", "user")
            .unwrap();
        let err = db.create_user("u2", "Ada II", "ada@example.com", "hash", "user");
        assert!(err.is_err());
    }

    #[test]
    fn user_lookup_by_email() {
        let db = db();
        db.create_user("u1", "Ada", "ada@example.com", "hash", "admin")
            .unwrap();

        let row = db.get_user_by_email("ada@example.com").unwrap().unwrap();
        assert_eq!(row.id, "u1");
        assert_eq!(row.role, "admin");

        assert!(db.get_user_by_email("nobody@example.com").unwrap().is_none());
    }

    #[test]
    fn listing_skips_unavailable_spaces() {
        let db = db();
        add_space(&db, "Desk A", 10.0, true);
        add_space(&db, "Desk B", 10.0, false);

        let rows = db.list_available_spaces().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Desk A");
    }

    #[test]
    fn update_and_delete_report_missing_ids() {
        let db = db();
        let id = add_space(&db, "Desk A", 10.0, true);

        assert!(db.update_space(&id, "Desk A+", "Berlin", 12.0, "[]", true).unwrap());
        assert_eq!(db.get_space(&id).unwrap().unwrap().name, "Desk A+");

        assert!(!db.update_space("missing", "x", "y", 1.0, "[]", true).unwrap());
        assert!(db.delete_space(&id).unwrap());
        assert!(!db.delete_space(&id).unwrap());
    }

    #[test]
    fn deleting_space_leaves_booking_dangling() {
        let db = db();
        db.create_user("u1", "Ada", "ada@example.com", "hash", "user")
            .unwrap();
        let space_id = add_space(&db, "Desk A", 10.0, true);
        db.insert_booking("b1", "u1", &space_id, "2026-09-01", 2.0, "pending")
            .unwrap();

        assert!(db.delete_space(&space_id).unwrap());

        let rows = db.get_bookings_for_user("u1").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].space_id, space_id);
        assert!(rows[0].space_name.is_none());
    }

    #[test]
    fn bookings_are_scoped_to_owner() {
        let db = db();
        db.create_user("u1", "Ada", "ada@example.com", "hash", "user")
            .unwrap();
        db.create_user("u2", "Bob", "bob@example.com", "hash", "user")
            .unwrap();
        let space_id = add_space(&db, "Desk A", 10.0, true);

        db.insert_booking("b1", "u1", &space_id, "2026-09-01", 2.0, "pending")
            .unwrap();
        db.insert_booking("b2", "u2", &space_id, "2026-09-01", 3.0, "pending")
            .unwrap();

        let rows = db.get_bookings_for_user("u1").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "b1");
        assert_eq!(rows[0].space_name.as_deref(), Some("Desk A"));
    }

    #[test]
    fn same_slot_can_be_booked_twice() {
        // No conflict detection: two bookings for the same space and date
        // both persist.
        let db = db();
        db.create_user("u1", "Ada", "ada@example.com", "hash", "user")
            .unwrap();
        let space_id = add_space(&db, "Desk A", 10.0, true);

        db.insert_booking("b1", "u1", &space_id, "2026-09-01", 2.0, "pending")
            .unwrap();
        db.insert_booking("b2", "u1", &space_id, "2026-09-01", 2.0, "pending")
            .unwrap();

        assert_eq!(db.get_bookings_for_user("u1").unwrap().len(), 2);
    }
}
