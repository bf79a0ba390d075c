use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |r| r.get(0),
    )?;

    if version < 1 {
        info!("Running migration v1 (initial schema)");
        conn.execute_batch(
            "
            CREATE TABLE users (
                id          TEXT PRIMARY KEY,
                name        TEXT NOT NULL,
                email       TEXT NOT NULL UNIQUE,
                password    TEXT NOT NULL,
                role        TEXT NOT NULL DEFAULT 'user',
                created_at  TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE spaces (
                id           TEXT PRIMARY KEY,
                name         TEXT NOT NULL,
                location     TEXT NOT NULL,
                price        REAL NOT NULL,
                amenities    TEXT NOT NULL DEFAULT '[]',
                availability INTEGER NOT NULL DEFAULT 1,
                created_at   TEXT NOT NULL DEFAULT (datetime('now'))
            );

            -- REFERENCES are declarative only: the foreign_keys pragma stays
            -- off, so deleting a space leaves its bookings dangling.
            CREATE TABLE bookings (
                id           TEXT PRIMARY KEY,
                user_id      TEXT NOT NULL REFERENCES users(id),
                space_id     TEXT NOT NULL REFERENCES spaces(id),
                booking_date TEXT NOT NULL,
                duration     REAL NOT NULL,
                status       TEXT NOT NULL DEFAULT 'pending',
                created_at   TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE INDEX idx_bookings_user
                ON bookings(user_id, created_at);

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}
