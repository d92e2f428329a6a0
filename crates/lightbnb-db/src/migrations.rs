use rusqlite::Connection;
use tracing::info;

use crate::Result;

/// Create the listing schema if it is not there yet. Safe to run on every open.
pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            email       TEXT NOT NULL UNIQUE,
            password    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS properties (
            id                    INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id              INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            title                 TEXT NOT NULL,
            description           TEXT NOT NULL,
            thumbnail_photo_url   TEXT NOT NULL,
            cover_photo_url       TEXT NOT NULL,
            cost_per_night        INTEGER NOT NULL DEFAULT 0,
            street                TEXT NOT NULL,
            city                  TEXT NOT NULL,
            province              TEXT NOT NULL,
            post_code             TEXT NOT NULL,
            country               TEXT NOT NULL,
            parking_spaces        INTEGER NOT NULL DEFAULT 0,
            number_of_bathrooms   INTEGER NOT NULL DEFAULT 0,
            number_of_bedrooms    INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_properties_owner
            ON properties(owner_id);

        CREATE TABLE IF NOT EXISTS reservations (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            guest_id      INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            property_id   INTEGER NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
            start_date    TEXT NOT NULL,
            end_date      TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_reservations_guest
            ON reservations(guest_id, start_date);

        CREATE TABLE IF NOT EXISTS property_reviews (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            property_id     INTEGER NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
            reservation_id  INTEGER NOT NULL REFERENCES reservations(id) ON DELETE CASCADE,
            rating          INTEGER NOT NULL DEFAULT 0,
            message         TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_property_reviews_property
            ON property_reviews(property_id);
        ",
    )?;

    info!("Database schema ready");
    Ok(())
}
