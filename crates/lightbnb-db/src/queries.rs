use lightbnb_types::{
    GuestReservation, NewProperty, NewUser, Property, PropertyFilters, PropertyListing, User,
};
use rusqlite::{Connection, OptionalExtension, params_from_iter};
use tracing::debug;

use crate::models::{
    RESERVATION_COLUMNS, USER_COLUMNS, guest_reservation_from_row,
    listing_from_row, property_bindings, property_columns, property_from_row, user_from_row,
};
use crate::search::SearchQuery;
use crate::{Database, Result};

impl Database {
    // -- Users --

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.with_conn(|conn| query_user(conn, "email", email))
    }

    pub fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.with_conn(|conn| query_user(conn, "id", id))
    }

    /// Insert a user as given. Hashing and validation are the caller's job.
    pub fn create_user(&self, user: &NewUser) -> Result<User> {
        self.with_conn(|conn| {
            let sql = format!(
                "INSERT INTO users (name, email, password) VALUES (?1, ?2, ?3) RETURNING {USER_COLUMNS}"
            );
            let row = conn.query_row(
                &sql,
                (&user.name, &user.email, &user.password),
                user_from_row,
            )?;
            Ok(row)
        })
    }

    // -- Reservations --

    /// Past stays for a guest, oldest first, with each property's mean rating.
    pub fn get_reservations_for_guest(
        &self,
        guest_id: i64,
        limit: u32,
    ) -> Result<Vec<GuestReservation>> {
        self.with_conn(|conn| query_guest_reservations(conn, guest_id, limit))
    }

    // -- Properties --

    pub fn search_properties(
        &self,
        filters: &PropertyFilters,
        limit: u32,
    ) -> Result<Vec<PropertyListing>> {
        let query = SearchQuery::build(filters, limit);
        debug!(params = query.params.len(), sql = %query.sql, "Property search");

        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&query.sql)?;
            let rows = stmt
                .query_map(params_from_iter(query.params.iter()), listing_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn create_property(&self, property: &NewProperty) -> Result<Property> {
        let bindings = property_bindings(property);

        let columns: Vec<&str> = bindings.iter().map(|(column, _)| *column).collect();
        let placeholders: Vec<String> = (1..=bindings.len()).map(|i| format!("?{}", i)).collect();
        let sql = format!(
            "INSERT INTO properties ({}) VALUES ({}) RETURNING {}",
            columns.join(", "),
            placeholders.join(", "),
            property_columns(None),
        );

        self.with_conn(|conn| {
            let row = conn.query_row(
                &sql,
                params_from_iter(bindings.iter().map(|(_, value)| value)),
                |row| property_from_row(row, 0),
            )?;
            Ok(row)
        })
    }
}

/// `column` is always one of our own constants, never caller input.
fn query_user<K: rusqlite::ToSql>(
    conn: &Connection,
    column: &'static str,
    key: K,
) -> Result<Option<User>> {
    let mut stmt =
        conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = ?1"))?;

    let row = stmt.query_row([key], user_from_row).optional()?;

    Ok(row)
}

fn query_guest_reservations(
    conn: &Connection,
    guest_id: i64,
    limit: u32,
) -> Result<Vec<GuestReservation>> {
    // LEFT JOIN reviews so stays at unreviewed properties still show up
    let mut stmt = conn.prepare(&format!(
        "SELECT {RESERVATION_COLUMNS}, {}, avg(property_reviews.rating) AS average_rating
         FROM reservations
         JOIN properties ON reservations.property_id = properties.id
         LEFT JOIN property_reviews ON properties.id = property_reviews.property_id
         WHERE reservations.guest_id = ?1
           AND reservations.end_date < date('now')
         GROUP BY properties.id, reservations.id
         ORDER BY reservations.start_date
         LIMIT ?2",
        property_columns(Some("properties")),
    ))?;

    let rows = stmt
        .query_map(rusqlite::params![guest_id, limit], guest_reservation_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}
