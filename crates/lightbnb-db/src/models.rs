//! Column lists and row mappers shared by the query functions.
//!
//! Every SELECT names its columns explicitly so the mappers can read them by
//! position; the lists here are the single place that order is defined.

use lightbnb_types::{GuestReservation, NewProperty, Property, PropertyListing, Reservation, User};
use rusqlite::Row;
use rusqlite::types::Value;

pub const USER_COLUMNS: &str = "id, name, email, password";

const PROPERTY_FIELDS: [&str; 15] = [
    "id",
    "owner_id",
    "title",
    "description",
    "thumbnail_photo_url",
    "cover_photo_url",
    "cost_per_night",
    "street",
    "city",
    "province",
    "post_code",
    "country",
    "parking_spaces",
    "number_of_bathrooms",
    "number_of_bedrooms",
];

pub const PROPERTY_COLUMN_COUNT: usize = PROPERTY_FIELDS.len();

/// Property columns, optionally qualified with a table name.
pub fn property_columns(table: Option<&str>) -> String {
    PROPERTY_FIELDS
        .iter()
        .map(|field| match table {
            Some(table) => format!("{table}.{field}"),
            None => (*field).to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub const RESERVATION_COLUMNS: &str = "reservations.id, reservations.guest_id, \
     reservations.property_id, reservations.start_date, reservations.end_date";

pub const RESERVATION_COLUMN_COUNT: usize = 5;

/// Explicit column-to-value mapping for an insert. The column list and the
/// bound values are both generated from this, so they cannot drift apart.
pub fn property_bindings(p: &NewProperty) -> [(&'static str, Value); 14] {
    [
        ("owner_id", Value::Integer(p.owner_id)),
        ("title", Value::Text(p.title.clone())),
        ("description", Value::Text(p.description.clone())),
        ("thumbnail_photo_url", Value::Text(p.thumbnail_photo_url.clone())),
        ("cover_photo_url", Value::Text(p.cover_photo_url.clone())),
        ("cost_per_night", Value::Integer(p.cost_per_night)),
        ("street", Value::Text(p.street.clone())),
        ("city", Value::Text(p.city.clone())),
        ("province", Value::Text(p.province.clone())),
        ("post_code", Value::Text(p.post_code.clone())),
        ("country", Value::Text(p.country.clone())),
        ("parking_spaces", Value::Integer(p.parking_spaces)),
        ("number_of_bathrooms", Value::Integer(p.number_of_bathrooms)),
        ("number_of_bedrooms", Value::Integer(p.number_of_bedrooms)),
    ]
}

pub fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        password: row.get(3)?,
    })
}

/// Read a property whose columns start at `offset`.
pub fn property_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Property> {
    Ok(Property {
        id: row.get(offset)?,
        owner_id: row.get(offset + 1)?,
        title: row.get(offset + 2)?,
        description: row.get(offset + 3)?,
        thumbnail_photo_url: row.get(offset + 4)?,
        cover_photo_url: row.get(offset + 5)?,
        cost_per_night: row.get(offset + 6)?,
        street: row.get(offset + 7)?,
        city: row.get(offset + 8)?,
        province: row.get(offset + 9)?,
        post_code: row.get(offset + 10)?,
        country: row.get(offset + 11)?,
        parking_spaces: row.get(offset + 12)?,
        number_of_bathrooms: row.get(offset + 13)?,
        number_of_bedrooms: row.get(offset + 14)?,
    })
}

pub fn reservation_from_row(row: &Row<'_>) -> rusqlite::Result<Reservation> {
    Ok(Reservation {
        id: row.get(0)?,
        guest_id: row.get(1)?,
        property_id: row.get(2)?,
        start_date: row.get(3)?,
        end_date: row.get(4)?,
    })
}

/// `property columns, average_rating`
pub fn listing_from_row(row: &Row<'_>) -> rusqlite::Result<PropertyListing> {
    Ok(PropertyListing {
        property: property_from_row(row, 0)?,
        average_rating: row.get(PROPERTY_COLUMN_COUNT)?,
    })
}

/// `reservation columns, property columns, average_rating`
pub fn guest_reservation_from_row(row: &Row<'_>) -> rusqlite::Result<GuestReservation> {
    Ok(GuestReservation {
        reservation: reservation_from_row(row)?,
        property: property_from_row(row, RESERVATION_COLUMN_COUNT)?,
        average_rating: row.get(RESERVATION_COLUMN_COUNT + PROPERTY_COLUMN_COUNT)?,
    })
}
