pub mod api;
pub mod models;

pub use api::{NewProperty, NewUser, PropertyFilters};
pub use models::{GuestReservation, Property, PropertyListing, Reservation, User};
