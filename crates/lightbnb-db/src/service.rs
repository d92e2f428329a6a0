use std::sync::Arc;

use lightbnb_types::{
    GuestReservation, NewProperty, NewUser, Property, PropertyFilters, PropertyListing, User,
};

use crate::{DEFAULT_LIMIT, Database, Result};

/// Async front for [`Database`].
///
/// Every call is one statement, run on the blocking pool so the caller's
/// runtime is never stalled by SQLite. The store is injected, so tests can
/// hand in an in-memory database.
#[derive(Clone)]
pub struct QueryService {
    db: Arc<Database>,
}

impl QueryService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || f(db.as_ref())).await?
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = email.to_owned();
        self.run(move |db| db.get_user_by_email(&email)).await
    }

    pub async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.run(move |db| db.get_user_by_id(id)).await
    }

    pub async fn create_user(&self, user: NewUser) -> Result<User> {
        self.run(move |db| db.create_user(&user)).await
    }

    /// `limit` defaults to [`DEFAULT_LIMIT`].
    pub async fn get_reservations_for_guest(
        &self,
        guest_id: i64,
        limit: Option<u32>,
    ) -> Result<Vec<GuestReservation>> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        self.run(move |db| db.get_reservations_for_guest(guest_id, limit))
            .await
    }

    /// `limit` defaults to [`DEFAULT_LIMIT`].
    pub async fn search_properties(
        &self,
        filters: PropertyFilters,
        limit: Option<u32>,
    ) -> Result<Vec<PropertyListing>> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        self.run(move |db| db.search_properties(&filters, limit))
            .await
    }

    pub async fn create_property(&self, property: NewProperty) -> Result<Property> {
        self.run(move |db| db.create_property(&property)).await
    }
}
