use serde::{Deserialize, Serialize};

// -- Users --

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

// -- Properties --

/// Every property column except the server-assigned `id`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NewProperty {
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: i64,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub country: String,
    pub parking_spaces: i64,
    pub number_of_bathrooms: i64,
    pub number_of_bedrooms: i64,
}

// -- Search --

/// Optional property search criteria.
///
/// A criterion applies only when it is set to a non-empty / non-zero value:
/// `Some(0)` and `Some("")` behave exactly like `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PropertyFilters {
    pub city: Option<String>,
    pub owner_id: Option<i64>,
    pub minimum_price_per_night: Option<i64>,
    pub maximum_price_per_night: Option<i64>,
    pub minimum_rating: Option<f64>,
}

impl PropertyFilters {
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref().filter(|c| !c.is_empty())
    }

    pub fn owner_id(&self) -> Option<i64> {
        self.owner_id.filter(|v| *v != 0)
    }

    pub fn minimum_price_per_night(&self) -> Option<i64> {
        self.minimum_price_per_night.filter(|v| *v != 0)
    }

    pub fn maximum_price_per_night(&self) -> Option<i64> {
        self.maximum_price_per_night.filter(|v| *v != 0)
    }

    pub fn minimum_rating(&self) -> Option<f64> {
        self.minimum_rating.filter(|v| *v != 0.0 && !v.is_nan())
    }

    /// True when no criterion would constrain the search.
    pub fn is_empty(&self) -> bool {
        self.city().is_none()
            && self.owner_id().is_none()
            && self.minimum_price_per_night().is_none()
            && self.maximum_price_per_night().is_none()
            && self.minimum_rating().is_none()
    }
}
