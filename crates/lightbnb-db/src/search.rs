//! Property search query builder.
//!
//! Filters are first lowered into [`Predicate`]s, one per criterion that is
//! actually set, then rendered in a single pass. Each placeholder number is
//! taken from the parameter list at the moment its value is pushed, so
//! `?n` always refers to `params[n - 1]`.

use lightbnb_types::PropertyFilters;
use rusqlite::types::Value;

use crate::models::property_columns;

const AVERAGE_RATING: &str = "avg(property_reviews.rating)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Equal,
    AtLeast,
    AtMost,
    Like,
}

impl Comparison {
    fn as_sql(self) -> &'static str {
        match self {
            Comparison::Equal => "=",
            Comparison::AtLeast => ">=",
            Comparison::AtMost => "<=",
            Comparison::Like => "LIKE",
        }
    }
}

/// Row predicates go in WHERE; predicates on aggregates go in HAVING.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clause {
    Where,
    Having,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: &'static str,
    pub comparison: Comparison,
    pub value: Value,
    pub clause: Clause,
}

impl Predicate {
    fn row(column: &'static str, comparison: Comparison, value: Value) -> Self {
        Self {
            column,
            comparison,
            value,
            clause: Clause::Where,
        }
    }
}

/// The predicates for every filter that is set, in application order.
pub fn predicates(filters: &PropertyFilters) -> Vec<Predicate> {
    [
        filters.city().map(|city| {
            Predicate::row(
                "properties.city",
                Comparison::Like,
                Value::Text(format!("%{city}%")),
            )
        }),
        filters.owner_id().map(|id| {
            Predicate::row("properties.owner_id", Comparison::Equal, Value::Integer(id))
        }),
        filters.minimum_price_per_night().map(|cost| {
            Predicate::row(
                "properties.cost_per_night",
                Comparison::AtLeast,
                Value::Integer(cost),
            )
        }),
        filters.maximum_price_per_night().map(|cost| {
            Predicate::row(
                "properties.cost_per_night",
                Comparison::AtMost,
                Value::Integer(cost),
            )
        }),
        filters.minimum_rating().map(|rating| Predicate {
            column: AVERAGE_RATING,
            comparison: Comparison::AtLeast,
            value: Value::Real(rating),
            clause: Clause::Having,
        }),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// A rendered search statement and the values for its placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

impl SearchQuery {
    pub fn build(filters: &PropertyFilters, limit: u32) -> Self {
        let predicates = predicates(filters);
        let mut params = Vec::with_capacity(predicates.len() + 1);

        let mut sql = format!(
            "SELECT {}, {AVERAGE_RATING} AS average_rating\n\
             FROM properties\n\
             JOIN property_reviews ON properties.id = property_reviews.property_id",
            property_columns(Some("properties")),
        );

        if let Some(conditions) = render(&predicates, Clause::Where, &mut params) {
            sql.push_str(&format!("\nWHERE {conditions}"));
        }

        sql.push_str("\nGROUP BY properties.id");

        if let Some(conditions) = render(&predicates, Clause::Having, &mut params) {
            sql.push_str(&format!("\nHAVING {conditions}"));
        }

        params.push(Value::Integer(i64::from(limit)));
        sql.push_str(&format!(
            "\nORDER BY properties.cost_per_night\nLIMIT ?{}",
            params.len()
        ));

        Self { sql, params }
    }
}

fn render(predicates: &[Predicate], clause: Clause, params: &mut Vec<Value>) -> Option<String> {
    let conditions: Vec<String> = predicates
        .iter()
        .filter(|p| p.clause == clause)
        .map(|p| {
            params.push(p.value.clone());
            format!("{} {} ?{}", p.column, p.comparison.as_sql(), params.len())
        })
        .collect();

    (!conditions.is_empty()).then(|| conditions.join(" AND "))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Placeholder numbers in the order they appear in the SQL text.
    fn placeholders(sql: &str) -> Vec<usize> {
        sql.split('?')
            .skip(1)
            .map(|rest| {
                rest.chars()
                    .take_while(|c| c.is_ascii_digit())
                    .collect::<String>()
                    .parse()
                    .unwrap()
            })
            .collect()
    }

    /// Bit i of `mask` switches on the i-th filter, in application order.
    fn filters_from_mask(mask: u32) -> (PropertyFilters, Vec<Value>) {
        let mut filters = PropertyFilters::default();
        let mut expected = Vec::new();
        if mask & 1 != 0 {
            filters.city = Some("Van".into());
            expected.push(Value::Text("%Van%".into()));
        }
        if mask & 2 != 0 {
            filters.owner_id = Some(7);
            expected.push(Value::Integer(7));
        }
        if mask & 4 != 0 {
            filters.minimum_price_per_night = Some(5_000);
            expected.push(Value::Integer(5_000));
        }
        if mask & 8 != 0 {
            filters.maximum_price_per_night = Some(20_000);
            expected.push(Value::Integer(20_000));
        }
        if mask & 16 != 0 {
            filters.minimum_rating = Some(4.0);
            expected.push(Value::Real(4.0));
        }
        (filters, expected)
    }

    #[test]
    fn every_filter_subset_binds_in_placeholder_order() {
        for mask in 0..32u32 {
            let (filters, mut expected) = filters_from_mask(mask);
            expected.push(Value::Integer(10));

            let query = SearchQuery::build(&filters, 10);

            assert_eq!(query.params.len(), mask.count_ones() as usize + 1, "mask {mask:05b}");
            assert_eq!(query.params, expected, "mask {mask:05b}");

            let numbers = placeholders(&query.sql);
            let in_order: Vec<usize> = (1..=query.params.len()).collect();
            assert_eq!(numbers, in_order, "mask {mask:05b}: {}", query.sql);

            assert_eq!(query.sql.contains("WHERE"), mask & 0b01111 != 0, "mask {mask:05b}");
            assert_eq!(query.sql.contains("HAVING"), mask & 0b10000 != 0, "mask {mask:05b}");
            assert!(!query.sql.contains("AND\n"), "dangling AND: {}", query.sql);
        }
    }

    #[test]
    fn no_filters_only_binds_limit() {
        let query = SearchQuery::build(&PropertyFilters::default(), 5);
        assert!(!query.sql.contains("WHERE"));
        assert!(!query.sql.contains("HAVING"));
        assert!(query.sql.ends_with("LIMIT ?1"));
        assert_eq!(query.params, vec![Value::Integer(5)]);
    }

    #[test]
    fn city_is_wrapped_for_substring_match() {
        let filters = PropertyFilters {
            city: Some("downtown".into()),
            ..Default::default()
        };
        let query = SearchQuery::build(&filters, 10);
        assert!(query.sql.contains("properties.city LIKE ?1"));
        assert_eq!(query.params[0], Value::Text("%downtown%".into()));
        assert!(query.sql.ends_with("LIMIT ?2"));
    }

    #[test]
    fn zero_minimum_price_is_not_bound() {
        let filters = PropertyFilters {
            minimum_price_per_night: Some(0),
            ..Default::default()
        };
        let query = SearchQuery::build(&filters, 10);
        assert_eq!(query.params, vec![Value::Integer(10)]);
        assert!(!query.sql.contains("cost_per_night >="));
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let filters = PropertyFilters {
            minimum_price_per_night: Some(100),
            maximum_price_per_night: Some(300),
            ..Default::default()
        };
        let query = SearchQuery::build(&filters, 10);
        assert!(query.sql.contains(
            "WHERE properties.cost_per_night >= ?1 AND properties.cost_per_night <= ?2"
        ));
    }

    #[test]
    fn minimum_rating_filters_the_average() {
        let filters = PropertyFilters {
            owner_id: Some(3),
            minimum_rating: Some(3.5),
            ..Default::default()
        };
        let query = SearchQuery::build(&filters, 10);
        assert!(query.sql.contains("WHERE properties.owner_id = ?1"));
        assert!(query.sql.contains("HAVING avg(property_reviews.rating) >= ?2"));
        assert!(query.sql.ends_with("LIMIT ?3"));
    }

    #[test]
    fn predicates_skip_unset_filters() {
        let filters = PropertyFilters {
            city: Some(String::new()),
            maximum_price_per_night: Some(250),
            ..Default::default()
        };
        let preds = predicates(&filters);
        assert_eq!(preds.len(), 1);
        assert_eq!(preds[0].column, "properties.cost_per_night");
        assert_eq!(preds[0].comparison, Comparison::AtMost);
        assert_eq!(preds[0].clause, Clause::Where);
    }
}
