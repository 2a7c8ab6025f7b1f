//! The customer entity and its save payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::CustomerId;

/// A customer record as stored.
///
/// Field names are the stable wire identifiers of the JSON API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Customer {
    /// Store-assigned identifier, never zero once persisted.
    pub id: CustomerId,
    /// Freeform display name.
    pub name: String,
    /// Freeform phone number.
    pub phone: String,
    /// `false` means the customer is blocked.
    pub active: bool,
    /// Insertion time, set once by the store.
    pub created: DateTime<Utc>,
}

/// Payload of the save (create-or-update) operation.
///
/// A missing or zero `id` creates a record; any other `id` updates the name
/// and phone of that record. `active` and `created` are store-controlled: they
/// are type-checked when present so a malformed body is rejected, but their
/// values are never written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveCustomer {
    #[serde(default)]
    pub id: CustomerId,
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

impl SaveCustomer {
    /// Build a payload that creates a new record.
    #[must_use]
    pub fn create(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self::update(CustomerId::UNASSIGNED, name, phone)
    }

    /// Build a payload that rewrites the name and phone of `id`.
    #[must_use]
    pub fn update(id: CustomerId, name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            phone: phone.into(),
            active: None,
            created: None,
        }
    }

    /// Whether saving this payload inserts a new row.
    #[must_use]
    pub const fn is_create(&self) -> bool {
        self.id.is_unassigned()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_customer_wire_format() {
        let customer = Customer {
            id: CustomerId::new(5),
            name: "Alice".to_string(),
            phone: "123".to_string(),
            active: true,
            created: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
        };

        let value = serde_json::to_value(&customer).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 5,
                "name": "Alice",
                "phone": "123",
                "active": true,
                "created": "2026-01-02T03:04:05Z",
            })
        );
    }

    #[test]
    fn test_save_without_id_is_create() {
        let payload: SaveCustomer =
            serde_json::from_value(json!({"name": "Alice", "phone": "123"})).unwrap();
        assert!(payload.is_create());
        assert_eq!(payload, SaveCustomer::create("Alice", "123"));
    }

    #[test]
    fn test_save_with_zero_id_is_create() {
        let payload: SaveCustomer =
            serde_json::from_value(json!({"id": 0, "name": "Bob", "phone": "9"})).unwrap();
        assert!(payload.is_create());
    }

    #[test]
    fn test_save_with_id_is_update() {
        let payload: SaveCustomer =
            serde_json::from_value(json!({"id": 12, "name": "Bob", "phone": "9"})).unwrap();
        assert!(!payload.is_create());
        assert_eq!(payload.id, CustomerId::new(12));
    }

    #[test]
    fn test_save_accepts_store_controlled_fields() {
        let payload: SaveCustomer = serde_json::from_value(json!({
            "id": 3,
            "name": "Carol",
            "phone": "555",
            "active": false,
            "created": "2020-05-05T00:00:00Z",
        }))
        .unwrap();
        assert_eq!(payload.active, Some(false));
        assert!(payload.created.is_some());
    }

    #[test]
    fn test_save_rejects_wrong_field_types() {
        let bad = [
            json!({"id": "3", "name": "Carol", "phone": "555"}),
            json!({"name": 7, "phone": "555"}),
            json!({"name": "Carol", "phone": "555", "active": "yes"}),
            json!({"name": "Carol", "phone": "555", "created": 12}),
        ];
        for body in bad {
            assert!(
                serde_json::from_value::<SaveCustomer>(body.clone()).is_err(),
                "expected rejection of {body}"
            );
        }
    }

    #[test]
    fn test_save_requires_name_and_phone() {
        assert!(serde_json::from_value::<SaveCustomer>(json!({"name": "Dave"})).is_err());
        assert!(serde_json::from_value::<SaveCustomer>(json!({"phone": "1"})).is_err());
    }
}
