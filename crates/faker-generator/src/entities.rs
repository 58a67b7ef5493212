//! Entities produced by the generators.
//!
//! All timestamps are `DateTime<Utc>` and serialize as ISO-8601 strings.
//! Absent purchase timestamps serialize as `null`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::GeneratorError;

/// A synthetic user profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// 1-based id, `index + 1`
    pub id: u64,
    pub name: String,
    pub username: String,
    pub sex: String,
    pub mail: String,
    pub address: String,
    pub residence: String,
    pub job: String,
    pub company: String,
    pub ssn: String,
    pub blood_group: String,
    pub website: Vec<String>,
    /// `[latitude, longitude]`
    pub current_location: [f64; 2],
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A purchase made by a user.
///
/// The timestamps form a causal chain: `purchased_at` is only set when
/// `added_to_cart_at` is, and `returned_at` only when `purchased_at` is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: u64,
    pub product_id: u64,
    pub user_id: u64,
    pub added_to_cart_at: Option<DateTime<Utc>>,
    pub purchased_at: Option<DateTime<Utc>>,
    pub returned_at: Option<DateTime<Utc>>,
}

/// A product from the fixed catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub make: String,
    pub model: String,
    pub year: u32,
    pub price: u64,
    pub created_at: DateTime<Utc>,
}

/// Conversion of an entity into the field map of a RECORD message.
pub trait RecordData: Serialize {
    fn to_record_data(&self) -> Result<Map<String, Value>, GeneratorError> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(GeneratorError::NotAnObject(other.to_string())),
        }
    }
}

impl RecordData for User {}
impl RecordData for Purchase {}
impl RecordData for Product {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_purchase_record_data_nulls() {
        let added = Utc.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).unwrap();
        let purchase = Purchase {
            id: 3,
            product_id: 17,
            user_id: 2,
            added_to_cart_at: Some(added),
            purchased_at: None,
            returned_at: None,
        };

        let data = purchase.to_record_data().unwrap();
        assert_eq!(data["added_to_cart_at"], json!("2021-03-04T05:06:07Z"));
        assert_eq!(data["purchased_at"], Value::Null);
        assert_eq!(data["returned_at"], Value::Null);
        assert_eq!(data.len(), 6);
    }

    #[test]
    fn test_user_record_data_has_no_birthdate() {
        let ts = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        let user = User {
            id: 1,
            name: "Ada Lovelace".to_string(),
            username: "ada".to_string(),
            sex: "F".to_string(),
            mail: "ada@example.com".to_string(),
            address: "1 Main St".to_string(),
            residence: "2 Side St".to_string(),
            job: "Mathematician".to_string(),
            company: "Babbage LLC".to_string(),
            ssn: "123-45-6789".to_string(),
            blood_group: "O+".to_string(),
            website: vec!["https://ada.example.com/".to_string()],
            current_location: [51.5, -0.12],
            created_at: ts,
            updated_at: ts,
        };

        let data = user.to_record_data().unwrap();
        assert!(!data.contains_key("birthdate"));
        assert_eq!(data["created_at"], json!("2000-01-01T00:00:00Z"));
        assert_eq!(data["current_location"], json!([51.5, -0.12]));
    }
}
