//! Extraction results and contact records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Sender of the message being scanned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderIdentity {
    /// Sender email address.
    pub email: String,

    /// Sender display name.
    pub name: String,
}

impl SenderIdentity {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
        }
    }
}

/// Field values offered for review before creating a contact.
///
/// Fields are empty strings when nothing was found, never absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractionResult {
    pub full_name: String,
    pub phone: String,
    pub email: String,
}

impl ExtractionResult {
    /// Apply user edits on top of the extracted values.
    ///
    /// An edit always wins over the extracted value, including an edit to
    /// an empty string.
    pub fn apply_edits(mut self, edits: FieldEdits) -> Self {
        if let Some(full_name) = edits.full_name {
            self.full_name = full_name;
        }
        if let Some(phone) = edits.phone {
            self.phone = phone;
        }
        if let Some(email) = edits.email {
            self.email = email;
        }
        self
    }
}

/// User edits to an [`ExtractionResult`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldEdits {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Email entry of a contact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress {
    pub address: String,

    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub name: String,
}

/// Contact payload sent to the contact-creation API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub given_name: String,

    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub surname: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub email_addresses: Vec<EmailAddress>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub business_phones: Vec<String>,
}

impl ContactRecord {
    /// Build a contact payload from reviewed field values.
    ///
    /// The full name is split on whitespace: the first token becomes the
    /// given name and the rest the surname, only when there are at least
    /// two tokens. The display name always carries the full name.
    pub fn from_fields(fields: &ExtractionResult) -> Self {
        let full_name = fields.full_name.trim();
        let tokens: Vec<&str> = full_name.split_whitespace().collect();

        let (given_name, surname) = match tokens.split_first() {
            Some((first, rest)) if !rest.is_empty() => (first.to_string(), rest.join(" ")),
            _ => (String::new(), String::new()),
        };

        let email_addresses = if fields.email.is_empty() {
            Vec::new()
        } else {
            vec![EmailAddress {
                address: fields.email.clone(),
                name: full_name.to_string(),
            }]
        };

        let business_phones = if fields.phone.is_empty() {
            Vec::new()
        } else {
            vec![fields.phone.clone()]
        };

        Self {
            given_name,
            surname,
            display_name: full_name.to_string(),
            email_addresses,
            business_phones,
        }
    }
}

/// Contact as returned by the contact-creation API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedContact {
    /// Server-assigned identifier.
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date_time: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub record: ContactRecord,
}

// The remote API reports unset fields as `null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fields(full_name: &str, phone: &str, email: &str) -> ExtractionResult {
        ExtractionResult {
            full_name: full_name.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn test_contact_name_split() {
        let record = ContactRecord::from_fields(&fields("Marie Curie", "", ""));
        assert_eq!(record.given_name, "Marie");
        assert_eq!(record.surname, "Curie");
        assert_eq!(record.display_name, "Marie Curie");
    }

    #[test]
    fn test_contact_compound_surname() {
        let record = ContactRecord::from_fields(&fields("Jean  de la   Fontaine", "", ""));
        assert_eq!(record.given_name, "Jean");
        assert_eq!(record.surname, "de la Fontaine");
    }

    #[test]
    fn test_contact_single_token() {
        let record = ContactRecord::from_fields(&fields("Madonna", "", ""));
        assert_eq!(record.given_name, "");
        assert_eq!(record.surname, "");
        assert_eq!(record.display_name, "Madonna");
    }

    #[test]
    fn test_contact_collections() {
        let record =
            ContactRecord::from_fields(&fields("Marie Curie", "0612345678", "marie@example.fr"));
        assert_eq!(
            record.email_addresses,
            vec![EmailAddress {
                address: "marie@example.fr".to_string(),
                name: "Marie Curie".to_string(),
            }]
        );
        assert_eq!(record.business_phones, vec!["0612345678".to_string()]);

        let empty = ContactRecord::from_fields(&ExtractionResult::default());
        assert!(empty.email_addresses.is_empty());
        assert!(empty.business_phones.is_empty());
    }

    #[test]
    fn test_contact_payload_json() {
        let record =
            ContactRecord::from_fields(&fields("Marie Curie", "0612345678", "marie@example.fr"));
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "givenName": "Marie",
                "surname": "Curie",
                "displayName": "Marie Curie",
                "emailAddresses": [{"address": "marie@example.fr", "name": "Marie Curie"}],
                "businessPhones": ["0612345678"]
            })
        );
    }

    #[test]
    fn test_apply_edits() {
        let extracted = fields("Directeur Commercial", "0612345678", "x@y.com");
        let edited = extracted.apply_edits(FieldEdits {
            full_name: Some("Jean Dupont".to_string()),
            phone: Some(String::new()),
            email: None,
        });

        assert_eq!(edited, fields("Jean Dupont", "", "x@y.com"));
    }

    #[test]
    fn test_extraction_result_serializes_all_fields() {
        let json = serde_json::to_value(ExtractionResult::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"fullName": "", "phone": "", "email": ""})
        );
    }

    #[test]
    fn test_created_contact_parse() {
        let body = r#"{
            "id": "AAMkAGI2",
            "createdDateTime": "2024-05-02T10:15:00Z",
            "givenName": "Marie",
            "surname": "Curie",
            "displayName": "Marie Curie",
            "emailAddresses": [{"address": "marie@example.fr", "name": null}],
            "businessPhones": ["0612345678"],
            "jobTitle": null
        }"#;

        let created: CreatedContact = serde_json::from_str(body).unwrap();
        assert_eq!(created.id, "AAMkAGI2");
        assert!(created.created_date_time.is_some());
        assert_eq!(created.record.surname, "Curie");
        assert_eq!(created.record.email_addresses[0].name, "");
        assert_eq!(created.record.business_phones, vec!["0612345678".to_string()]);
    }
}
