//! Wire shapes of list item responses

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use ev_core::domain::entities::{RecordStatus, VerificationRecord};

#[derive(Debug, Deserialize)]
pub(crate) struct ListItemsResponse {
    #[serde(default)]
    pub value: Vec<ListItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListItem {
    pub id: String,
    #[serde(rename = "eTag", default)]
    pub e_tag: Option<String>,
    #[serde(default)]
    pub fields: RecordFields,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RecordFields {
    #[serde(default, deserialize_with = "string_or_number")]
    pub token: Option<String>,
    #[serde(default)]
    pub target_email: Option<String>,
    #[serde(default)]
    pub status: Option<RecordStatus>,
    #[serde(default)]
    pub expires_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub verified_on: Option<DateTime<Utc>>,
}

impl From<ListItem> for VerificationRecord {
    fn from(item: ListItem) -> Self {
        let fields = item.fields;
        VerificationRecord {
            id: item.id,
            etag: item.e_tag,
            token: fields.token.unwrap_or_default(),
            target_email: fields.target_email.unwrap_or_default(),
            status: fields.status.unwrap_or(RecordStatus::Other),
            expires_on: fields.expires_on,
            notes: fields.notes,
            verified_on: fields.verified_on,
        }
    }
}

// Number columns come back as JSON numbers
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
