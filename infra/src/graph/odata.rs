//! OData filter rendering for list item queries

use ev_core::domain::entities::format_timestamp;
use ev_core::domain::value_objects::RecordFilter;

/// Quote a string literal, doubling embedded single quotes
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// `fields/Token eq '…' and fields/Status eq '…' and fields/ExpiresOn ge '…'`
pub fn render_filter(filter: &RecordFilter) -> String {
    format!(
        "fields/Token eq {} and fields/Status eq {} and fields/ExpiresOn ge {}",
        quote(&filter.code),
        quote(filter.status.as_str()),
        quote(&format_timestamp(filter.expires_not_before)),
    )
}
