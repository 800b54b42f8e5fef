//! Booking rows arrive with whichever key casing the serving backend used
//! (`Name`/`name`, `EventName`/`eventName`/`event_name`, ...). Everything
//! past this module sees [`Booking`] only.

use serde_json::Value;
use crate::client::models::Booking;

const ID_KEYS: &[&str] = &["id", "Id", "ID"];
const NAME_KEYS: &[&str] = &["Name", "name"];
const PHONE_KEYS: &[&str] = &["Phone", "phone"];
const EMAIL_KEYS: &[&str] = &["Email", "email"];
const EVENT_NAME_KEYS: &[&str] = &["EventName", "eventName", "event_name"];

/// Never fails: absent or unusable keys become empty values.
pub fn normalize_booking(row: &Value) -> Booking {
    Booking {
        id: first_id(row, ID_KEYS),
        name: first_text(row, NAME_KEYS).unwrap_or_default(),
        phone: first_text(row, PHONE_KEYS).unwrap_or_default(),
        email: first_text(row, EMAIL_KEYS),
        event_name: first_text(row, EVENT_NAME_KEYS).unwrap_or_default(),
    }
}

pub fn normalize_bookings(rows: &[Value]) -> Vec<Booking> {
    rows.iter().map(normalize_booking).collect()
}

/// First key holding a non-empty string or a number.
fn first_text(row: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match row.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn first_id(row: &Value, keys: &[&str]) -> Option<i64> {
    keys.iter().find_map(|key| match row.get(key)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}
