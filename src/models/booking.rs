use crate::models::id::deserialize_opt_id;
use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A reserved time interval owned by one user
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawBooking")]
pub struct Booking {
    pub id: i64,
    pub user_id: Option<i64>,
    pub user_name: Option<String>,
    pub start_time: String,
    pub end_time: String,
    pub created_at: Option<String>,
}

/// Booking row as sent by the backend, which is not consistent about field
/// names across endpoints and sometimes sends both spellings at once.
#[derive(Deserialize)]
struct RawBooking {
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    booking_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    user_id: Option<i64>,
    #[serde(default, rename = "userId", deserialize_with = "deserialize_opt_id")]
    user_id_camel: Option<i64>,
    #[serde(default, rename = "userid", deserialize_with = "deserialize_opt_id")]
    user_id_lower: Option<i64>,
    #[serde(default)]
    user_name: Option<String>,
    #[serde(default)]
    start_time: Option<String>,
    #[serde(default, rename = "startTime")]
    start_time_camel: Option<String>,
    #[serde(default)]
    end_time: Option<String>,
    #[serde(default, rename = "endTime")]
    end_time_camel: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default, rename = "createdAt")]
    created_at_camel: Option<String>,
}

impl TryFrom<RawBooking> for Booking {
    type Error = String;

    fn try_from(raw: RawBooking) -> Result<Self, Self::Error> {
        Ok(Self {
            id: raw.id.or(raw.booking_id).ok_or("missing field `id`")?,
            user_id: raw.user_id.or(raw.user_id_camel).or(raw.user_id_lower),
            user_name: raw.user_name,
            start_time: raw
                .start_time
                .or(raw.start_time_camel)
                .ok_or("missing field `start_time`")?,
            end_time: raw
                .end_time
                .or(raw.end_time_camel)
                .ok_or("missing field `end_time`")?,
            created_at: raw.created_at.or(raw.created_at_camel),
        })
    }
}

impl Booking {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == Some(user_id)
    }

    /// Name for list rows: joined user name, else the numeric owner
    pub fn owner_label(&self) -> String {
        match (&self.user_name, self.user_id) {
            (Some(name), _) if !name.is_empty() => name.clone(),
            (_, Some(id)) => format!("User {}", id),
            _ => "Unknown user".to_string(),
        }
    }
}

/// Body of the booking create endpoints. Times are sent exactly as entered.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub user_id: i64,
    pub start_time: String,
    pub end_time: String,
}

/// Format a backend timestamp for display in local time.
/// Unparseable values are shown verbatim.
pub fn display_time(raw: &str) -> String {
    const DISPLAY: &str = "%Y-%m-%d %H:%M";

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.with_timezone(&Local).format(DISPLAY).to_string();
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return naive.format(DISPLAY).to_string();
        }
    }

    raw.to_string()
}
