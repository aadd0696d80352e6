use crate::models::id::{deserialize_count, deserialize_id};
use serde::Deserialize;

/// One row of `GET /owner/usage-summary`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UsageSummary {
    #[serde(alias = "userId", deserialize_with = "deserialize_id")]
    pub user_id: i64,
    #[serde(alias = "userName")]
    pub user_name: String,
    #[serde(alias = "totalBookings", deserialize_with = "deserialize_count")]
    pub total_bookings: i64,
}
