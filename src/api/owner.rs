use crate::api::client::{execute, fetch_json, AuthedClient};
use crate::core::error::ApiError;
use crate::models::booking::{Booking, NewBooking};
use crate::models::summary::UsageSummary;
use crate::models::user::User;
use reqwest::Method;

/// `/owner/*` endpoints
pub struct OwnerApi<'a> {
    client: &'a AuthedClient,
}

impl AuthedClient {
    pub fn owner(&self) -> OwnerApi<'_> {
        OwnerApi { client: self }
    }
}

impl OwnerApi<'_> {
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        fetch_json(
            self.client.request(Method::GET, "/owner/users"),
            "Failed to fetch users",
        )
        .await
    }

    pub async fn create_booking(&self, start_time: &str, end_time: &str) -> Result<(), ApiError> {
        let body = NewBooking {
            user_id: self.client.identity().user_id,
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
        };
        execute(
            self.client
                .request(Method::POST, "/owner/createBookings")
                .json(&body),
            "Failed to create booking",
        )
        .await
    }

    pub async fn delete_booking(&self, id: i64) -> Result<(), ApiError> {
        execute(
            self.client
                .request(Method::DELETE, &format!("/owner/deleteBookings/{}", id)),
            "Failed to delete booking",
        )
        .await
    }

    pub async fn list_bookings(&self) -> Result<Vec<Booking>, ApiError> {
        fetch_json(
            self.client.request(Method::GET, "/owner/bookings"),
            "Failed to fetch bookings",
        )
        .await
    }

    pub async fn bookings_by_user(&self, user_id: i64) -> Result<Vec<Booking>, ApiError> {
        fetch_json(
            self.client
                .request(Method::GET, &format!("/owner/bookingsByUser/{}", user_id)),
            "Failed to fetch user bookings",
        )
        .await
    }

    pub async fn usage_summary(&self) -> Result<Vec<UsageSummary>, ApiError> {
        fetch_json(
            self.client.request(Method::GET, "/owner/usage-summary"),
            "Failed to fetch usage summary",
        )
        .await
    }
}
