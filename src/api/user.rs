use crate::api::client::{execute, fetch_json, AuthedClient};
use crate::core::error::ApiError;
use crate::models::booking::{Booking, NewBooking};
use reqwest::Method;

/// `/user/*` endpoints
pub struct UserApi<'a> {
    client: &'a AuthedClient,
}

impl AuthedClient {
    pub fn user(&self) -> UserApi<'_> {
        UserApi { client: self }
    }
}

impl UserApi<'_> {
    pub async fn create_booking(&self, start_time: &str, end_time: &str) -> Result<(), ApiError> {
        let body = NewBooking {
            user_id: self.client.identity().user_id,
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
        };
        execute(
            self.client.request(Method::POST, "/user/bookings").json(&body),
            "Failed to create booking",
        )
        .await
    }

    pub async fn list_bookings(&self) -> Result<Vec<Booking>, ApiError> {
        fetch_json(
            self.client.request(Method::GET, "/user/bookings"),
            "Failed to fetch bookings",
        )
        .await
    }

    pub async fn delete_booking(&self, id: i64) -> Result<(), ApiError> {
        execute(
            self.client
                .request(Method::DELETE, &format!("/user/bookings/{}", id)),
            "Failed to delete booking",
        )
        .await
    }
}
