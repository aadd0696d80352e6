use crate::api::client::{execute, fetch_json, AuthedClient};
use crate::core::error::ApiError;
use crate::models::booking::Booking;
use crate::models::user::{NewUser, Role, RoleChange, User};
use reqwest::Method;

/// `/admin/*` endpoints
pub struct AdminApi<'a> {
    client: &'a AuthedClient,
}

impl AuthedClient {
    pub fn admin(&self) -> AdminApi<'_> {
        AdminApi { client: self }
    }
}

impl AdminApi<'_> {
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        fetch_json(
            self.client.request(Method::GET, "/admin/users"),
            "Failed to fetch users",
        )
        .await
    }

    pub async fn create_user(&self, name: &str, role: Role) -> Result<(), ApiError> {
        let body = NewUser {
            name: name.to_string(),
            role,
        };
        execute(
            self.client.request(Method::POST, "/admin/users").json(&body),
            "Failed to create user",
        )
        .await
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), ApiError> {
        execute(
            self.client
                .request(Method::DELETE, &format!("/admin/users/{}", id)),
            "Failed to delete user",
        )
        .await
    }

    pub async fn change_user_role(&self, id: i64, role: Role) -> Result<(), ApiError> {
        execute(
            self.client
                .request(Method::PATCH, &format!("/admin/users/{}/role", id))
                .json(&RoleChange { role }),
            "Failed to update role",
        )
        .await
    }

    pub async fn list_bookings(&self) -> Result<Vec<Booking>, ApiError> {
        fetch_json(
            self.client.request(Method::GET, "/admin/bookings"),
            "Failed to fetch bookings",
        )
        .await
    }

    pub async fn delete_booking(&self, id: i64) -> Result<(), ApiError> {
        execute(
            self.client
                .request(Method::DELETE, &format!("/admin/deleteBookings/{}", id)),
            "Failed to delete booking",
        )
        .await
    }

    pub async fn bookings_by_user(&self, user_id: i64) -> Result<Vec<Booking>, ApiError> {
        fetch_json(
            self.client
                .request(Method::GET, &format!("/admin/bookingsByUser/{}", user_id)),
            "Failed to fetch user bookings",
        )
        .await
    }
}
