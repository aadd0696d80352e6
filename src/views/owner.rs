use crate::api::client::AuthedClient;
use crate::core::error::{ApiError, ViewError};
use crate::models::booking::Booking;
use crate::models::summary::UsageSummary;
use crate::models::user::{Role, User};
use crate::views::action::{Action, ActionKind};
use crate::views::confirm::Confirm;
use crate::views::notice::Notice;
use crate::views::{render_actions, render_booking, BookingColumns};
use std::fmt::Write;
use tracing::{info, warn};

const DELETE_BOOKING_PROMPT: &str = "Are you sure you want to delete this booking?";

/// Owner dashboard: all bookings, non-admin users and usage totals
pub struct OwnerView {
    client: AuthedClient,
    bookings: Vec<Booking>,
    users: Vec<User>,
    usage: Vec<UsageSummary>,
    selected_user: Option<i64>,
    user_bookings: Vec<Booking>,
    notice: Notice,
}

impl OwnerView {
    pub fn new(client: AuthedClient) -> Self {
        Self {
            client,
            bookings: Vec::new(),
            users: Vec::new(),
            usage: Vec::new(),
            selected_user: None,
            user_bookings: Vec::new(),
            notice: Notice::default(),
        }
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn usage(&self) -> &[UsageSummary] {
        &self.usage
    }

    pub fn user_bookings(&self) -> &[Booking] {
        &self.user_bookings
    }

    pub fn notice(&self) -> &Notice {
        &self.notice
    }

    pub fn notice_mut(&mut self) -> &mut Notice {
        &mut self.notice
    }

    pub fn permitted_actions(&self) -> &'static [ActionKind] {
        ActionKind::permitted_for(Role::Owner)
    }

    pub async fn mount(&mut self) {
        let api = self.client.owner();
        let (bookings, users, usage) =
            tokio::join!(api.list_bookings(), api.list_users(), api.usage_summary());

        self.apply_bookings(bookings);
        self.apply_users(users);
        self.apply_usage(usage);
    }

    async fn fetch_user_bookings(&mut self, user_id: i64) {
        match self.client.owner().bookings_by_user(user_id).await {
            Ok(bookings) => self.user_bookings = bookings,
            Err(e) => {
                warn!(error = %e, user_id, "Failed to fetch user bookings");
                self.notice.set_error("Failed to fetch user bookings");
            }
        }
    }

    fn apply_bookings(&mut self, result: Result<Vec<Booking>, ApiError>) {
        match result {
            Ok(bookings) => self.bookings = bookings,
            Err(e) => {
                warn!(error = %e, "Failed to fetch bookings");
                self.notice.set_error("Failed to fetch bookings");
            }
        }
    }

    fn apply_users(&mut self, result: Result<Vec<User>, ApiError>) {
        match result {
            // Owners never manage admins
            Ok(users) => self.users = users.into_iter().filter(|u| u.role != Role::Admin).collect(),
            Err(e) => {
                warn!(error = %e, "Failed to fetch users");
                self.notice.set_error("Failed to fetch users");
            }
        }
    }

    fn apply_usage(&mut self, result: Result<Vec<UsageSummary>, ApiError>) {
        match result {
            Ok(usage) => self.usage = usage,
            Err(e) => {
                warn!(error = %e, "Failed to fetch usage summary");
                self.notice.set_error("Failed to fetch usage summary");
            }
        }
    }

    /// Reload everything the dashboard shows, including the selected user's list
    async fn refresh(&mut self) {
        self.mount().await;
        if let Some(user_id) = self.selected_user {
            self.fetch_user_bookings(user_id).await;
        }
    }

    pub async fn dispatch(&mut self, action: Action, confirm: &mut dyn Confirm) {
        match self.apply(action, confirm).await {
            Ok(Some(message)) => self.notice.set_success(message),
            Ok(None) => {}
            Err(e) => {
                self.notice.dismiss();
                self.notice.set_error(e.to_string());
            }
        }
    }

    async fn apply(
        &mut self,
        action: Action,
        confirm: &mut dyn Confirm,
    ) -> Result<Option<&'static str>, ViewError> {
        if !self.permitted_actions().contains(&action.kind()) {
            return Err(ViewError::NotPermitted(Role::Owner));
        }

        match action {
            Action::CreateBooking {
                start_time,
                end_time,
            } => {
                self.notice.dismiss();
                self.client
                    .owner()
                    .create_booking(&start_time, &end_time)
                    .await?;
                info!(start_time = %start_time, end_time = %end_time, "Booking created");
                self.refresh().await;
                Ok(Some("Booking created successfully!"))
            }
            Action::DeleteBooking(id) => {
                if !confirm.confirm(DELETE_BOOKING_PROMPT) {
                    return Ok(None);
                }
                self.notice.dismiss();
                self.client.owner().delete_booking(id).await?;
                info!(booking_id = id, "Booking deleted");
                self.refresh().await;
                Ok(Some("Booking deleted successfully!"))
            }
            Action::ViewUserBookings(user_id) => {
                if !self.users.iter().any(|u| u.id == user_id) {
                    return Err(ViewError::UnknownUser(user_id));
                }
                self.selected_user = Some(user_id);
                self.fetch_user_bookings(user_id).await;
                Ok(None)
            }
            Action::CreateUser { .. } | Action::DeleteUser(_) | Action::ChangeRole { .. } => {
                Err(ViewError::NotPermitted(Role::Owner))
            }
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "== Owner Dashboard ==");
        self.notice.render(&mut out);

        let _ = writeln!(out, "\nUsage Summary");
        if self.usage.is_empty() {
            let _ = writeln!(out, "  No usage data available");
        }
        for row in &self.usage {
            let _ = writeln!(out, "  {}  {} bookings", row.user_name, row.total_bookings);
        }

        let _ = writeln!(out, "\nAll Bookings ({})", self.bookings.len());
        if self.bookings.is_empty() {
            let _ = writeln!(out, "  No bookings found");
        }
        for booking in &self.bookings {
            render_booking(&mut out, booking, BookingColumns::with_owner(), true);
        }

        let _ = writeln!(out, "\nUsers");
        for user in &self.users {
            let marker = if self.selected_user == Some(user.id) { "*" } else { " " };
            let _ = writeln!(out, " {} #{}  {} ({})", marker, user.id, user.name, user.role);
        }

        if let Some(user_id) = self.selected_user {
            let _ = writeln!(out, "\nBookings for user #{}", user_id);
            if self.user_bookings.is_empty() {
                let _ = writeln!(out, "  No bookings for this user");
            }
            for booking in &self.user_bookings {
                render_booking(&mut out, booking, BookingColumns::times(), false);
            }
        }

        render_actions(&mut out, self.permitted_actions());
        out
    }
}
