use crate::api::client::AuthedClient;
use crate::core::error::{ApiError, ViewError};
use crate::models::booking::Booking;
use crate::models::user::{Role, User};
use crate::views::action::{Action, ActionKind};
use crate::views::confirm::Confirm;
use crate::views::notice::Notice;
use crate::views::{render_actions, render_booking, BookingColumns};
use std::fmt::Write;
use tracing::{info, warn};

const DELETE_USER_PROMPT: &str =
    "Are you sure you want to delete this user? Their bookings will also be deleted.";
const DELETE_BOOKING_PROMPT: &str = "Are you sure you want to delete this booking?";

/// Admin dashboard: every user and every booking
pub struct AdminView {
    client: AuthedClient,
    users: Vec<User>,
    bookings: Vec<Booking>,
    selected_user: Option<i64>,
    user_bookings: Vec<Booking>,
    notice: Notice,
}

impl AdminView {
    pub fn new(client: AuthedClient) -> Self {
        Self {
            client,
            users: Vec::new(),
            bookings: Vec::new(),
            selected_user: None,
            user_bookings: Vec::new(),
            notice: Notice::default(),
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
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
        ActionKind::permitted_for(Role::Admin)
    }

    fn self_id(&self) -> i64 {
        self.client.identity().user_id
    }

    pub async fn mount(&mut self) {
        let api = self.client.admin();
        let (users, bookings) = tokio::join!(api.list_users(), api.list_bookings());
        self.apply_users(users);
        self.apply_bookings(bookings);
    }

    async fn fetch_users(&mut self) {
        let users = self.client.admin().list_users().await;
        self.apply_users(users);
    }

    async fn fetch_bookings(&mut self) {
        let bookings = self.client.admin().list_bookings().await;
        self.apply_bookings(bookings);
    }

    async fn fetch_user_bookings(&mut self, user_id: i64) {
        match self.client.admin().bookings_by_user(user_id).await {
            Ok(bookings) => self.user_bookings = bookings,
            Err(e) => {
                warn!(error = %e, user_id, "Failed to fetch user bookings");
                self.notice.set_error("Failed to fetch user bookings");
            }
        }
    }

    fn apply_users(&mut self, result: Result<Vec<User>, ApiError>) {
        match result {
            Ok(users) => self.users = users,
            Err(e) => {
                warn!(error = %e, "Failed to fetch users");
                self.notice.set_error("Failed to fetch users");
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

    /// Run an action; the outcome lands in the notice.
    /// A declined confirmation leaves the notice as it was.
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
            return Err(ViewError::NotPermitted(Role::Admin));
        }

        match action {
            Action::CreateUser { name, role } => {
                self.notice.dismiss();
                self.client.admin().create_user(&name, role).await?;
                info!(name = %name, role = %role, "User created");
                self.fetch_users().await;
                Ok(Some("User created successfully!"))
            }
            Action::DeleteUser(id) => {
                if id == self.self_id() {
                    return Err(ViewError::SelfModification);
                }
                if !confirm.confirm(DELETE_USER_PROMPT) {
                    return Ok(None);
                }
                self.notice.dismiss();
                self.client.admin().delete_user(id).await?;
                info!(user_id = id, "User deleted");
                if self.selected_user == Some(id) {
                    self.selected_user = None;
                    self.user_bookings.clear();
                }
                self.mount().await;
                Ok(Some("User deleted successfully!"))
            }
            Action::ChangeRole { user_id, role } => {
                if user_id == self.self_id() {
                    return Err(ViewError::SelfModification);
                }
                self.notice.dismiss();
                self.client.admin().change_user_role(user_id, role).await?;
                info!(user_id, role = %role, "User role changed");
                self.fetch_users().await;
                Ok(Some("User role updated successfully!"))
            }
            Action::DeleteBooking(id) => {
                if !confirm.confirm(DELETE_BOOKING_PROMPT) {
                    return Ok(None);
                }
                self.notice.dismiss();
                self.client.admin().delete_booking(id).await?;
                info!(booking_id = id, "Booking deleted");
                self.fetch_bookings().await;
                if let Some(user_id) = self.selected_user {
                    self.fetch_user_bookings(user_id).await;
                }
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
            Action::CreateBooking { .. } => Err(ViewError::NotPermitted(Role::Admin)),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let me = self.self_id();

        let _ = writeln!(out, "== Admin Dashboard ==");
        self.notice.render(&mut out);

        let _ = writeln!(out, "\nUsers ({})", self.users.len());
        if self.users.is_empty() {
            let _ = writeln!(out, "  No users found");
        }
        for user in &self.users {
            if user.id == me {
                let _ = writeln!(out, "  #{}  {}  [{}]  (you)", user.id, user.name, user.role);
            } else {
                let _ = writeln!(
                    out,
                    "  #{}  {}  [{}]  -> change role | delete",
                    user.id, user.name, user.role
                );
            }
        }

        let _ = writeln!(out, "\nAll Bookings ({})", self.bookings.len());
        if self.bookings.is_empty() {
            let _ = writeln!(out, "  No bookings found");
        }
        for booking in &self.bookings {
            render_booking(&mut out, booking, BookingColumns::full(), true);
        }

        if let Some(user_id) = self.selected_user {
            let name = self
                .users
                .iter()
                .find(|u| u.id == user_id)
                .map(|u| u.name.as_str())
                .unwrap_or("unknown");
            let _ = writeln!(out, "\nBookings for {} (#{})", name, user_id);
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
