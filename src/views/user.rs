use crate::api::client::AuthedClient;
use crate::core::error::ViewError;
use crate::models::booking::Booking;
use crate::models::user::Role;
use crate::views::action::{Action, ActionKind};
use crate::views::confirm::Confirm;
use crate::views::notice::Notice;
use crate::views::{render_actions, render_booking, BookingColumns};
use std::fmt::Write;
use tracing::{info, warn};

const DELETE_BOOKING_PROMPT: &str = "Are you sure you want to delete this booking?";

/// Regular user dashboard: the user's own bookings
pub struct UserView {
    client: AuthedClient,
    bookings: Vec<Booking>,
    notice: Notice,
}

impl UserView {
    pub fn new(client: AuthedClient) -> Self {
        Self {
            client,
            bookings: Vec::new(),
            notice: Notice::default(),
        }
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn notice(&self) -> &Notice {
        &self.notice
    }

    pub fn notice_mut(&mut self) -> &mut Notice {
        &mut self.notice
    }

    pub fn permitted_actions(&self) -> &'static [ActionKind] {
        ActionKind::permitted_for(Role::User)
    }

    pub async fn mount(&mut self) {
        match self.client.user().list_bookings().await {
            Ok(bookings) => self.bookings = bookings,
            Err(e) => {
                warn!(error = %e, "Failed to fetch bookings");
                self.notice.set_error("Failed to fetch bookings");
            }
        }
    }

    fn owns(&self, booking: &Booking) -> bool {
        booking.is_owned_by(self.client.identity().user_id)
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
            return Err(ViewError::NotPermitted(Role::User));
        }

        match action {
            Action::CreateBooking {
                start_time,
                end_time,
            } => {
                self.notice.dismiss();
                self.client
                    .user()
                    .create_booking(&start_time, &end_time)
                    .await?;
                info!(start_time = %start_time, end_time = %end_time, "Booking created");
                self.mount().await;
                Ok(Some("Booking created successfully!"))
            }
            Action::DeleteBooking(id) => {
                // Only bookings listed as ours get a delete affordance
                if !self.bookings.iter().any(|b| b.id == id && self.owns(b)) {
                    return Err(ViewError::NotOwnBooking(id));
                }
                if !confirm.confirm(DELETE_BOOKING_PROMPT) {
                    return Ok(None);
                }
                self.notice.dismiss();
                self.client.user().delete_booking(id).await?;
                info!(booking_id = id, "Booking deleted");
                self.mount().await;
                Ok(Some("Booking deleted successfully!"))
            }
            _ => Err(ViewError::NotPermitted(Role::User)),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "== My Bookings ==");
        self.notice.render(&mut out);

        let _ = writeln!(out);
        if self.bookings.is_empty() {
            let _ = writeln!(out, "  No bookings yet");
        }
        for booking in &self.bookings {
            render_booking(&mut out, booking, BookingColumns::with_created(), self.owns(booking));
        }

        render_actions(&mut out, self.permitted_actions());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{session_for, MockBackend};
    use crate::views::confirm::{AssumeYes, Scripted};

    async fn mounted(backend: &MockBackend) -> UserView {
        let client = backend.client().identify(&session_for(3, "Uma", Role::User));
        let mut view = UserView::new(client);
        view.mount().await;
        view
    }

    #[tokio::test]
    async fn test_mount_decodes_camel_case_bookings() {
        let backend = MockBackend::start().await;
        let view = mounted(&backend).await;

        assert_eq!(view.bookings().len(), 1);
        assert_eq!(view.bookings()[0].user_id, Some(3));
        assert_eq!(view.bookings()[0].start_time, "2025-06-02T09:00:00");
    }

    #[tokio::test]
    async fn test_end_before_start_is_accepted() {
        let backend = MockBackend::start().await;
        let mut view = mounted(&backend).await;

        view.dispatch(
            Action::CreateBooking {
                start_time: "2025-07-01T17:00".to_string(),
                end_time: "2025-07-01T08:00".to_string(),
            },
            &mut AssumeYes,
        )
        .await;

        assert_eq!(view.notice().success(), Some("Booking created successfully!"));
        assert_eq!(view.bookings().len(), 2);
        assert_eq!(backend.count("POST", "/api/user/bookings"), 1);
    }

    #[tokio::test]
    async fn test_cannot_delete_foreign_booking() {
        let backend = MockBackend::start().await;
        let mut view = mounted(&backend).await;
        let mut confirm = Scripted::answering(true);

        // Booking 11 belongs to Olive
        view.dispatch(Action::DeleteBooking(11), &mut confirm).await;

        assert_eq!(view.notice().error(), Some("Booking 11 is not one of your bookings"));
        assert!(confirm.prompts.is_empty());
        assert_eq!(backend.booking_count(), 2);
    }

    #[tokio::test]
    async fn test_delete_own_booking() {
        let backend = MockBackend::start().await;
        let mut view = mounted(&backend).await;

        view.dispatch(Action::DeleteBooking(10), &mut AssumeYes).await;

        assert_eq!(view.notice().success(), Some("Booking deleted successfully!"));
        assert!(view.bookings().is_empty());
        assert_eq!(backend.count("DELETE", "/api/user/bookings/10"), 1);
    }

    #[tokio::test]
    async fn test_user_cannot_change_roles() {
        let backend = MockBackend::start().await;
        let mut view = mounted(&backend).await;

        view.dispatch(
            Action::ChangeRole {
                user_id: 3,
                role: Role::Admin,
            },
            &mut AssumeYes,
        )
        .await;

        assert_eq!(view.notice().error(), Some("Action not permitted for role user"));
        assert!(backend.requests().iter().all(|r| r.method == "GET"));

        let text = view.render();
        assert!(!text.contains("change role"));
        assert!(!text.contains("create user"));
    }

    #[tokio::test]
    async fn test_fetch_failure_message() {
        let backend = MockBackend::start().await;
        backend.fail("GET /api/user/bookings");
        let view = mounted(&backend).await;

        assert_eq!(view.notice().error(), Some("Failed to fetch bookings"));
        assert!(view.render().contains("No bookings yet"));
    }

    #[tokio::test]
    async fn test_declined_delete_keeps_notice() {
        let backend = MockBackend::start().await;
        let mut view = mounted(&backend).await;

        view.dispatch(
            Action::CreateBooking {
                start_time: "2025-07-02T09:00".to_string(),
                end_time: "2025-07-02T10:00".to_string(),
            },
            &mut AssumeYes,
        )
        .await;
        view.dispatch(Action::DeleteBooking(10), &mut Scripted::answering(false)).await;

        assert_eq!(view.notice().success(), Some("Booking created successfully!"));
        assert_eq!(backend.count("DELETE", "/api/user/bookings/10"), 0);
    }
}
