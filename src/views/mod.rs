pub mod action;
pub mod admin;
pub mod chooser;
pub mod confirm;
pub mod notice;
pub mod owner;
pub mod topbar;
pub mod user;

use crate::api::client::AuthedClient;
use crate::models::booking::{display_time, Booking};
use crate::models::user::Role;
use crate::views::action::{Action, ActionKind};
use crate::views::admin::AdminView;
use crate::views::confirm::Confirm;
use crate::views::notice::Notice;
use crate::views::owner::OwnerView;
use crate::views::user::UserView;
use std::fmt::Write;

/// The dashboard mounted for the session's role
pub enum RoleView {
    Admin(AdminView),
    Owner(OwnerView),
    User(UserView),
}

impl RoleView {
    pub fn for_role(role: Role, client: AuthedClient) -> Self {
        match role {
            Role::Admin => RoleView::Admin(AdminView::new(client)),
            Role::Owner => RoleView::Owner(OwnerView::new(client)),
            Role::User => RoleView::User(UserView::new(client)),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            RoleView::Admin(_) => Role::Admin,
            RoleView::Owner(_) => Role::Owner,
            RoleView::User(_) => Role::User,
        }
    }

    pub async fn mount(&mut self) {
        match self {
            RoleView::Admin(view) => view.mount().await,
            RoleView::Owner(view) => view.mount().await,
            RoleView::User(view) => view.mount().await,
        }
    }

    pub async fn dispatch(&mut self, action: Action, confirm: &mut dyn Confirm) {
        match self {
            RoleView::Admin(view) => view.dispatch(action, confirm).await,
            RoleView::Owner(view) => view.dispatch(action, confirm).await,
            RoleView::User(view) => view.dispatch(action, confirm).await,
        }
    }

    pub fn notice_mut(&mut self) -> &mut Notice {
        match self {
            RoleView::Admin(view) => view.notice_mut(),
            RoleView::Owner(view) => view.notice_mut(),
            RoleView::User(view) => view.notice_mut(),
        }
    }

    pub fn render(&self) -> String {
        match self {
            RoleView::Admin(view) => view.render(),
            RoleView::Owner(view) => view.render(),
            RoleView::User(view) => view.render(),
        }
    }
}

/// Which optional columns a booking row shows
#[derive(Debug, Clone, Copy)]
pub(crate) struct BookingColumns {
    owner: bool,
    created: bool,
}

impl BookingColumns {
    pub(crate) fn full() -> Self {
        Self {
            owner: true,
            created: true,
        }
    }

    pub(crate) fn with_owner() -> Self {
        Self {
            owner: true,
            created: false,
        }
    }

    pub(crate) fn with_created() -> Self {
        Self {
            owner: false,
            created: true,
        }
    }

    pub(crate) fn times() -> Self {
        Self {
            owner: false,
            created: false,
        }
    }
}

pub(crate) fn render_booking(
    out: &mut String,
    booking: &Booking,
    columns: BookingColumns,
    deletable: bool,
) {
    let _ = write!(out, "  #{}", booking.id);
    if columns.owner {
        let _ = write!(out, "  User: {}", booking.owner_label());
    }
    let _ = write!(
        out,
        "  Start: {}  End: {}",
        display_time(&booking.start_time),
        display_time(&booking.end_time)
    );
    if columns.created {
        if let Some(created) = &booking.created_at {
            let _ = write!(out, "  Created: {}", display_time(created));
        }
    }
    if deletable {
        let _ = write!(out, "  -> delete");
    }
    let _ = writeln!(out);
}

pub(crate) fn render_actions(out: &mut String, actions: &[ActionKind]) {
    let _ = writeln!(out, "\nAvailable actions:");
    for action in actions {
        let _ = writeln!(out, "  {:<24} {}", action.to_string(), action.usage());
    }
}
