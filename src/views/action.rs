use crate::models::user::Role;
use std::fmt;

/// Something a dashboard can be asked to do
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    CreateBooking { start_time: String, end_time: String },
    DeleteBooking(i64),
    ViewUserBookings(i64),
    CreateUser { name: String, role: Role },
    DeleteUser(i64),
    ChangeRole { user_id: i64, role: Role },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    CreateBooking,
    DeleteBooking,
    ViewUserBookings,
    CreateUser,
    DeleteUser,
    ChangeRole,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::CreateBooking { .. } => ActionKind::CreateBooking,
            Action::DeleteBooking(_) => ActionKind::DeleteBooking,
            Action::ViewUserBookings(_) => ActionKind::ViewUserBookings,
            Action::CreateUser { .. } => ActionKind::CreateUser,
            Action::DeleteUser(_) => ActionKind::DeleteUser,
            Action::ChangeRole { .. } => ActionKind::ChangeRole,
        }
    }
}

impl ActionKind {
    /// What each role's dashboard offers
    pub fn permitted_for(role: Role) -> &'static [ActionKind] {
        match role {
            Role::Admin => &[
                ActionKind::CreateUser,
                ActionKind::DeleteUser,
                ActionKind::ChangeRole,
                ActionKind::DeleteBooking,
                ActionKind::ViewUserBookings,
            ],
            Role::Owner => &[
                ActionKind::CreateBooking,
                ActionKind::DeleteBooking,
                ActionKind::ViewUserBookings,
            ],
            Role::User => &[ActionKind::CreateBooking, ActionKind::DeleteBooking],
        }
    }

    /// Command line that triggers the action
    pub fn usage(&self) -> &'static str {
        match self {
            ActionKind::CreateBooking => "booking create <start> <end>",
            ActionKind::DeleteBooking => "booking delete <id>",
            ActionKind::ViewUserBookings => "bookings-by-user <user-id>",
            ActionKind::CreateUser => "user create <name> [role]",
            ActionKind::DeleteUser => "user delete <id>",
            ActionKind::ChangeRole => "user role <id> <role>",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ActionKind::CreateBooking => "create booking",
            ActionKind::DeleteBooking => "delete booking",
            ActionKind::ViewUserBookings => "view bookings by user",
            ActionKind::CreateUser => "create user",
            ActionKind::DeleteUser => "delete user",
            ActionKind::ChangeRole => "change role",
        };
        f.write_str(label)
    }
}
