// Centralized error handling for the booking client

use crate::models::user::{Role, UnknownRole};
use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while talking to the booking backend
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("{message}")]
    Status { status: StatusCode, message: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors raised by a view before or while dispatching an action
#[derive(Error, Debug)]
pub enum ViewError {
    #[error("Action not permitted for role {0}")]
    NotPermitted(Role),

    #[error("No user with id {0}")]
    UnknownUser(i64),

    #[error("You cannot change or delete your own account")]
    SelfModification,

    #[error("Booking {0} is not one of your bookings")]
    NotOwnBooking(i64),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors raised while parsing a command line
#[derive(Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),

    #[error("Invalid id '{0}'")]
    InvalidId(String),

    #[error(transparent)]
    InvalidRole(#[from] UnknownRole),
}
