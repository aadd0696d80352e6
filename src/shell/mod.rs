pub mod command;
pub mod router;
