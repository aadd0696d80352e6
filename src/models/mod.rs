pub mod booking;
pub mod id;
pub mod summary;
pub mod user;
