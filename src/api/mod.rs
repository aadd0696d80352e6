pub mod admin;
pub mod client;
pub mod owner;
pub mod user;
