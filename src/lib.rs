pub mod api;
pub mod core;
pub mod models;
pub mod session;
pub mod shell;
pub mod views;

#[cfg(test)]
pub(crate) mod testing;
