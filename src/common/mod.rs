pub mod auth;
pub mod database;
pub mod errors;
pub mod models;
pub mod state;
pub mod views;

#[cfg(test)]
mod tests;
