pub mod app;
pub mod auth;
pub mod error;
pub mod routes;
pub mod state;
pub mod uploads;

pub use state::AppState;
