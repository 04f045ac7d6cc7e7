pub mod auth;
pub mod matches;
pub mod users;
