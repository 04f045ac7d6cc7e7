pub mod matches;
pub mod users;

pub use matches::MatchRepo;
pub use users::{CreateUser, UpdateUser, UserRepo};
