pub mod db;
pub mod models;
pub mod pagination;
pub mod repos;
pub mod rules;
pub mod stats;
