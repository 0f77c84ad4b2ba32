pub mod application;
pub mod auth;
pub mod cars;
