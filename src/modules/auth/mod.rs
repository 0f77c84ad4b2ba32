//! Authentication module.
//!
//! Login, registration and "who am I" for customers and admins.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
