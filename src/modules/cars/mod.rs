//! Cars module.
//!
//! Listing, CRUD and renting of cars. Listing and reads are open to any
//! authenticated user; writes require `ADMIN`, renting requires `CUSTOMER`.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
