//! Health check, fallback and last-resort error rendering.

pub mod controller;
pub mod router;
