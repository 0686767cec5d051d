//! HTTP route handlers.

pub mod collaborations;
pub mod health;
