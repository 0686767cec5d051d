//! Request middleware.

pub mod service_token;
