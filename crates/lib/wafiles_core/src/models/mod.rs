//! Wire models exchanged with the backend.
//!
//! Field names follow the backend's snake_case JSON; unknown fields are
//! ignored so server-side additions do not break decoding.

pub mod auth;
pub mod file;
pub mod session;
