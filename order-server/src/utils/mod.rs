//! Utility module - shared helpers and types
//!
//! # Contents
//!
//! - [`AppError`] / [`ErrorResponse`] - application error type and error envelope
//! - [`AppResult`] - handler Result alias
//! - logging setup

pub mod error;
pub mod logger;
pub mod result;

pub use error::{AppError, ErrorResponse};
pub use result::AppResult;
