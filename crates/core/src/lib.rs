//! Shared primitives for the portal client workspace.
//!
//! - [`types`]: id and timestamp aliases used by every wire DTO.
//! - [`error`]: [`ApiError`], the one error shape returned by every
//!   backend call.

pub mod error;
pub mod types;

pub use error::{ApiError, ApiResult};
