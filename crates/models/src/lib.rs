//! Wire DTOs for the portal REST backend.
//!
//! One module per backend resource. Response records mirror the backend
//! JSON; request records that carry user input derive
//! [`validator::Validate`] and are checked before they are sent.

pub mod analytics;
pub mod auth;
pub mod blog;
pub mod common;
pub mod contact;
pub mod file;
pub mod gamification;
pub mod newsletter;
pub mod notification;
pub mod project;
pub mod report;
pub mod resource;
pub mod search;
pub mod task;
pub mod user;
pub mod volunteer;

pub use common::{MessageResponse, NewComment, Page};
