//! HTTP access layer for the portal backend.
//!
//! - [`config`]: base URL and token-file settings loaded from the
//!   environment.
//! - [`session`]: the credential pair and the [`TokenStore`] it lives in.
//! - [`http`]: [`HttpClient`], the single chokepoint every backend call
//!   goes through (headers, JSON, uploads, exports, error shaping).

pub mod config;
pub mod http;
pub mod session;

pub use config::ClientConfig;
pub use http::{Download, HttpClient, Request};
pub use session::{FileTokenStore, MemoryTokenStore, Session, SessionError, TokenStore};
