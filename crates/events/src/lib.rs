//! Live event plumbing for the portal client.
//!
//! - [`sse`]: incremental `text/event-stream` parser.
//! - [`stream`]: [`NotificationStream`], the subscribe/close handle for
//!   the backend's notification feed.
//! - [`bus`]: [`EventBus`], in-process fan-out used to announce session
//!   changes.

pub mod bus;
pub mod sse;
pub mod stream;

pub use bus::EventBus;
pub use sse::{SseEvent, SseParser};
pub use stream::{NotificationStream, StreamEvent};
