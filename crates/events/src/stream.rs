//! Subscription to the backend's notification feed.
//!
//! The feed is a server-sent event stream at `/notifications/stream`.
//! The access token travels as a `token` query parameter rather than an
//! `Authorization` header, matching what the backend accepts for this
//! endpoint.
//!
//! [`NotificationStream::subscribe`] opens the connection and spawns a
//! reader task; [`NotificationStream::close`] (or dropping the handle)
//! cancels it and releases the connection.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use portal_client::{HttpClient, Request};
use portal_core::{ApiError, ApiResult};
use portal_models::notification::Notification;

use crate::sse::{SseEvent, SseParser};

/// Path of the notification feed.
pub const STREAM_ENDPOINT: &str = "/notifications/stream";

/// Buffered events between the reader task and the consumer.
const CHANNEL_CAPACITY: usize = 32;

/// An event delivered by the notification feed.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// The backend acknowledged the subscription. Payload is passed through
    /// as-is (a JSON string if it was not JSON).
    Connected(serde_json::Value),
    /// A new notification for the current user.
    Notification(Notification),
    /// The backend reported an error, a payload failed to decode, or the
    /// connection broke. A transport error is always the last event.
    Error(ApiError),
}

/// Handle to an open notification feed.
///
/// Yields [`StreamEvent`]s via [`next`](Self::next) or as a
/// [`futures::Stream`].
pub struct NotificationStream {
    events: mpsc::Receiver<StreamEvent>,
    cancel: CancellationToken,
}

impl NotificationStream {
    /// Open the feed for the session's current access token.
    ///
    /// Fails with [`ApiError::Validation`] when the session has no token,
    /// or with the usual HTTP/transport errors if the backend refuses the
    /// connection.
    pub async fn subscribe(client: &HttpClient) -> ApiResult<Self> {
        let token = client
            .session()
            .access_token()
            .ok_or_else(|| ApiError::validation("not authenticated: no access token"))?;

        let request = Request::get(STREAM_ENDPOINT)
            .param("token", token)
            .accept("text/event-stream")
            .skip_auth();

        let response = client.open_stream(request).await?;

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let cancel = CancellationToken::new();
        tokio::spawn(read_events(response, tx, cancel.clone()));

        tracing::info!("Notification stream connected");

        Ok(Self { events: rx, cancel })
    }

    /// Wait for the next event. Returns `None` once the stream has ended
    /// or been closed.
    pub async fn next(&mut self) -> Option<StreamEvent> {
        self.events.recv().await
    }

    /// Stop reading and drop the connection. Events already buffered are
    /// discarded.
    pub fn close(&mut self) {
        if !self.cancel.is_cancelled() {
            tracing::info!("Notification stream closed");
        }
        self.cancel.cancel();
        self.events.close();
        while self.events.try_recv().is_ok() {}
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Stream for NotificationStream {
    type Item = StreamEvent;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().events.poll_recv(cx)
    }
}

impl Drop for NotificationStream {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Reader task: parse the body and forward mapped events until the
/// stream ends, the consumer goes away, or `cancel` fires.
async fn read_events(
    response: reqwest::Response,
    tx: mpsc::Sender<StreamEvent>,
    cancel: CancellationToken,
) {
    let mut body = response.bytes_stream();
    let mut parser = SseParser::new();

    loop {
        let chunk = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("Notification reader cancelled");
                return;
            }
            chunk = body.next() => chunk,
        };

        match chunk {
            Some(Ok(bytes)) => {
                let events = match parser.push(&bytes) {
                    Ok(events) => events,
                    Err(e) => {
                        tracing::warn!(error = %e, "Notification stream sent a malformed frame");
                        forward(&tx, &cancel, StreamEvent::Error(e)).await;
                        return;
                    }
                };
                for event in events {
                    let Some(mapped) = map_event(event) else {
                        continue;
                    };
                    if !forward(&tx, &cancel, mapped).await {
                        return;
                    }
                }
            }
            Some(Err(e)) => {
                tracing::warn!(error = %e, "Notification stream broke");
                forward(&tx, &cancel, StreamEvent::Error(ApiError::transport(e.to_string()))).await;
                return;
            }
            None => {
                tracing::debug!("Notification stream ended by backend");
                return;
            }
        }
    }
}

/// Send one event to the consumer. Returns `false` when reading should stop.
async fn forward(
    tx: &mpsc::Sender<StreamEvent>,
    cancel: &CancellationToken,
    event: StreamEvent,
) -> bool {
    tokio::select! {
        _ = cancel.cancelled() => false,
        sent = tx.send(event) => sent.is_ok(),
    }
}

/// Translate a raw SSE frame into a [`StreamEvent`]. Unknown event names
/// are skipped.
fn map_event(event: SseEvent) -> Option<StreamEvent> {
    match event.event.as_str() {
        "connected" => {
            let payload = serde_json::from_str(&event.data)
                .unwrap_or(serde_json::Value::String(event.data));
            Some(StreamEvent::Connected(payload))
        }
        "notification" => match serde_json::from_str::<Notification>(&event.data) {
            Ok(notification) => Some(StreamEvent::Notification(notification)),
            Err(e) => {
                tracing::warn!(error = %e, "Undecodable notification payload");
                Some(StreamEvent::Error(ApiError::Decode {
                    status_code: 200,
                    detail: e.to_string(),
                }))
            }
        },
        "error" => {
            let detail = if event.data.is_empty() {
                "notification stream error".to_string()
            } else {
                event.data
            };
            Some(StreamEvent::Error(ApiError::Stream { detail }))
        }
        other => {
            tracing::debug!(event = other, "Ignoring unknown stream event");
            None
        }
    }
}
