//! Event-stream subscription.
//!
//! Opens a long-lived Server-Sent Events feed over HTTP and forwards every
//! `message` event to the dashboard through an mpsc channel, in arrival
//! order. The subscription reconnects on its own when the feed drops; the
//! dashboard only ever sees [`StreamMessage`] values.

pub mod parser;

pub use parser::{EventParser, ServerEvent, DEFAULT_EVENT_TYPE};

use futures::StreamExt;
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;

/// Messages delivered from the subscription task to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamMessage {
    /// The feed is open.
    Connected,
    /// A `message` event arrived.
    Event(ServerEvent),
    /// The feed dropped; a reconnect is scheduled.
    Disconnected(String),
}

/// Reasons a single connection attempt ended.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The HTTP request could not be sent.
    #[error("request to {url} failed")]
    Request {
        /// Endpoint URL.
        url: String,
        /// Transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("server answered {status} for {url}")]
    Status {
        /// Endpoint URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// Reading the response body failed.
    #[error("error reading event stream from {url}")]
    Read {
        /// Endpoint URL.
        url: String,
        /// Transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The server closed the response.
    #[error("event stream from {url} ended")]
    Ended {
        /// Endpoint URL.
        url: String,
    },
}

/// A reconnecting subscription to one endpoint.
#[derive(Debug)]
pub struct Subscription {
    url: String,
    reconnect_delay: Duration,
    client: reqwest::Client,
    parser: EventParser,
}

impl Subscription {
    /// Creates a subscription for `url`. `reconnect_delay` applies until the
    /// server sends its own `retry:` value.
    pub fn new(url: impl Into<String>, reconnect_delay: Duration) -> Self {
        Self {
            url: url.into(),
            reconnect_delay,
            client: reqwest::Client::new(),
            parser: EventParser::new(),
        }
    }

    /// Endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Runs until the receiving side of `tx` is dropped.
    pub async fn run(mut self, tx: mpsc::Sender<StreamMessage>) {
        loop {
            let err = match self.connect_once(&tx).await {
                Ok(()) => return,
                Err(err) => err,
            };
            let delay = self.parser.retry().unwrap_or(self.reconnect_delay);
            tracing::warn!("{}; reconnecting in {:?}", err, delay);
            if tx
                .send(StreamMessage::Disconnected(err.to_string()))
                .await
                .is_err()
            {
                return;
            }
            tokio::time::sleep(delay).await;
        }
    }

    /// Reads one connection to completion.
    ///
    /// `Ok(())` means the receiver went away and the subscription should stop.
    async fn connect_once(&mut self, tx: &mpsc::Sender<StreamMessage>) -> Result<(), StreamError> {
        let mut request = self
            .client
            .get(&self.url)
            .header(ACCEPT, "text/event-stream")
            .header(CACHE_CONTROL, "no-cache");
        if let Some(id) = self.parser.last_event_id() {
            request = request.header("Last-Event-ID", id);
        }

        let response = request.send().await.map_err(|source| StreamError::Request {
            url: self.url.clone(),
            source,
        })?;
        let status = response.status();
        if !status.is_success() {
            return Err(StreamError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        tracing::info!("connected to {}", self.url);
        if tx.send(StreamMessage::Connected).await.is_err() {
            return Ok(());
        }

        self.parser.reset_pending();
        let mut body = response.bytes_stream();
        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|source| StreamError::Read {
                url: self.url.clone(),
                source,
            })?;
            for event in self.parser.feed(&chunk) {
                if event.event != DEFAULT_EVENT_TYPE {
                    tracing::debug!("ignoring '{}' event", event.event);
                    continue;
                }
                if tx.send(StreamMessage::Event(event)).await.is_err() {
                    return Ok(());
                }
            }
        }

        Err(StreamError::Ended {
            url: self.url.clone(),
        })
    }
}
