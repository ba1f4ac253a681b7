//! Main mock dispatcher implementation.

use crate::config::{
    DefaultReply, DefaultReplyOverride, DispatcherConfig, DispatcherSettings, Headers,
    MockResponse,
};
use crate::matcher::{MockEntry, Registry};
use crate::sink::ResponseSink;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Outcome of a single dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    /// A registered mock answered; `index` is its position in scan order.
    Matched { index: usize, id: Option<String> },
    /// No mock matched and the default reply was sent.
    Default,
}

/// A response with every default applied, ready for a sink.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedResponse {
    pub status: u16,
    pub headers: Headers,
    pub body: String,
}

impl NormalizedResponse {
    fn emit(&self, sink: &mut impl ResponseSink) {
        sink.write_header(self.status, &self.headers);
        sink.end(&self.body);
    }
}

/// Apply the mock defaults: status 200, a JSON content type when no headers
/// were given, and the rendered body.
pub fn normalize(mock: &MockResponse) -> NormalizedResponse {
    let headers = mock.headers.clone().unwrap_or_else(|| {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers
    });

    NormalizedResponse {
        status: mock.status.unwrap_or(200),
        headers,
        body: mock
            .body
            .as_ref()
            .map(|body| body.render())
            .unwrap_or_default(),
    }
}

/// Mock Dispatcher
///
/// Answers each request with the first registered mock whose matcher accepts
/// it, or with the default reply.
pub struct MockDispatcher<R: ?Sized> {
    matchers: Registry<R>,
    default_reply: DefaultReply,
    settings: DispatcherSettings,
    /// Total requests processed.
    requests_total: u64,
    /// Total requests answered by a mock.
    requests_matched: u64,
    /// Total requests answered with the default reply.
    requests_unmatched: u64,
}

impl<R: ?Sized> Default for MockDispatcher<R> {
    fn default() -> Self {
        Self::from_parts(DefaultReply::default(), DispatcherSettings::default())
    }
}

impl<R: ?Sized> MockDispatcher<R> {
    /// Create a dispatcher replying 404 "Not Found" when nothing matches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dispatcher with a partially overridden default reply.
    pub fn with_default_reply(overrides: DefaultReplyOverride) -> Self {
        Self::from_parts(
            DefaultReply::from_override(overrides),
            DispatcherSettings::default(),
        )
    }

    pub fn from_config(config: DispatcherConfig) -> Self {
        let default_reply = config
            .default_reply
            .map(DefaultReply::from_override)
            .unwrap_or_default();
        Self::from_parts(default_reply, config.settings)
    }

    fn from_parts(default_reply: DefaultReply, settings: DispatcherSettings) -> Self {
        info!(
            default_status = default_reply.status,
            "Mock dispatcher initialized"
        );

        Self {
            matchers: Registry::new(),
            default_reply,
            settings,
            requests_total: 0,
            requests_matched: 0,
            requests_unmatched: 0,
        }
    }

    /// Registered entries, in scan order.
    pub fn matchers(&self) -> &Registry<R> {
        &self.matchers
    }

    /// Mutable access to the registry for adding and removing entries.
    pub fn matchers_mut(&mut self) -> &mut Registry<R> {
        &mut self.matchers
    }

    /// Shorthand for `matchers_mut().prepend(entry)`.
    pub fn register(&mut self, entry: MockEntry<R>) {
        self.matchers.prepend(entry);
    }

    pub fn default_reply(&self) -> &DefaultReply {
        &self.default_reply
    }

    /// Get total requests processed.
    pub fn total_requests(&self) -> u64 {
        self.requests_total
    }

    /// Get total requests matched.
    pub fn total_matched(&self) -> u64 {
        self.requests_matched
    }

    /// Get total requests unmatched.
    pub fn total_unmatched(&self) -> u64 {
        self.requests_unmatched
    }

    /// Answer `request` through `sink`.
    ///
    /// Entries are tried front to back and scanning stops at the first match.
    /// A matched entry with a use limit has it decremented. Panics raised by
    /// a matcher propagate to the caller before anything is written.
    pub fn dispatch(&mut self, request: &R, sink: &mut impl ResponseSink) -> Dispatched {
        self.requests_total += 1;
        let entries = self.matchers.len();

        let Some((index, entry)) = self.matchers.find_match(request) else {
            self.requests_unmatched += 1;
            if self.settings.log_unmatched {
                warn!(
                    entries,
                    status = self.default_reply.status,
                    "No matching mock found"
                );
            }

            sink.write_header(self.default_reply.status, &self.default_reply.headers);
            sink.end(&self.default_reply.body);
            return Dispatched::Default;
        };

        self.requests_matched += 1;
        entry.consume();

        if self.settings.log_matches {
            info!(
                index,
                id = ?entry.id(),
                remaining = ?entry.remaining_matches(),
                "Request matched mock"
            );
        }

        let response = normalize(entry.mock());
        debug!(status = response.status, "Emitting mock response");
        response.emit(sink);

        Dispatched::Matched {
            index,
            id: entry.id().map(str::to_string),
        }
    }
}
